mod cli;
mod render;
mod settle;

use coop_compensation::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
