use super::allocation::AllocationStrategy;
use super::domain::{ExpenseCategory, StakeholderId};
use super::expenses::ExpenseShare;
use super::scoring::ScoreSummary;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Everything a dashboard or export needs from one settlement run.
#[derive(Debug, Clone, Serialize)]
pub struct SettlementReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    pub strategy: AllocationStrategy,
    pub point_value: f64,
    pub total_patients: u32,
    pub score: ScoreSummary,
    pub stakeholders: Vec<StakeholderRow>,
    pub total_gross: f64,
    pub total_expenses: f64,
    pub total_net: f64,
    pub expense_exposure: f64,
    pub monthly_expenses: f64,
    pub expenses_by_category: BTreeMap<ExpenseCategory, f64>,
    pub expense_shares: Vec<ExpenseShare>,
}

impl SettlementReport {
    /// Compensation total minus annual expense exposure.
    pub fn global_net(&self) -> f64 {
        self.score.total_amount - self.expense_exposure
    }

    pub fn row(&self, id: &StakeholderId) -> Option<&StakeholderRow> {
        self.stakeholders
            .iter()
            .find(|row| &row.stakeholder_id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StakeholderRow {
    pub stakeholder_id: StakeholderId,
    pub name: String,
    pub profession: &'static str,
    pub presence: f64,
    pub weight: f64,
    pub gross: f64,
    pub expenses: f64,
    pub net: f64,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    stakeholder_id: &'a str,
    name: &'a str,
    profession: &'a str,
    presence: f64,
    gross: String,
    expenses: String,
    net: String,
}

/// Writes one line per stakeholder with amounts rounded to cents.
pub fn write_csv<W: Write>(report: &SettlementReport, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in &report.stakeholders {
        csv_writer.serialize(CsvRow {
            stakeholder_id: &row.stakeholder_id.0,
            name: &row.name,
            profession: row.profession,
            presence: row.presence,
            gross: format!("{:.2}", row.gross),
            expenses: format!("{:.2}", row.expenses),
            net: format!("{:.2}", row.net),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
