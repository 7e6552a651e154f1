//! Indicator scoring, proration strategies, expense ledger and net settlement.

pub mod allocation;
pub mod catalog;
pub mod context;
pub mod domain;
pub mod expenses;
pub mod report;
pub mod scoring;
pub mod settlement;

#[cfg(test)]
mod tests;

pub use allocation::{allocate, allocate_with, Allocation, AllocationStrategy};
pub use catalog::IndicatorCatalog;
pub use context::{CompensationContext, CompletionOverride, Snapshot};
pub use domain::{
    Axis, BillingFrequency, EngineError, Expense, ExpenseCategory, ExpenseId, Indicator,
    IndicatorId, Profession, ProfessionClass, Stakeholder, StakeholderId, Tier,
};
pub use expenses::{ExpenseBreakdown, ExpenseLedger, ExpenseShare};
pub use report::{write_csv, SettlementReport, StakeholderRow};
pub use scoring::{prerequisites_satisfied, IndicatorScore, ScoreSummary, ScoringEngine};
pub use settlement::{settle, Settlement, StakeholderNet};

use tracing::info;

/// Scores the context's catalog against its patient total.
pub fn score(context: &CompensationContext) -> Result<ScoreSummary, EngineError> {
    ScoringEngine::new(context.engine_config())?
        .score(context.indicators(), context.total_patients())
}

/// Runs the full pipeline: scoring, gross allocation, expense allocation and netting.
pub fn run_settlement(
    context: &CompensationContext,
    strategy: AllocationStrategy,
) -> Result<SettlementReport, EngineError> {
    let scoring = ScoringEngine::new(context.engine_config())?;
    let total_patients = context.total_patients();
    let summary = scoring.score(context.indicators(), total_patients)?;

    let stakeholders = context.stakeholders();
    let gross = allocate(summary.total_amount, stakeholders, strategy)?;

    let ledger = ExpenseLedger::new(context.expenses())?;
    let ledger = match context.as_of() {
        Some(date) => ledger.active_on(date),
        None => ledger,
    };
    let breakdown = ledger.allocate(stakeholders)?;
    let settlement = settle(&gross, &breakdown);

    let rows = stakeholders
        .iter()
        .map(|stakeholder| {
            let net = settlement
                .rows
                .iter()
                .find(|row| row.stakeholder_id == stakeholder.id);
            StakeholderRow {
                stakeholder_id: stakeholder.id.clone(),
                name: stakeholder.name.clone(),
                profession: stakeholder.profession.label(),
                presence: stakeholder.presence,
                weight: stakeholder.weight,
                gross: net.map_or(0.0, |row| row.gross),
                expenses: net.map_or(0.0, |row| row.expenses),
                net: net.map_or(0.0, |row| row.net),
            }
        })
        .collect();

    info!(
        %strategy,
        stakeholders = stakeholders.len(),
        expenses = ledger.len(),
        total_gross = settlement.total_gross,
        total_net = settlement.total_net,
        "settlement computed"
    );

    Ok(SettlementReport {
        as_of: context.as_of(),
        strategy,
        point_value: scoring.point_value(),
        total_patients,
        score: summary,
        stakeholders: rows,
        total_gross: settlement.total_gross,
        total_expenses: settlement.total_expenses,
        total_net: settlement.total_net,
        expense_exposure: breakdown.total_exposure,
        monthly_expenses: ledger.monthly_equivalent(),
        expenses_by_category: ledger.totals_by_category(),
        expense_shares: breakdown.per_expense,
    })
}
