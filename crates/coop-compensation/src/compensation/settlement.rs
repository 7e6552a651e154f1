use super::allocation::Allocation;
use super::domain::StakeholderId;
use super::expenses::ExpenseBreakdown;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Gross, expense and net figures for one stakeholder. `net` may be negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeholderNet {
    pub stakeholder_id: StakeholderId,
    pub gross: f64,
    pub expenses: f64,
    pub net: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub rows: Vec<StakeholderNet>,
    pub total_gross: f64,
    pub total_expenses: f64,
    pub total_net: f64,
}

impl Settlement {
    pub fn net_of(&self, id: &StakeholderId) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| &row.stakeholder_id == id)
            .map(|row| row.net)
    }

    /// Stakeholders whose allocated costs exceed their allocated compensation.
    pub fn in_deficit(&self) -> impl Iterator<Item = &StakeholderNet> {
        self.rows.iter().filter(|row| row.net < 0.0)
    }
}

/// Nets gross compensation shares against aggregated expense shares.
pub fn settle(gross: &Allocation, expenses: &ExpenseBreakdown) -> Settlement {
    let ids: BTreeSet<&StakeholderId> = gross
        .iter()
        .map(|(id, _)| id)
        .chain(expenses.per_stakeholder.keys())
        .collect();

    let rows: Vec<StakeholderNet> = ids
        .into_iter()
        .map(|id| {
            let gross_share = gross.share(id);
            let expense_share = expenses.stakeholder_total(id);
            StakeholderNet {
                stakeholder_id: id.clone(),
                gross: gross_share,
                expenses: expense_share,
                net: gross_share - expense_share,
            }
        })
        .collect();

    let total_gross = rows.iter().map(|row| row.gross).sum();
    let total_expenses = rows.iter().map(|row| row.expenses).sum();
    let total_net = rows.iter().map(|row| row.net).sum();

    Settlement {
        rows,
        total_gross,
        total_expenses,
        total_net,
    }
}
