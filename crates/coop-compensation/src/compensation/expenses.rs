use super::allocation::{allocate, Allocation, AllocationStrategy};
use super::domain::{EngineError, Expense, ExpenseCategory, ExpenseId, Stakeholder, StakeholderId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Read-only view over an expense snapshot that annualizes and allocates each entry.
#[derive(Debug, Clone)]
pub struct ExpenseLedger<'a> {
    expenses: Vec<&'a Expense>,
}

impl<'a> ExpenseLedger<'a> {
    pub fn new(expenses: &'a [Expense]) -> Result<Self, EngineError> {
        for expense in expenses {
            expense.validate()?;
        }
        Ok(Self {
            expenses: expenses.iter().collect(),
        })
    }

    /// Narrows the ledger to expenses whose date range covers `date`.
    pub fn active_on(&self, date: NaiveDate) -> Self {
        Self {
            expenses: self
                .expenses
                .iter()
                .copied()
                .filter(|expense| expense.is_active_on(date))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn total_exposure(&self) -> f64 {
        self.expenses.iter().map(|expense| expense.annual_amount()).sum()
    }

    pub fn monthly_equivalent(&self) -> f64 {
        self.expenses
            .iter()
            .map(|expense| expense.monthly_equivalent())
            .sum()
    }

    pub fn totals_by_category(&self) -> BTreeMap<ExpenseCategory, f64> {
        let mut totals = BTreeMap::new();
        for expense in &self.expenses {
            *totals.entry(expense.category).or_default() += expense.annual_amount();
        }
        totals
    }

    /// Allocates every annualized expense with its own strategy and sums shares per stakeholder.
    pub fn allocate(&self, stakeholders: &[Stakeholder]) -> Result<ExpenseBreakdown, EngineError> {
        let mut per_stakeholder: BTreeMap<StakeholderId, f64> = stakeholders
            .iter()
            .map(|stakeholder| (stakeholder.id.clone(), 0.0))
            .collect();
        let mut per_expense = Vec::with_capacity(self.expenses.len());

        for expense in &self.expenses {
            let annual_amount = expense.annual_amount();
            let allocation = allocate(annual_amount, stakeholders, expense.strategy)?;

            for (id, share) in allocation.iter() {
                *per_stakeholder.entry(id.clone()).or_default() += share;
            }

            per_expense.push(ExpenseShare {
                expense_id: expense.id.clone(),
                category: expense.category,
                strategy: expense.strategy,
                annual_amount,
                monthly_equivalent: expense.monthly_equivalent(),
                allocation,
            });
        }

        let total_exposure = self.total_exposure();
        debug!(
            expenses = per_expense.len(),
            total_exposure, "expense ledger allocated"
        );

        Ok(ExpenseBreakdown {
            per_expense,
            per_stakeholder,
            total_exposure,
        })
    }
}

/// Allocation of a single expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub expense_id: ExpenseId,
    pub category: ExpenseCategory,
    pub strategy: AllocationStrategy,
    pub annual_amount: f64,
    pub monthly_equivalent: f64,
    pub allocation: Allocation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    pub per_expense: Vec<ExpenseShare>,
    pub per_stakeholder: BTreeMap<StakeholderId, f64>,
    pub total_exposure: f64,
}

impl ExpenseBreakdown {
    pub fn stakeholder_total(&self, id: &StakeholderId) -> f64 {
        self.per_stakeholder.get(id).copied().unwrap_or(0.0)
    }
}
