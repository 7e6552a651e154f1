use chrono::NaiveDate;

use crate::compensation::allocation::AllocationStrategy;
use crate::compensation::domain::{
    Axis, BillingFrequency, Expense, ExpenseCategory, ExpenseId, Indicator, IndicatorId,
    Profession, Stakeholder, StakeholderId, Tier,
};
use crate::compensation::scoring::ScoringEngine;
use crate::config::EngineConfig;

pub(super) const TOLERANCE: f64 = 1e-9;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(&EngineConfig { point_value: 7.0 }).expect("valid point value")
}

pub(super) fn sid(raw: &str) -> StakeholderId {
    StakeholderId(raw.to_string())
}

pub(super) fn member(id: &str, profession: Profession, presence: f64) -> Stakeholder {
    Stakeholder {
        id: sid(id),
        name: format!("Member {id}"),
        profession,
        patient_panel: 0,
        presence,
        weight: 1.0,
        roles: Vec::new(),
    }
}

pub(super) fn physician(id: &str, patient_panel: u32, presence: f64) -> Stakeholder {
    Stakeholder {
        patient_panel,
        ..member(id, Profession::GeneralPractitioner, presence)
    }
}

/// Two physicians and a nurse with presence fractions 1.0 / 0.5 / 0.5.
pub(super) fn roster() -> Vec<Stakeholder> {
    vec![
        physician("dr-a", 1200, 1.0),
        physician("dr-b", 800, 0.5),
        member("nurse-c", Profession::Nurse, 0.5),
    ]
}

pub(super) fn mixed_roster() -> Vec<Stakeholder> {
    let mut stakeholders = roster();
    stakeholders.push(Stakeholder {
        weight: 2.5,
        ..member("physio-d", Profession::Physiotherapist, 0.8)
    });
    stakeholders.push(Stakeholder {
        weight: 0.5,
        ..member("midwife-e", Profession::Midwife, 0.2)
    });
    stakeholders
}

pub(super) fn allied_roster() -> Vec<Stakeholder> {
    vec![
        member("nurse-1", Profession::Nurse, 1.0),
        member("physio-2", Profession::Physiotherapist, 0.6),
    ]
}

pub(super) fn indicator(id: &str, fixed: f64, variable: f64, reference: u32) -> Indicator {
    Indicator {
        id: IndicatorId(id.to_string()),
        name: format!("Indicator {id}"),
        axis: Axis::AccessToCare,
        tier: Tier::Optional,
        prerequisite: false,
        fixed_points: fixed,
        variable_points: variable,
        reference_patients: reference,
        max_level: 1,
        level: 0,
        completion_fraction: None,
    }
}

pub(super) fn completed(mut indicator: Indicator) -> Indicator {
    indicator.level = 1;
    indicator
}

pub(super) fn prerequisite(id: &str, fixed: f64, axis: Axis) -> Indicator {
    Indicator {
        axis,
        tier: Tier::Base,
        prerequisite: true,
        ..indicator(id, fixed, 0.0, 4000)
    }
}

pub(super) fn expense(
    id: &str,
    amount: f64,
    frequency: BillingFrequency,
    strategy: AllocationStrategy,
) -> Expense {
    Expense {
        id: ExpenseId(id.to_string()),
        name: format!("Expense {id}"),
        category: ExpenseCategory::Other,
        amount,
        frequency,
        start_date: None,
        end_date: None,
        strategy,
    }
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
