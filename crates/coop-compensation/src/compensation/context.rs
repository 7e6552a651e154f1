use super::catalog::IndicatorCatalog;
use super::domain::{EngineError, Expense, Indicator, IndicatorId, ProfessionClass, Stakeholder};
use crate::config::EngineConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

/// Hypothetical or recorded completion state for one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionOverride {
    pub level: u8,
    #[serde(default)]
    pub fraction: Option<f64>,
}

/// Immutable inputs for one engine invocation.
///
/// Administration code owns the underlying records; the context only carries detached copies.
#[derive(Debug, Clone)]
pub struct CompensationContext {
    indicators: Vec<Indicator>,
    stakeholders: Vec<Stakeholder>,
    expenses: Vec<Expense>,
    engine: EngineConfig,
    patient_override: Option<u32>,
    as_of: Option<NaiveDate>,
}

impl CompensationContext {
    pub fn new(
        indicators: Vec<Indicator>,
        stakeholders: Vec<Stakeholder>,
        expenses: Vec<Expense>,
        engine: EngineConfig,
    ) -> Self {
        Self {
            indicators,
            stakeholders,
            expenses,
            engine,
            patient_override: None,
            as_of: None,
        }
    }

    /// Scores against a hypothetical patient panel instead of the roster total.
    pub fn with_patient_override(mut self, total_patients: u32) -> Self {
        self.patient_override = Some(total_patients);
        self
    }

    /// Restricts expense allocation to entries active on `date`.
    pub fn with_as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Detached copy with completion overrides applied; the receiver is left untouched.
    pub fn simulate(
        &self,
        overrides: &BTreeMap<IndicatorId, CompletionOverride>,
    ) -> Result<Self, EngineError> {
        let mut simulated = self.clone();
        simulated.indicators = apply_completion(&self.indicators, overrides)?;
        Ok(simulated)
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn stakeholders(&self) -> &[Stakeholder] {
        &self.stakeholders
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn engine_config(&self) -> &EngineConfig {
        &self.engine
    }

    pub fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }

    /// Physician patient panels summed across the roster, unless overridden.
    pub fn total_patients(&self) -> u32 {
        self.patient_override.unwrap_or_else(|| self.roster_patients())
    }

    pub fn roster_patients(&self) -> u32 {
        self.stakeholders
            .iter()
            .map(Stakeholder::counted_patients)
            .fold(0u32, u32::saturating_add)
    }

    pub fn count_in_class(&self, class: ProfessionClass) -> usize {
        self.stakeholders
            .iter()
            .filter(|stakeholder| stakeholder.class() == class)
            .count()
    }

    pub fn stakeholders_with_role(&self, role: &str) -> Vec<&Stakeholder> {
        self.stakeholders
            .iter()
            .filter(|stakeholder| stakeholder.has_role(role))
            .collect()
    }

    /// Every distinct role held on the roster, sorted.
    pub fn roles(&self) -> BTreeSet<&str> {
        self.stakeholders
            .iter()
            .flat_map(|stakeholder| stakeholder.roles.iter().map(String::as_str))
            .collect()
    }
}

fn apply_completion(
    indicators: &[Indicator],
    overrides: &BTreeMap<IndicatorId, CompletionOverride>,
) -> Result<Vec<Indicator>, EngineError> {
    if let Some(unknown) = overrides
        .keys()
        .find(|id| !indicators.iter().any(|indicator| &indicator.id == *id))
    {
        return Err(EngineError::invalid(
            "completion override",
            format!("indicator {unknown} is not in the catalog"),
        ));
    }

    indicators
        .iter()
        .map(|indicator| match overrides.get(&indicator.id) {
            Some(state) => indicator.simulated(state.level, state.fraction),
            None => Ok(indicator.clone()),
        })
        .collect()
}

/// Serialized input handed over by the surrounding application.
///
/// When `indicators` is absent the standard catalog is used, with `completion` applied on top.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub indicators: Option<Vec<Indicator>>,
    #[serde(default)]
    pub completion: BTreeMap<IndicatorId, CompletionOverride>,
    pub stakeholders: Vec<Stakeholder>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Snapshot {
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn into_context(self, engine: EngineConfig) -> Result<CompensationContext, EngineError> {
        let catalog = self
            .indicators
            .unwrap_or_else(|| IndicatorCatalog::standard().into_indicators());
        let indicators = apply_completion(&catalog, &self.completion)?;

        Ok(CompensationContext::new(
            indicators,
            self.stakeholders,
            self.expenses,
            engine,
        ))
    }
}
