use super::domain::{
    ensure_non_negative, EngineError, ProfessionClass, Stakeholder, StakeholderId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Closed set of rules for splitting one amount across stakeholders.
///
/// Callers needing another rule go through [`allocate_with`] instead of extending this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationStrategy {
    Equal,
    PresenceWeighted,
    WeightBased,
    ClinicalOnly,
    AlliedOnly,
}

impl AllocationStrategy {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Equal,
            Self::PresenceWeighted,
            Self::WeightBased,
            Self::ClinicalOnly,
            Self::AlliedOnly,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::PresenceWeighted => "presence-weighted",
            Self::WeightBased => "weight-based",
            Self::ClinicalOnly => "clinical-only",
            Self::AlliedOnly => "allied-only",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Equal => "Equal split",
            Self::PresenceWeighted => "Pro rata of presence",
            Self::WeightBased => "Pro rata of distribution weight",
            Self::ClinicalOnly => "Clinical professions only",
            Self::AlliedOnly => "Allied-health professions only",
        }
    }
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AllocationStrategy {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
        Self::ordered()
            .into_iter()
            .find(|strategy| strategy.key() == normalized)
            .ok_or_else(|| EngineError::InvalidStrategy(raw.to_string()))
    }
}

/// Per-stakeholder shares of one allocated amount. Every recipient of the snapshot is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    shares: BTreeMap<StakeholderId, f64>,
}

impl Allocation {
    pub fn share(&self, id: &StakeholderId) -> f64 {
        self.shares.get(id).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.shares.values().sum()
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StakeholderId, f64)> {
        self.shares.iter().map(|(id, share)| (id, *share))
    }

    pub fn into_shares(self) -> BTreeMap<StakeholderId, f64> {
        self.shares
    }
}

/// Splits `amount` across `stakeholders` under one of the built-in strategies.
pub fn allocate(
    amount: f64,
    stakeholders: &[Stakeholder],
    strategy: AllocationStrategy,
) -> Result<Allocation, EngineError> {
    validate_request(amount, stakeholders)?;
    debug!(%strategy, amount, recipients = stakeholders.len(), "allocating amount");

    match strategy {
        AllocationStrategy::Equal => Ok(split_equally(amount, stakeholders, |_| true)),
        AllocationStrategy::PresenceWeighted => {
            let weights = stakeholders.iter().map(|s| s.presence).collect();
            split_proportionally(amount, stakeholders, weights, strategy.key())
        }
        AllocationStrategy::WeightBased => {
            let weights = stakeholders.iter().map(|s| s.weight).collect();
            split_proportionally(amount, stakeholders, weights, strategy.key())
        }
        AllocationStrategy::ClinicalOnly => Ok(split_within_class(
            amount,
            stakeholders,
            ProfessionClass::Clinical,
        )),
        AllocationStrategy::AlliedOnly => Ok(split_within_class(
            amount,
            stakeholders,
            ProfessionClass::AlliedHealth,
        )),
    }
}

/// Splits `amount` pro rata of a caller-supplied weight per stakeholder.
pub fn allocate_with<F>(
    amount: f64,
    stakeholders: &[Stakeholder],
    weigh: F,
) -> Result<Allocation, EngineError>
where
    F: Fn(&Stakeholder) -> f64,
{
    validate_request(amount, stakeholders)?;

    let mut weights = Vec::with_capacity(stakeholders.len());
    for stakeholder in stakeholders {
        let weight = weigh(stakeholder);
        ensure_non_negative(&format!("custom weight for {}", stakeholder.id), weight)?;
        weights.push(weight);
    }

    split_proportionally(amount, stakeholders, weights, "custom")
}

fn validate_request(amount: f64, stakeholders: &[Stakeholder]) -> Result<(), EngineError> {
    ensure_non_negative("allocation amount", amount)?;
    if stakeholders.is_empty() {
        return Err(EngineError::EmptyStakeholderSet);
    }

    let mut seen = BTreeSet::new();
    for stakeholder in stakeholders {
        stakeholder.validate()?;
        if !seen.insert(&stakeholder.id) {
            return Err(EngineError::invalid(
                "stakeholder id",
                format!("{} appears more than once", stakeholder.id),
            ));
        }
    }
    Ok(())
}

fn split_equally<P>(amount: f64, stakeholders: &[Stakeholder], eligible: P) -> Allocation
where
    P: Fn(&Stakeholder) -> bool,
{
    let recipients = stakeholders.iter().filter(|s| eligible(*s)).count();
    let per_head = amount / recipients as f64;

    let shares = stakeholders
        .iter()
        .map(|s| {
            let share = if eligible(s) { per_head } else { 0.0 };
            (s.id.clone(), share)
        })
        .collect();

    Allocation { shares }
}

fn split_within_class(
    amount: f64,
    stakeholders: &[Stakeholder],
    class: ProfessionClass,
) -> Allocation {
    if stakeholders.iter().any(|s| s.class() == class) {
        return split_equally(amount, stakeholders, |s| s.class() == class);
    }

    warn!(
        ?class,
        recipients = stakeholders.len(),
        "no stakeholder in profession class, splitting equally across everyone"
    );
    split_equally(amount, stakeholders, |_| true)
}

fn split_proportionally(
    amount: f64,
    stakeholders: &[Stakeholder],
    weights: Vec<f64>,
    strategy: &'static str,
) -> Result<Allocation, EngineError> {
    let weight_sum: f64 = weights.iter().sum();
    if weight_sum <= 0.0 {
        return Err(EngineError::ZeroWeightSum { strategy });
    }

    let mut shares: Vec<f64> = weights
        .iter()
        .map(|weight| amount * (weight / weight_sum))
        .collect();

    // Floating-point remainder goes to the last weighted recipient so shares sum to `amount`.
    if let Some(last) = weights.iter().rposition(|weight| *weight > 0.0) {
        let others: f64 = shares
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != last)
            .map(|(_, share)| share)
            .sum();
        shares[last] = amount - others;
    }

    let shares = stakeholders
        .iter()
        .zip(shares)
        .map(|(s, share)| (s.id.clone(), share))
        .collect();

    Ok(Allocation { shares })
}
