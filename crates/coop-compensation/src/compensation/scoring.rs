use super::domain::{ensure_non_negative, Axis, EngineError, Indicator, IndicatorId, Tier};
use crate::config::EngineConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Stateless scorer converting indicator completion into points and currency.
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine {
    point_value: f64,
}

impl ScoringEngine {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        ensure_non_negative("point value", config.point_value)?;
        Ok(Self {
            point_value: config.point_value,
        })
    }

    pub fn point_value(&self) -> f64 {
        self.point_value
    }

    /// Points earned by one indicator, ignoring the catalog-wide prerequisite gate.
    pub fn points_of(&self, indicator: &Indicator, total_patients: u32) -> f64 {
        if indicator.level == 0 {
            return 0.0;
        }

        let mut ratio = if indicator.reference_patients > 0 {
            (f64::from(total_patients) / f64::from(indicator.reference_patients)).min(1.0)
        } else {
            1.0
        };

        // A stored fraction of 0 means no progress was recorded, not 0% progress.
        if indicator.variable_points > 0.0 {
            if let Some(fraction) = indicator.completion_fraction.filter(|f| *f > 0.0) {
                ratio *= fraction / 100.0;
            }
        }

        indicator.fixed_points + indicator.variable_points * ratio
    }

    pub fn amount_of(&self, indicator: &Indicator, total_patients: u32) -> f64 {
        self.points_of(indicator, total_patients) * self.point_value
    }

    /// Scores the whole catalog. A single unmet prerequisite zeroes every total.
    pub fn score(
        &self,
        indicators: &[Indicator],
        total_patients: u32,
    ) -> Result<ScoreSummary, EngineError> {
        for indicator in indicators {
            indicator.validate()?;
        }

        let gate_open = prerequisites_satisfied(indicators);
        if !gate_open {
            let missing: Vec<&str> = indicators
                .iter()
                .filter(|indicator| indicator.prerequisite && !indicator.is_completed())
                .map(|indicator| indicator.id.0.as_str())
                .collect();
            warn!(?missing, "prerequisite indicators incomplete, no points awarded");
        }

        let mut summary = ScoreSummary::empty(gate_open);
        for indicator in indicators {
            let potential_points = self.points_of(indicator, total_patients);
            let awarded_points = if gate_open { potential_points } else { 0.0 };

            *summary.points_by_axis.entry(indicator.axis).or_default() += awarded_points;
            *summary.points_by_tier.entry(indicator.tier).or_default() += awarded_points;
            summary.total_points += awarded_points;

            summary.indicators.push(IndicatorScore {
                id: indicator.id.clone(),
                axis: indicator.axis,
                tier: indicator.tier,
                level: indicator.level,
                potential_points,
                awarded_points,
                awarded_amount: awarded_points * self.point_value,
            });
        }
        summary.total_amount = summary.total_points * self.point_value;

        debug!(
            gate_open,
            total_patients,
            total_points = summary.total_points,
            total_amount = summary.total_amount,
            "catalog scored"
        );

        Ok(summary)
    }
}

/// True when every prerequisite indicator reached at least level 1.
pub fn prerequisites_satisfied(indicators: &[Indicator]) -> bool {
    indicators
        .iter()
        .filter(|indicator| indicator.prerequisite)
        .all(Indicator::is_completed)
}

/// Per-indicator contribution; `awarded_*` already reflects the prerequisite gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorScore {
    pub id: IndicatorId,
    pub axis: Axis,
    pub tier: Tier,
    pub level: u8,
    pub potential_points: f64,
    pub awarded_points: f64,
    pub awarded_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub prerequisites_satisfied: bool,
    pub total_points: f64,
    pub total_amount: f64,
    pub points_by_axis: BTreeMap<Axis, f64>,
    pub points_by_tier: BTreeMap<Tier, f64>,
    pub indicators: Vec<IndicatorScore>,
}

impl ScoreSummary {
    fn empty(prerequisites_satisfied: bool) -> Self {
        Self {
            prerequisites_satisfied,
            total_points: 0.0,
            total_amount: 0.0,
            points_by_axis: Axis::ordered().into_iter().map(|axis| (axis, 0.0)).collect(),
            points_by_tier: Tier::ordered().into_iter().map(|tier| (tier, 0.0)).collect(),
            indicators: Vec::new(),
        }
    }

    pub fn axis_points(&self, axis: Axis) -> f64 {
        self.points_by_axis.get(&axis).copied().unwrap_or(0.0)
    }

    pub fn tier_points(&self, tier: Tier) -> f64 {
        self.points_by_tier.get(&tier).copied().unwrap_or(0.0)
    }
}
