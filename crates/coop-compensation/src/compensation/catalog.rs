use super::domain::{Axis, Indicator, IndicatorId, Tier};

/// Reference patient volume used to prorate variable points.
pub const DEFAULT_REFERENCE_PATIENTS: u32 = 4000;

/// Fixed set of indicator definitions; completion state starts at level 0.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorCatalog {
    indicators: Vec<Indicator>,
}

impl IndicatorCatalog {
    pub fn standard() -> Self {
        Self {
            indicators: standard_indicators(),
        }
    }

    pub fn from_indicators(indicators: Vec<Indicator>) -> Self {
        Self { indicators }
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn into_indicators(self) -> Vec<Indicator> {
        self.indicators
    }

    pub fn get(&self, id: &str) -> Option<&Indicator> {
        self.indicators.iter().find(|indicator| indicator.id.0 == id)
    }

    pub fn for_axis(&self, axis: Axis) -> Vec<&Indicator> {
        self.indicators
            .iter()
            .filter(|indicator| indicator.axis == axis)
            .collect()
    }

    pub fn prerequisites(&self) -> Vec<&Indicator> {
        self.indicators
            .iter()
            .filter(|indicator| indicator.prerequisite)
            .collect()
    }
}

struct Definition {
    id: &'static str,
    name: &'static str,
    axis: Axis,
    tier: Tier,
    prerequisite: bool,
    fixed: f64,
    variable: f64,
    max_level: u8,
}

impl Definition {
    fn build(self) -> Indicator {
        Indicator {
            id: IndicatorId(self.id.to_string()),
            name: self.name.to_string(),
            axis: self.axis,
            tier: self.tier,
            prerequisite: self.prerequisite,
            fixed_points: self.fixed,
            variable_points: self.variable,
            reference_patients: DEFAULT_REFERENCE_PATIENTS,
            max_level: self.max_level,
            level: 0,
            completion_fraction: None,
        }
    }
}

fn prerequisite(
    id: &'static str,
    name: &'static str,
    axis: Axis,
    fixed: f64,
    variable: f64,
) -> Definition {
    Definition {
        id,
        name,
        axis,
        tier: Tier::Base,
        prerequisite: true,
        fixed,
        variable,
        max_level: 1,
    }
}

fn base(
    id: &'static str,
    name: &'static str,
    axis: Axis,
    fixed: f64,
    variable: f64,
) -> Definition {
    Definition {
        id,
        name,
        axis,
        tier: Tier::Base,
        prerequisite: false,
        fixed,
        variable,
        max_level: 1,
    }
}

fn optional(
    id: &'static str,
    name: &'static str,
    axis: Axis,
    fixed: f64,
    variable: f64,
    max_level: u8,
) -> Definition {
    Definition {
        id,
        name,
        axis,
        tier: Tier::Optional,
        prerequisite: false,
        fixed,
        variable,
        max_level,
    }
}

#[rustfmt::skip]
fn standard_indicators() -> Vec<Indicator> {
    use Axis::{AccessToCare, InformationSystem, Teamwork};

    [
        prerequisite("A1S1", "Opening hours and same-day care", AccessToCare, 800.0, 0.0),
        prerequisite("A1S2", "Response to severe health crises", AccessToCare, 100.0, 350.0),
        optional("A1O1", "Diversity of specialised medical services", AccessToCare, 300.0, 0.0, 2),
        optional("A1O2", "External second-line specialist consultations", AccessToCare, 300.0, 0.0, 2),
        optional("A1O3", "Hosting doctors under a territorial solidarity contract", AccessToCare, 200.0, 0.0, 1),
        optional("A1O4", "Public health missions", AccessToCare, 200.0, 700.0, 1),
        optional("A1O5", "Patient involvement", AccessToCare, 200.0, 300.0, 2),
        optional("A1O6", "Same-day care through the regional access service", AccessToCare, 200.0, 0.0, 1),
        prerequisite("A2S1", "Coordination function", Teamwork, 1000.0, 1700.0),
        base("A2S2", "Multi-professional protocols", Teamwork, 100.0, 0.0),
        base("A2S3", "Multi-professional case reviews", Teamwork, 0.0, 1000.0),
        optional("A2O1", "Training of health professionals", Teamwork, 450.0, 0.0, 1),
        optional("A2O2", "External coordination", Teamwork, 0.0, 200.0, 1),
        optional("A2O3", "Quality improvement programme", Teamwork, 100.0, 500.0, 3),
        optional("A2O4", "National cooperation protocols for same-day care", Teamwork, 100.0, 0.0, 1),
        optional("A2O5", "Heart failure care pathway", Teamwork, 0.0, 100.0, 1),
        optional("A2O6", "Childhood overweight care pathway", Teamwork, 100.0, 0.0, 1),
        prerequisite("A3S1", "Standard information system", InformationSystem, 500.0, 200.0),
        optional("A3O1", "Advanced information system", InformationSystem, 100.0, 0.0, 1),
    ]
    .into_iter()
    .map(Definition::build)
    .collect()
}
