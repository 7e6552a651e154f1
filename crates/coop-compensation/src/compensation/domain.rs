use super::allocation::AllocationStrategy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for catalog indicators (e.g. `A1S1`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndicatorId(pub String);

/// Identifier wrapper for cooperative members.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StakeholderId(pub String);

/// Identifier wrapper for recorded expenses.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExpenseId(pub String);

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for StakeholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three fixed top-level indicator categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    AccessToCare,
    Teamwork,
    InformationSystem,
}

impl Axis {
    pub const fn ordered() -> [Self; 3] {
        [Self::AccessToCare, Self::Teamwork, Self::InformationSystem]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AccessToCare => "Access to care",
            Self::Teamwork => "Teamwork & coordination",
            Self::InformationSystem => "Information system",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Base,
    Optional,
}

impl Tier {
    pub const fn ordered() -> [Self; 2] {
        [Self::Base, Self::Optional]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Optional => "Optional",
        }
    }
}

/// Scored performance criterion together with its current completion state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub id: IndicatorId,
    pub name: String,
    pub axis: Axis,
    pub tier: Tier,
    pub prerequisite: bool,
    pub fixed_points: f64,
    pub variable_points: f64,
    pub reference_patients: u32,
    pub max_level: u8,
    #[serde(default)]
    pub level: u8,
    /// Percentage in `0..=100`; only read when variable points and level are both positive.
    /// Zero reads as unset.
    #[serde(default)]
    pub completion_fraction: Option<f64>,
}

impl Indicator {
    /// Detached copy carrying a hypothetical completion state, used for simulations.
    ///
    /// The fraction is dropped when it cannot apply (no variable points or level 0).
    pub fn simulated(
        &self,
        level: u8,
        completion_fraction: Option<f64>,
    ) -> Result<Self, EngineError> {
        let mut copy = self.clone();
        copy.level = level;
        copy.completion_fraction = if copy.variable_points > 0.0 && level > 0 {
            completion_fraction
        } else {
            None
        };
        copy.validate()?;
        Ok(copy)
    }

    pub fn is_completed(&self) -> bool {
        self.level >= 1
    }

    pub(crate) fn validate(&self) -> Result<(), EngineError> {
        let field = |name: &str| format!("indicator {}.{name}", self.id);

        ensure_non_negative(&field("fixed_points"), self.fixed_points)?;
        ensure_non_negative(&field("variable_points"), self.variable_points)?;

        if self.max_level < 1 {
            return Err(EngineError::invalid(field("max_level"), "must be at least 1"));
        }
        if self.level > self.max_level {
            return Err(EngineError::invalid(
                field("level"),
                format!("{} exceeds maximum level {}", self.level, self.max_level),
            ));
        }
        if let Some(fraction) = self.completion_fraction {
            if !fraction.is_finite() || !(0.0..=100.0).contains(&fraction) {
                return Err(EngineError::invalid(
                    field("completion_fraction"),
                    format!("{fraction} is outside 0..=100"),
                ));
            }
        }

        Ok(())
    }
}

/// Broad classification derived from a member's profession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfessionClass {
    Clinical,
    AlliedHealth,
}

/// Fixed profession taxonomy for cooperative members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profession {
    GeneralPractitioner,
    SpecialistPhysician,
    Midwife,
    Dentist,
    Pharmacist,
    Biologist,
    Nurse,
    AdvancedPracticeNurse,
    Physiotherapist,
    Podiatrist,
    OccupationalTherapist,
    Psychomotor,
    SpeechTherapist,
    Orthoptist,
    RadiographyTechnician,
    HearingAidSpecialist,
    Optician,
    Prosthetist,
    Orthotist,
    Dietitian,
    CareAssistant,
    ChildcareAssistant,
    Paramedic,
    DentalAssistant,
}

impl Profession {
    pub const fn class(self) -> ProfessionClass {
        match self {
            Self::GeneralPractitioner
            | Self::SpecialistPhysician
            | Self::Midwife
            | Self::Dentist
            | Self::Pharmacist
            | Self::Biologist => ProfessionClass::Clinical,
            Self::Nurse
            | Self::AdvancedPracticeNurse
            | Self::Physiotherapist
            | Self::Podiatrist
            | Self::OccupationalTherapist
            | Self::Psychomotor
            | Self::SpeechTherapist
            | Self::Orthoptist
            | Self::RadiographyTechnician
            | Self::HearingAidSpecialist
            | Self::Optician
            | Self::Prosthetist
            | Self::Orthotist
            | Self::Dietitian
            | Self::CareAssistant
            | Self::ChildcareAssistant
            | Self::Paramedic
            | Self::DentalAssistant => ProfessionClass::AlliedHealth,
        }
    }

    /// Physicians are the only members whose patient panel counts toward scoring.
    pub const fn is_physician(self) -> bool {
        matches!(self, Self::GeneralPractitioner | Self::SpecialistPhysician)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GeneralPractitioner => "General practitioner",
            Self::SpecialistPhysician => "Specialist physician",
            Self::Midwife => "Midwife",
            Self::Dentist => "Dentist",
            Self::Pharmacist => "Pharmacist",
            Self::Biologist => "Medical biologist",
            Self::Nurse => "Nurse",
            Self::AdvancedPracticeNurse => "Advanced practice nurse",
            Self::Physiotherapist => "Physiotherapist",
            Self::Podiatrist => "Podiatrist",
            Self::OccupationalTherapist => "Occupational therapist",
            Self::Psychomotor => "Psychomotor therapist",
            Self::SpeechTherapist => "Speech therapist",
            Self::Orthoptist => "Orthoptist",
            Self::RadiographyTechnician => "Radiography technician",
            Self::HearingAidSpecialist => "Hearing aid specialist",
            Self::Optician => "Optician",
            Self::Prosthetist => "Prosthetist",
            Self::Orthotist => "Orthotist",
            Self::Dietitian => "Dietitian",
            Self::CareAssistant => "Care assistant",
            Self::ChildcareAssistant => "Childcare assistant",
            Self::Paramedic => "Paramedic",
            Self::DentalAssistant => "Dental assistant",
        }
    }
}

/// Member of the cooperative as seen by the allocation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub id: StakeholderId,
    #[serde(default)]
    pub name: String,
    pub profession: Profession,
    /// Registered patients; ignored unless the profession is a physician.
    #[serde(default)]
    pub patient_panel: u32,
    /// Full-time-equivalent presence in `0..=1`.
    #[serde(default = "full_time")]
    pub presence: f64,
    #[serde(default = "unit_weight")]
    pub weight: f64,
    /// Responsibilities held in the structure, e.g. coordinator or quality lead.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
}

fn full_time() -> f64 {
    1.0
}

fn unit_weight() -> f64 {
    1.0
}

impl Stakeholder {
    pub fn class(&self) -> ProfessionClass {
        self.profession.class()
    }

    /// Exact, case-sensitive match on one of the declared roles.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|held| held == role)
    }

    pub fn counted_patients(&self) -> u32 {
        if self.profession.is_physician() {
            self.patient_panel
        } else {
            0
        }
    }

    pub(crate) fn validate(&self) -> Result<(), EngineError> {
        ensure_non_negative(&format!("stakeholder {}.weight", self.id), self.weight)?;
        ensure_non_negative(&format!("stakeholder {}.presence", self.id), self.presence)?;
        if self.presence > 1.0 {
            return Err(EngineError::invalid(
                format!("stakeholder {}.presence", self.id),
                format!("{} exceeds one full-time equivalent", self.presence),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    HealthSoftware,
    CoordinatorPay,
    RoomRental,
    MedicalEquipment,
    OfficeSupplies,
    Insurance,
    BankFees,
    Telecommunications,
    Maintenance,
    AccountingFees,
    LegalFees,
    Training,
    ProfessionalDues,
    Taxes,
    Other,
}

impl ExpenseCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HealthSoftware => "Health software",
            Self::CoordinatorPay => "Coordinator pay",
            Self::RoomRental => "Room rental",
            Self::MedicalEquipment => "Medical equipment",
            Self::OfficeSupplies => "Office supplies",
            Self::Insurance => "Insurance",
            Self::BankFees => "Bank fees",
            Self::Telecommunications => "Telecommunications",
            Self::Maintenance => "Maintenance & repairs",
            Self::AccountingFees => "Accounting fees",
            Self::LegalFees => "Legal fees",
            Self::Training => "Training",
            Self::ProfessionalDues => "Professional dues",
            Self::Taxes => "Taxes",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingFrequency {
    Monthly,
    Quarterly,
    Yearly,
    OneTime,
}

impl BillingFrequency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
            Self::OneTime => "One-time",
        }
    }
}

/// Shared operating cost recorded by the administration layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    #[serde(default)]
    pub name: String,
    pub category: ExpenseCategory,
    pub amount: f64,
    pub frequency: BillingFrequency,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub strategy: AllocationStrategy,
}

impl Expense {
    /// Annual exposure: one-time charges count once at face value.
    pub fn annual_amount(&self) -> f64 {
        match self.frequency {
            BillingFrequency::Monthly => self.amount * 12.0,
            BillingFrequency::Quarterly => self.amount * 4.0,
            BillingFrequency::Yearly | BillingFrequency::OneTime => self.amount,
        }
    }

    /// Display-only monthly figure; never used in allocation.
    pub fn monthly_equivalent(&self) -> f64 {
        match self.frequency {
            BillingFrequency::Monthly => self.amount,
            BillingFrequency::Quarterly => self.amount / 3.0,
            BillingFrequency::Yearly | BillingFrequency::OneTime => self.amount / 12.0,
        }
    }

    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        let started = self.start_date.map_or(true, |start| start <= date);
        let not_ended = self.end_date.map_or(true, |end| date <= end);
        started && not_ended
    }

    pub(crate) fn validate(&self) -> Result<(), EngineError> {
        ensure_non_negative(&format!("expense {}.amount", self.id), self.amount)?;
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(EngineError::invalid(
                    format!("expense {}.end_date", self.id),
                    format!("{end} precedes start date {start}"),
                ));
            }
        }
        Ok(())
    }
}

/// Failures raised by the scoring and allocation engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("unknown allocation strategy '{0}'")]
    InvalidStrategy(String),
    #[error("{strategy} allocation needs a positive weight sum")]
    ZeroWeightSum { strategy: &'static str },
    #[error("allocation requires at least one stakeholder")]
    EmptyStakeholderSet,
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },
}

impl EngineError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub(crate) fn ensure_non_negative(field: &str, value: f64) -> Result<(), EngineError> {
    if !value.is_finite() {
        return Err(EngineError::invalid(field, format!("{value} is not finite")));
    }
    if value < 0.0 {
        return Err(EngineError::invalid(field, format!("{value} is negative")));
    }
    Ok(())
}
