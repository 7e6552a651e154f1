//! Scoring and allocation engine for performance-linked compensation in a healthcare cooperative.
//!
//! The engine is pure: every call receives immutable snapshots through a
//! [`compensation::CompensationContext`] and returns freshly computed aggregates.

pub mod compensation;
pub mod config;
pub mod error;
pub mod telemetry;
