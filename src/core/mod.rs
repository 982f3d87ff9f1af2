/// Core module for the skill checks
///
/// This module contains the scanners, validators and metrics behind every
/// command, plus the shared result models and compiled patterns.

pub mod accessibility;
pub mod analyzer;
pub mod context_validator;
pub mod creativity;
pub mod design_validator;
pub mod metrics;
pub mod models;
pub mod patterns;
pub mod ux_audit;
