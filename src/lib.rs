/// Skillcheck - heuristic checks for codebases and design systems
///
/// This library provides the context analyzer, context validator, design
/// validator, accessibility checker, UX audit and creativity evaluator used by
/// the command-line tools.

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

// Re-export the entry points for convenience
pub use crate::config::{load_config, Config};
pub use crate::core::analyzer::ContextAnalyzer;
pub use crate::core::context_validator::ContextValidator;
pub use crate::core::design_validator::DesignValidator;
pub use crate::error::{Result, SkillError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
