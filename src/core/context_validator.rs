/// Context document validator
///
/// Scores a JSON context document (layers, responsibilities, inactive
/// information, dependencies, naming, structure sizes) and estimates its token
/// footprint.

use std::path::Path;

use log::{debug, info};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::core::metrics::{self, TokenUsage};
use crate::core::models::Severity;
use crate::core::patterns;
use crate::error::{Result, SkillError};
use crate::utils::file_utils;

/// More inactive entries than this fail the relevance check
const MAX_INACTIVE_ENTRIES: usize = 5;
/// Coupling above this percentage fails the dependency check
const HIGH_COUPLING: f64 = 70.0;
/// Coupling below this percentage passes the dependency check
const LOW_COUPLING: f64 = 30.0;

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub category: String,
    pub passed: bool,
    pub message: String,
    pub suggestion: Option<String>,
    pub severity: Severity,
}

impl ValidationResult {
    fn pass(category: &str, message: impl Into<String>) -> Self {
        Self {
            category: category.to_string(),
            passed: true,
            message: message.into(),
            suggestion: None,
            severity: Severity::Info,
        }
    }

    fn fail(category: &str, severity: Severity, message: impl Into<String>, suggestion: &str) -> Self {
        Self {
            category: category.to_string(),
            passed: false,
            message: message.into(),
            suggestion: Some(suggestion.to_string()),
            severity,
        }
    }
}

/// Aggregated outcome of a validation run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationMetrics {
    pub total_checks: usize,
    pub passed: usize,
    pub failed: usize,
    /// Failed results carrying warning severity
    pub warnings: usize,
    /// Percentage of passed checks, in `[0, 100]`
    pub overall_score: f64,
    pub results: Vec<ValidationResult>,
}

impl ValidationMetrics {
    fn add(&mut self, results: Vec<ValidationResult>) {
        for result in results {
            self.total_checks += 1;
            if result.passed {
                self.passed += 1;
            } else {
                self.failed += 1;
                if result.severity == Severity::Warning {
                    self.warnings += 1;
                }
            }
            self.results.push(result);
        }
    }

    fn finish(mut self) -> Self {
        self.overall_score = if self.total_checks > 0 {
            self.passed as f64 / self.total_checks as f64 * 100.0
        } else {
            0.0
        };
        self
    }
}

/// Validator over one context document
pub struct ContextValidator<'a> {
    context: &'a Map<String, Value>,
}

impl<'a> ContextValidator<'a> {
    pub fn new(context: &'a Map<String, Value>) -> Self {
        Self { context }
    }

    /// Run every check in order and compute the overall score
    pub fn validate(&self) -> ValidationMetrics {
        let mut metrics = ValidationMetrics::default();

        metrics.add(self.validate_organization());
        metrics.add(self.validate_token_limits());
        metrics.add(self.validate_relevance());
        metrics.add(self.validate_dependencies());
        metrics.add(self.validate_naming());
        metrics.add(self.validate_structures());

        let metrics = metrics.finish();
        info!(
            "Context validation: {}/{} checks passed",
            metrics.passed, metrics.total_checks
        );
        metrics
    }

    /// First value present under any of the given keys
    fn lookup(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter().find_map(|key| self.context.get(*key))
    }

    fn has_any(&self, keys: &[&str]) -> bool {
        self.lookup(keys).is_some()
    }

    fn validate_organization(&self) -> Vec<ValidationResult> {
        const CATEGORY: &str = "Organization";
        let mut results = Vec::new();

        if self.has_any(&["layers", "camadas"]) {
            results.push(ValidationResult::pass(CATEGORY, "Context has a layered structure"));
        } else {
            results.push(ValidationResult::fail(
                CATEGORY,
                Severity::Warning,
                "Context has no layered structure defined",
                "Consider layers: Working, Session, Project, Reference",
            ));
        }

        if self.has_any(&["responsibilities", "responsabilidades"]) {
            results.push(ValidationResult::pass(CATEGORY, "Responsibilities are defined"));
        } else {
            results.push(ValidationResult::fail(
                CATEGORY,
                Severity::Warning,
                "Separation of responsibilities is unclear",
                "Define the responsibilities of each component clearly",
            ));
        }

        results
    }

    /// Estimate tokens of the serialized document and classify the estimate
    pub fn estimated_tokens(&self) -> usize {
        let serialized = metrics::spaced_json(self.context).unwrap_or_default();
        metrics::estimate_tokens(&serialized)
    }

    fn validate_token_limits(&self) -> Vec<ValidationResult> {
        const CATEGORY: &str = "Tokens";
        let tokens = self.estimated_tokens();
        debug!("Estimated {} tokens", tokens);

        let mut results = vec![ValidationResult::pass(
            CATEGORY,
            format!("Estimated tokens: {}", tokens),
        )];

        results.push(match metrics::classify_tokens(tokens) {
            TokenUsage::OverProjectLimit => ValidationResult::fail(
                CATEGORY,
                Severity::Error,
                format!(
                    "Token usage is over the recommended limit ({})",
                    metrics::PROJECT_TOKEN_LIMIT
                ),
                "Consider compressing inactive context or archiving old information",
            ),
            TokenUsage::SessionLevel => ValidationResult {
                category: CATEGORY.to_string(),
                passed: true,
                message: "Token usage is above the session level".to_string(),
                suggestion: Some("Consider moving information to the project layer".to_string()),
                severity: Severity::Warning,
            },
            TokenUsage::WorkingLayer => {
                ValidationResult::pass(CATEGORY, "Token usage fits the working layer")
            }
            TokenUsage::WithinLimits => {
                ValidationResult::pass(CATEGORY, "Token usage is within recommended limits")
            }
        });

        results
    }

    fn validate_relevance(&self) -> Vec<ValidationResult> {
        const CATEGORY: &str = "Relevance";
        let mut results = Vec::new();

        match self.lookup(&["inactive_info", "informacoes_inativas"]) {
            Some(inactive) if len_of(inactive) > MAX_INACTIVE_ENTRIES => {
                results.push(ValidationResult::fail(
                    CATEGORY,
                    Severity::Warning,
                    format!("There are {} inactive entries in the context", len_of(inactive)),
                    "Consider archiving or removing information not used recently",
                ));
            }
            Some(_) => results.push(ValidationResult::pass(
                CATEGORY,
                "Amount of inactive information is under control",
            )),
            None => results.push(ValidationResult::pass(
                CATEGORY,
                "No inactive information detected",
            )),
        }

        if let Some(duplicates) = self.lookup(&["duplicates", "duplicatas"]) {
            let count = len_of(duplicates);
            if count > 0 {
                results.push(ValidationResult::fail(
                    CATEGORY,
                    Severity::Warning,
                    format!("Detected {} duplicates", count),
                    "Consider consolidating duplicated information",
                ));
            }
        }

        results
    }

    fn validate_dependencies(&self) -> Vec<ValidationResult> {
        const CATEGORY: &str = "Dependencies";
        let mut results = Vec::new();

        if let Some(cycles) = self.lookup(&["cyclic_dependencies", "dependencias_ciclicas"]) {
            let count = len_of(cycles);
            if count > 0 {
                results.push(ValidationResult::fail(
                    CATEGORY,
                    Severity::Error,
                    format!("Detected {} cyclic dependencies", count),
                    "Refactor to remove circular dependencies",
                ));
            } else {
                results.push(ValidationResult::pass(CATEGORY, "No cyclic dependencies detected"));
            }
        }

        if let Some(coupling) = self.lookup(&["coupling", "acoplamento"]) {
            match coupling.as_f64() {
                Some(value) if value > HIGH_COUPLING => results.push(ValidationResult::fail(
                    CATEGORY,
                    Severity::Warning,
                    format!("High coupling detected: {}%", coupling),
                    "Consider reducing coupling with abstractions and interfaces",
                )),
                Some(value) if value < LOW_COUPLING => results.push(ValidationResult::pass(
                    CATEGORY,
                    format!("Coupling is good: {}%", coupling),
                )),
                Some(_) => {}
                None => debug!("Ignoring non-numeric coupling value {}", coupling),
            }
        }

        results
    }

    fn validate_naming(&self) -> Vec<ValidationResult> {
        const CATEGORY: &str = "Naming";

        let problems: Vec<&str> = self
            .lookup(&["files", "arquivos"])
            .and_then(Value::as_array)
            .map(|files| {
                files
                    .iter()
                    .filter_map(|file| {
                        file.get("name")
                            .or_else(|| file.get("nome"))
                            .and_then(Value::as_str)
                    })
                    .filter(|name| !patterns::follows_naming_convention(name))
                    .collect()
            })
            .unwrap_or_default();

        if problems.is_empty() {
            vec![ValidationResult::pass(CATEGORY, "Naming conventions are followed")]
        } else {
            debug!("Files breaking naming conventions: {:?}", problems);
            vec![ValidationResult::fail(
                CATEGORY,
                Severity::Warning,
                format!("{} files with naming problems", problems.len()),
                "Follow conventions: PascalCase for components, camelCase for utilities",
            )]
        }
    }

    fn validate_structures(&self) -> Vec<ValidationResult> {
        const CATEGORY: &str = "Structures";
        let mut results = Vec::new();

        if let Some(large) = self.lookup(&["large_files", "arquivos_grandes"]) {
            let count = len_of(large);
            if count > 0 {
                results.push(ValidationResult::fail(
                    CATEGORY,
                    Severity::Warning,
                    format!("{} files above the recommended size", count),
                    "Consider splitting very large files",
                ));
            }
        }

        if let Some(long) = self.lookup(&["long_functions", "funcoes_longas"]) {
            let count = len_of(long);
            if count > 0 {
                results.push(ValidationResult::fail(
                    CATEGORY,
                    Severity::Warning,
                    format!("{} functions above the recommended size", count),
                    "Consider extracting smaller single-purpose functions",
                ));
            }
        }

        results
    }
}

/// Number of entries of a collection-like JSON value
fn len_of(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::String(s) => s.chars().count(),
        _ => 0,
    }
}

/// Parse a context document, which must be a JSON object
pub fn parse_context(text: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(text)? {
        Value::Object(map) => Ok(map),
        _ => Err(SkillError::ContextNotObject),
    }
}

/// Validate the context document stored at `path`
///
/// # Arguments
///
/// * `path` - Path to a JSON context document
///
/// # Returns
///
/// The validation metrics, or an error when the file is missing or not a
/// JSON object
pub fn validate_context_file(path: &Path) -> Result<ValidationMetrics> {
    let text = file_utils::read_required(path)?;
    let context = parse_context(&text)?;
    Ok(ContextValidator::new(&context).validate())
}

/// Context validated when no document is given
pub fn sample_context() -> Map<String, Value> {
    let value = json!({
        "layers": {
            "working": {"tokens": 100},
            "session": {"tokens": 500},
            "project": {"tokens": 1500}
        },
        "coupling": 45,
        "files": [
            {"name": "Button.tsx"},
            {"name": "UserCard.tsx"},
            {"name": "utils.ts"}
        ]
    });

    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
