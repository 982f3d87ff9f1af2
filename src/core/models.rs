/// Data models shared by the checks
///
/// Everything here is built during a single run and read by the reporters;
/// nothing is persisted.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Every severity, most severe first
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Status marker used by the text reports
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Error => "❌",
            Severity::Warning => "⚠️",
            Severity::Info => "ℹ️",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of structural issue raised by the context analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    OversizedFile,
    InconsistentIndentation,
    LongLines,
}

/// A structural issue found in one source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub file: String,
    pub message: String,
    pub severity: Severity,
}

/// Analysis of one project directory
#[derive(Debug, Clone, Serialize)]
pub struct ProjectAnalysis {
    pub name: String,
    pub path: PathBuf,
    pub file_count: usize,
    pub total_lines: usize,
    /// Heuristic complexity score in `[0, 100]`
    pub complexity: f64,
    /// Heuristic coupling score in `[0, 100]`
    pub coupling: f64,
    pub issues: Vec<Issue>,
    pub suggestions: Vec<String>,
}

impl ProjectAnalysis {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            file_count: 0,
            total_lines: 0,
            complexity: 0.0,
            coupling: 0.0,
            issues: Vec::new(),
            suggestions: Vec::new(),
        }
    }
}

/// How many files import a given module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleUsage {
    pub module: String,
    pub dependents: usize,
}

/// Metrics across every analyzed project
#[derive(Debug, Clone, Serialize)]
pub struct GlobalMetrics {
    pub total_files: usize,
    pub total_lines: usize,
    pub project_count: usize,
    pub average_complexity: f64,
    pub average_coupling: f64,
    pub most_depended_modules: Vec<ModuleUsage>,
}

/// Full result of a context analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub projects: Vec<ProjectAnalysis>,
    pub global_metrics: GlobalMetrics,
    pub recommendations: Vec<String>,
}
