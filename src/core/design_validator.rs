/// Web design guideline validator
///
/// Checks stylesheets, components and HTML documents for design-token usage,
/// spacing-grid alignment, `!important`, inline styles, accessibility
/// attributes and heading hierarchy.

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info};
use serde::Serialize;

use crate::config::DesignConfig;
use crate::core::models::Severity;
use crate::core::patterns::{self, HEX_COLOR, IMPORTANT, INLINE_STYLE, PX_VALUE};
use crate::error::{Result, SkillError};
use crate::utils::file_utils::{self, WebFileKind, WEB_EXTENSIONS};

/// A design issue found during validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignIssue {
    pub severity: Severity,
    pub category: String,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Issue counts per severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl SeverityCounts {
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }
}

/// Summary of a validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DesignSummary {
    pub total_issues: usize,
    pub by_severity: SeverityCounts,
    pub by_category: BTreeMap<String, usize>,
}

/// Validator collecting design issues across files
pub struct DesignValidator {
    config: DesignConfig,
    ignore_dirs: Vec<String>,
    verbose: bool,
    issues: Vec<DesignIssue>,
}

impl DesignValidator {
    /// Create a validator
    ///
    /// # Arguments
    ///
    /// * `config` - Design thresholds
    /// * `ignore_dirs` - Directory names skipped when validating a directory
    /// * `verbose` - Echo each issue to stderr as it is found
    pub fn new(config: DesignConfig, ignore_dirs: Vec<String>, verbose: bool) -> Self {
        Self {
            config,
            ignore_dirs,
            verbose,
            issues: Vec::new(),
        }
    }

    /// Validate a file or every web file below a directory
    pub fn validate_path(&mut self, target: &Path) -> Result<&[DesignIssue]> {
        if !target.exists() {
            return Err(SkillError::PathNotFound(target.to_path_buf()));
        }

        if target.is_file() {
            Ok(self.validate_file(target))
        } else {
            Ok(self.validate_directory(target))
        }
    }

    /// Validate a single file. Files that cannot be read are skipped.
    pub fn validate_file(&mut self, file_path: &Path) -> &[DesignIssue] {
        if let Some(kind) = WebFileKind::from_path(file_path) {
            if let Some(content) = file_utils::read_lossy(file_path) {
                debug!("Validating {}", file_path.display());
                self.validate_content(kind, &content, &file_path.display().to_string());
            }
        }

        &self.issues
    }

    /// Validate all web files in a directory
    pub fn validate_directory(&mut self, directory: &Path) -> &[DesignIssue] {
        info!("Validating design of {}", directory.display());

        let files: Vec<_> =
            file_utils::walk_files(directory, WEB_EXTENSIONS, &self.ignore_dirs).collect();
        for file_path in files {
            self.validate_file(&file_path);
        }

        &self.issues
    }

    /// Apply the checks matching `kind` to already-loaded content
    pub fn validate_content(&mut self, kind: WebFileKind, content: &str, file: &str) {
        match kind {
            WebFileKind::Stylesheet => self.validate_css(content, file),
            WebFileKind::Component => self.validate_component(content, file),
            WebFileKind::Markup => self.validate_html(content, file),
        }
    }

    fn validate_css(&mut self, content: &str, file: &str) {
        let hardcoded_colors = HEX_COLOR.find_iter(content).count();
        if hardcoded_colors > self.config.max_hardcoded_colors {
            self.add_issue(
                Severity::Warning,
                "Design Tokens",
                format!(
                    "Found {} hardcoded colors. Consider using design tokens.",
                    hardcoded_colors
                ),
                Some(file),
                None,
                Some("Define colors in a design system and reference them via CSS custom properties."),
            );
        }

        let base = self.config.base_unit;
        let misaligned = PX_VALUE
            .captures_iter(content)
            .filter_map(|cap| cap[1].parse::<u64>().ok())
            .filter(|px| base > 0 && px % u64::from(base) != 0)
            .count();
        if misaligned > 0 {
            let suggestion = format!(
                "Use multiples of {}px: {}, {}, {}, etc.",
                base,
                base,
                base * 2,
                base * 3
            );
            self.add_issue(
                Severity::Warning,
                "Spacing",
                format!(
                    "Found {} spacing values not aligned to {}px grid.",
                    misaligned, base
                ),
                Some(file),
                None,
                Some(&suggestion),
            );
        }

        let important = IMPORTANT.find_iter(content).count();
        if important > 0 {
            let line = IMPORTANT
                .find(content)
                .map(|m| patterns::line_of(content, m.start()));
            self.add_issue(
                Severity::Error,
                "CSS Best Practices",
                format!("Found {} uses of !important.", important),
                Some(file),
                line,
                Some("Avoid !important. Use specific selectors or CSS custom properties instead."),
            );
        }
    }

    fn validate_component(&mut self, content: &str, file: &str) {
        let inline_styles = INLINE_STYLE.find_iter(content).count();
        if inline_styles > self.config.max_inline_styles {
            self.add_issue(
                Severity::Warning,
                "Styling",
                format!(
                    "Found {} inline style blocks. Consider using CSS modules or styled components.",
                    inline_styles
                ),
                Some(file),
                None,
                Some("Move styles to external CSS modules or styled-components for better maintainability."),
            );
        }

        if content.contains("text=\"") || content.contains("text='") {
            self.add_issue(
                Severity::Info,
                "Internationalization",
                "Found hardcoded text strings.".to_string(),
                Some(file),
                None,
                Some("Consider using i18n for translations and text constants."),
            );
        }

        let lowered = content.to_lowercase();
        let interactive = lowered.contains("button") || lowered.contains("input");
        if interactive && !content.contains("aria-label") {
            self.add_issue(
                Severity::Warning,
                "Accessibility",
                "Interactive elements found without aria-label.".to_string(),
                Some(file),
                None,
                Some("Add aria-label to buttons and inputs for screen reader accessibility."),
            );
        }
    }

    fn validate_html(&mut self, content: &str, file: &str) {
        for (previous, skipped) in patterns::heading_skips(&patterns::headings(content)) {
            self.add_issue(
                Severity::Warning,
                "Semantic HTML",
                format!(
                    "Heading level skipped from h{} to h{}.",
                    previous.level, skipped.level
                ),
                Some(file),
                Some(skipped.line),
                Some("Use sequential heading levels (h1 → h2 → h3) for proper document outline."),
            );
        }

        let missing_alt = patterns::images_without_alt(content).len();
        if missing_alt > 0 {
            self.add_issue(
                Severity::Error,
                "Accessibility",
                format!("Found {} images without alt attribute.", missing_alt),
                Some(file),
                None,
                Some("Add alt attribute to all images for accessibility."),
            );
        }
    }

    fn add_issue(
        &mut self,
        severity: Severity,
        category: &str,
        message: String,
        file: Option<&str>,
        line: Option<usize>,
        suggestion: Option<&str>,
    ) {
        if self.verbose {
            eprintln!("[{}] {}: {}", severity.as_str().to_uppercase(), category, message);
            if let Some(suggestion) = suggestion {
                eprintln!("  💡 {}", suggestion);
            }
        }

        self.issues.push(DesignIssue {
            severity,
            category: category.to_string(),
            message,
            file: file.map(str::to_string),
            line,
            suggestion: suggestion.map(str::to_string),
        });
    }

    /// Issues found so far
    pub fn issues(&self) -> &[DesignIssue] {
        &self.issues
    }

    /// Whether any error-severity issue was found
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Summarize the issues by severity and category
    pub fn summary(&self) -> DesignSummary {
        summarize(&self.issues)
    }
}

/// Summarize a list of issues by severity and category
pub fn summarize(issues: &[DesignIssue]) -> DesignSummary {
    let mut summary = DesignSummary {
        total_issues: issues.len(),
        ..DesignSummary::default()
    };

    for issue in issues {
        match issue.severity {
            Severity::Error => summary.by_severity.error += 1,
            Severity::Warning => summary.by_severity.warning += 1,
            Severity::Info => summary.by_severity.info += 1,
        }
        *summary.by_category.entry(issue.category.clone()).or_insert(0) += 1;
    }

    summary
}
