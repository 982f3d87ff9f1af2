/// Output formatter for check results
///
/// This module renders every report as colored console text or pretty JSON.
/// Text and JSON forms of a report are built from the same structures so
/// their counts always agree.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use crate::core::accessibility::{A11yCheck, AccessibilityFinding, AccessibilityReport};
use crate::core::context_validator::ValidationMetrics;
use crate::core::creativity::CreativityReport;
use crate::core::design_validator::{DesignIssue, DesignSummary};
use crate::core::models::{AnalysisResult, Severity};
use crate::core::ux_audit::{UxAudit, CHECKLIST};

/// Report format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Serialize any report as pretty-printed JSON
pub fn to_json<T: Serialize + ?Sized>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report as JSON")
}

/// Format a context analysis for console output
///
/// # Arguments
///
/// * `result` - Analysis result
/// * `verbose` - Whether to list every issue of every project
///
/// # Returns
///
/// Formatted report
pub fn format_analysis_report(result: &AnalysisResult, verbose: bool) -> String {
    let mut out = String::new();
    let metrics = &result.global_metrics;

    out.push_str(&format!("{}\n", "=".repeat(70)));
    out.push_str(&format!("{}\n", "CONTEXT ANALYSIS REPORT".bold()));
    out.push_str(&format!("{}\n\n", "=".repeat(70)));

    out.push_str(&format!("{}\n", "📊 GLOBAL METRICS".yellow().bold()));
    out.push_str(&format!("{}\n", "-".repeat(40)));
    out.push_str(&format!("  Total files: {}\n", metrics.total_files));
    out.push_str(&format!("  Total lines: {}\n", metrics.total_lines));
    out.push_str(&format!("  Projects: {}\n", metrics.project_count));
    out.push_str(&format!("  Average complexity: {:.1}%\n", metrics.average_complexity));
    out.push_str(&format!("  Average coupling: {:.1}%\n", metrics.average_coupling));
    if !metrics.most_depended_modules.is_empty() {
        out.push_str("  Most depended-upon modules:\n");
        for usage in &metrics.most_depended_modules {
            out.push_str(&format!("    - {} ({} dependents)\n", usage.module, usage.dependents));
        }
    }
    out.push('\n');

    out.push_str(&format!("{}\n", "📁 PROJECT ANALYSIS".yellow().bold()));
    out.push_str(&format!("{}\n", "-".repeat(40)));

    for project in &result.projects {
        out.push_str(&format!("\n  📂 {}\n", project.name.cyan().bold()));
        out.push_str(&format!("     Files: {}\n", project.file_count));
        out.push_str(&format!("     Lines: {}\n", project.total_lines));
        out.push_str(&format!("     Complexity: {:.1}%\n", project.complexity));
        out.push_str(&format!("     Coupling: {:.1}%\n", project.coupling));

        if !project.suggestions.is_empty() {
            out.push_str("     💡 Suggestions:\n");
            for suggestion in &project.suggestions {
                out.push_str(&format!("        • {}\n", suggestion));
            }
        }

        if !project.issues.is_empty() {
            out.push_str(&format!("     ⚠️ Issues found: {}\n", project.issues.len()));
            if verbose {
                for issue in &project.issues {
                    out.push_str(&format!(
                        "        {} {}: {}\n",
                        issue.severity.symbol(),
                        issue.file,
                        issue.message
                    ));
                }
            }
        }
    }

    out.push_str(&format!("\n{}\n", "=".repeat(70)));
    out.push_str(&format!("{}\n", "💡 RECOMMENDATIONS".yellow().bold()));
    out.push_str(&format!("{}\n", "=".repeat(70)));

    if result.recommendations.is_empty() {
        out.push_str("  No critical recommendations at the moment.\n");
    } else {
        for recommendation in &result.recommendations {
            out.push_str(&format!("  • {}\n", recommendation));
        }
    }

    out.push_str(&format!("\n{}\n", "=".repeat(70)));
    out
}

/// Format context validation metrics for console output
pub fn format_validation_report(metrics: &ValidationMetrics) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "=".repeat(60)));
    out.push_str(&format!("{}\n", "CONTEXT VALIDATION REPORT".bold()));
    out.push_str(&format!("{}\n\n", "=".repeat(60)));
    out.push_str(&format!("Overall score: {:.1}%\n", metrics.overall_score));
    out.push_str(&format!("Total checks: {}\n", metrics.total_checks));
    out.push_str(&format!("Passed: {}\n", metrics.passed));
    out.push_str(&format!("Failed: {}\n", metrics.failed));
    out.push_str(&format!("Warnings: {}\n\n", metrics.warnings));
    out.push_str(&format!("{}\n", "-".repeat(60)));
    out.push_str(&format!("{}\n", "DETAILS BY CATEGORY".yellow().bold()));
    out.push_str(&format!("{}\n", "-".repeat(60)));

    // Categories in first-seen order
    let mut categories: Vec<&str> = Vec::new();
    for result in &metrics.results {
        if !categories.contains(&result.category.as_str()) {
            categories.push(&result.category);
        }
    }

    for category in categories {
        out.push_str(&format!("\n{}:\n", category.cyan().bold()));
        for result in metrics.results.iter().filter(|r| r.category == category) {
            let status = if result.passed { "✅" } else { "❌" };
            out.push_str(&format!(
                "  {} [{}] {}\n",
                status,
                result.severity.as_str().to_uppercase(),
                result.message
            ));
            if let Some(suggestion) = &result.suggestion {
                out.push_str(&format!("     💡 Suggestion: {}\n", suggestion));
            }
        }
    }

    out.push_str(&format!("\n{}\n", "=".repeat(60)));
    out
}

#[derive(Serialize)]
struct DesignReport<'a> {
    issues: &'a [DesignIssue],
    summary: &'a DesignSummary,
}

/// Render the design validation report as JSON
pub fn design_report_json(issues: &[DesignIssue], summary: &DesignSummary) -> Result<String> {
    to_json(&DesignReport { issues, summary })
}

/// Format design issues grouped by severity for console output
pub fn format_design_report(issues: &[DesignIssue], summary: &DesignSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "=".repeat(60)));
    out.push_str(&format!("{}\n", "WEB DESIGN GUIDELINES VALIDATION REPORT".bold()));
    out.push_str(&format!("{}\n\n", "=".repeat(60)));

    if issues.is_empty() {
        out.push_str(&format!("{}\n", "✅ No design issues found!".green()));
        return out;
    }

    out.push_str(&format!("Total issues: {}\n", summary.total_issues));
    out.push_str(&format!("  ❌ Errors: {}\n", summary.by_severity.error));
    out.push_str(&format!("  ⚠️  Warnings: {}\n", summary.by_severity.warning));
    out.push_str(&format!("  ℹ️  Info: {}\n\n", summary.by_severity.info));

    for severity in Severity::ALL {
        let group: Vec<_> = issues.iter().filter(|i| i.severity == severity).collect();
        if group.is_empty() {
            continue;
        }

        let heading = format!(
            "{} {}S ({})",
            severity.symbol(),
            severity.as_str().to_uppercase(),
            group.len()
        );
        out.push_str(&format!("{}\n", heading.yellow().bold()));
        out.push_str(&format!("{}\n", "-".repeat(40)));

        for issue in group {
            out.push_str(&format!("  [{}] {}\n", issue.category.cyan(), issue.message));
            if let Some(suggestion) = &issue.suggestion {
                out.push_str(&format!("     💡 {}\n", suggestion));
            }
            match (&issue.file, issue.line) {
                (Some(file), Some(line)) => out.push_str(&format!("     📁 {}:{}\n", file, line)),
                (Some(file), None) => out.push_str(&format!("     📁 {}\n", file)),
                _ => {}
            }
        }
        out.push('\n');
    }

    out.push_str(&format!("{}\n", "=".repeat(60)));
    out.push_str("To fix issues, refer to the web design guidelines.\n");
    out.push_str(&format!("{}\n", "=".repeat(60)));
    out
}

#[derive(Serialize)]
struct AccessibilitySummary {
    total_findings: usize,
    by_check: BTreeMap<A11yCheck, usize>,
}

#[derive(Serialize)]
struct AccessibilityJson<'a> {
    files_analyzed: usize,
    findings: &'a [AccessibilityFinding],
    summary: AccessibilitySummary,
}

/// Render the accessibility report as JSON
pub fn accessibility_report_json(report: &AccessibilityReport) -> Result<String> {
    to_json(&AccessibilityJson {
        files_analyzed: report.files_analyzed,
        findings: &report.findings,
        summary: AccessibilitySummary {
            total_findings: report.findings.len(),
            by_check: report.counts(),
        },
    })
}

/// Format the accessibility report for console output
///
/// # Arguments
///
/// * `report` - Accessibility findings
/// * `target` - Path that was checked, shown in the header
pub fn format_accessibility_report(report: &AccessibilityReport, target: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("Running accessibility check for: {}\n", target));
    out.push_str(&format!("{}\n", "=".repeat(60)));
    out.push_str(&format!("\nAnalyzing {} files...\n", report.files_analyzed));

    for (index, check) in A11yCheck::ALL.iter().enumerate() {
        out.push_str(&format!(
            "\n{}\n",
            format!("[{}] {}", index + 1, check.title()).yellow().bold()
        ));

        let mut any = false;
        for finding in report.findings_for(*check) {
            out.push_str(&format!("   ⚠️  {}\n", finding.message));
            any = true;
        }

        if *check == A11yCheck::ColorContrast {
            out.push_str("   - WCAG AA: 4.5:1 for normal text, 3:1 for large text\n");
        } else if !any {
            out.push_str("   ✅ No issues found\n");
        }
    }

    out.push_str(&format!("\n{}\n", "[6] WCAG Quick Reference".yellow().bold()));
    out.push_str("   Level A (Minimum):\n");
    out.push_str("   - [ ] All images have alt text\n");
    out.push_str("   - [ ] Form inputs have labels\n");
    out.push_str("   - [ ] Buttons/links have accessible names\n");
    out.push_str("   - [ ] Page has language attribute\n\n");
    out.push_str("   Level AA (Recommended):\n");
    out.push_str("   - [ ] Color contrast 4.5:1 (normal text)\n");
    out.push_str("   - [ ] Color contrast 3:1 (large text)\n");
    out.push_str("   - [ ] Focus visible on all interactive elements\n");
    out.push_str("   - [ ] Resize text up to 200%\n");

    out.push_str(&format!("\n{}\n", "=".repeat(60)));
    out.push_str(&format!("Total findings: {}\n", report.findings.len()));
    out.push_str("Accessibility check complete.\n");
    out.push_str("For automated testing: Use axe DevTools, Lighthouse, or pa11y\n");
    out
}

/// Format the UX audit for console output
pub fn format_ux_audit(audit: &UxAudit) -> String {
    let mut out = String::new();

    out.push_str(&format!("Running UX audit for: {}\n", audit.path.display()));
    out.push_str(&format!("{}\n", "=".repeat(60)));
    out.push_str(&format!("\nFound {} CSS/SCSS files\n", audit.css_files));
    out.push_str(&format!("Found {} component files\n", audit.component_files));

    if !audit.contrast_warnings.is_empty() {
        out.push('\n');
        for warning in &audit.contrast_warnings {
            out.push_str(&format!("⚠️  {}\n", warning));
        }
    }

    for (index, section) in CHECKLIST.iter().enumerate() {
        out.push_str(&format!(
            "\n{}\n",
            format!("[{}] {}", index + 1, section.title).yellow().bold()
        ));
        for item in section.items {
            out.push_str(&format!("    - {}\n", item));
        }
    }

    out.push_str(&format!("\n{}\n", "=".repeat(60)));
    out.push_str("Audit complete. Review results above.\n");
    out
}

/// Format a creativity evaluation for console output
pub fn format_creativity_report(report: &CreativityReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("Analyzing: {}\n", report.file));
    out.push_str(&format!("\n{}\n", "Patterns Found:".yellow().bold()));
    if report.patterns.is_empty() {
        out.push_str("\n  None\n");
    }
    for (category, occurrences) in report.patterns.categories() {
        if occurrences.is_empty() {
            continue;
        }
        out.push_str(&format!("\n  {}:\n", category.cyan()));
        for occurrence in occurrences {
            out.push_str(&format!("    - {}\n", occurrence));
        }
    }

    out.push_str(&format!("\n{}\n", "Creative Suggestions:".yellow().bold()));
    for (index, suggestion) in report.suggestions.iter().enumerate() {
        out.push_str(&format!("\n  {}. {}\n", index + 1, suggestion));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::creativity;
    use crate::core::design_validator::summarize;
    use crate::core::models::{GlobalMetrics, ProjectAnalysis};
    use serde_json::Value;
    use std::path::PathBuf;

    fn issue(severity: Severity, category: &str, message: &str) -> DesignIssue {
        DesignIssue {
            severity,
            category: category.to_string(),
            message: message.to_string(),
            file: Some("a.css".to_string()),
            line: Some(3),
            suggestion: None,
        }
    }

    #[test]
    fn test_design_text_and_json_agree() {
        colored::control::set_override(false);
        let issues = vec![
            issue(Severity::Error, "CSS Best Practices", "Found 2 uses of !important."),
            issue(Severity::Warning, "Spacing", "Found 1 spacing values not following 8px grid."),
            issue(Severity::Warning, "Design Tokens", "Found 12 hardcoded colors."),
        ];
        let summary = summarize(&issues);

        let text = format_design_report(&issues, &summary);
        assert!(text.contains("Total issues: 3\n"));
        assert!(text.contains("  ❌ Errors: 1\n"));
        assert!(text.contains("  ⚠️  Warnings: 2\n"));
        assert!(text.contains("❌ ERRORS (1)"));
        assert!(text.contains("     📁 a.css:3\n"));

        let json: Value = serde_json::from_str(&design_report_json(&issues, &summary).unwrap()).unwrap();
        assert_eq!(json["issues"].as_array().unwrap().len(), 3);
        assert_eq!(json["summary"]["total_issues"], 3);
        assert_eq!(json["summary"]["by_severity"]["error"], 1);
        assert_eq!(json["summary"]["by_severity"]["warning"], 2);
        assert_eq!(json["issues"][0]["severity"], "error");
    }

    #[test]
    fn test_empty_design_report() {
        colored::control::set_override(false);
        let text = format_design_report(&[], &DesignSummary::default());
        assert!(text.contains("✅ No design issues found!"));
        assert!(!text.contains("Total issues"));
    }

    #[test]
    fn test_analysis_report_lines() {
        colored::control::set_override(false);
        let mut project = ProjectAnalysis::new("web", PathBuf::from("/tmp/web"));
        project.file_count = 4;
        project.total_lines = 120;
        let result = AnalysisResult {
            projects: vec![project],
            global_metrics: GlobalMetrics {
                total_files: 4,
                total_lines: 120,
                project_count: 1,
                average_complexity: 42.5,
                average_coupling: 0.0,
                most_depended_modules: Vec::new(),
            },
            recommendations: Vec::new(),
        };

        let text = format_analysis_report(&result, false);
        assert!(text.contains("  Total files: 4\n"));
        assert!(text.contains("  Total lines: 120\n"));
        assert!(text.contains("  Average complexity: 42.5%\n"));
        assert!(text.contains("📂 web"));
        assert!(text.contains("No critical recommendations"));
    }

    #[test]
    fn test_accessibility_json_summary() {
        let report = AccessibilityReport {
            files_analyzed: 2,
            findings: vec![AccessibilityFinding {
                check: A11yCheck::ImageAlt,
                file: "index.html".to_string(),
                message: "Image without alt attribute: index.html".to_string(),
            }],
        };
        let json: Value = serde_json::from_str(&accessibility_report_json(&report).unwrap()).unwrap();
        assert_eq!(json["files_analyzed"], 2);
        assert_eq!(json["summary"]["total_findings"], 1);
        assert_eq!(json["summary"]["by_check"]["image-alt"], 1);
        assert_eq!(json["summary"]["by_check"]["focus-states"], 0);
        assert_eq!(json["findings"][0]["check"], "image-alt");
    }

    #[test]
    fn test_creativity_text() {
        colored::control::set_override(false);
        let code = "let value = compute(a, b);\nlet value = compute(a, b);\n";
        let text = format_creativity_report(&creativity::evaluate("a.js", code));
        assert!(text.starts_with("Analyzing: a.js\n"));
        assert!(text.contains("  repetitive_code:\n    - Similar line at 2"));
        assert!(text.contains("  1. Extract repeated logic"));
    }
}
