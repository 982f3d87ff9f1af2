/// Accessibility checker
///
/// WCAG-style heuristics over markup, components and stylesheets: image alt
/// text, button labels, inline colors, removed focus outlines and heading
/// order.

use std::collections::BTreeMap;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::core::patterns;
use crate::utils::file_utils::{self, A11Y_EXTENSIONS};

/// Extensions whose `<img>` tags are checked for alt text
const MARKUP_EXTENSIONS: &[&str] = &["html", "tsx", "jsx", "vue"];

/// The individual accessibility checks, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum A11yCheck {
    ImageAlt,
    AriaLabels,
    ColorContrast,
    FocusStates,
    HeadingHierarchy,
}

impl A11yCheck {
    pub const ALL: [A11yCheck; 5] = [
        A11yCheck::ImageAlt,
        A11yCheck::AriaLabels,
        A11yCheck::ColorContrast,
        A11yCheck::FocusStates,
        A11yCheck::HeadingHierarchy,
    ];

    /// Heading shown in the text report
    pub fn title(&self) -> &'static str {
        match self {
            A11yCheck::ImageAlt => "Image Alt Text Check",
            A11yCheck::AriaLabels => "ARIA Labels Check",
            A11yCheck::ColorContrast => "Color Contrast Check",
            A11yCheck::FocusStates => "Focus States Check",
            A11yCheck::HeadingHierarchy => "Heading Hierarchy Check",
        }
    }
}

/// One accessibility finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessibilityFinding {
    pub check: A11yCheck,
    pub file: String,
    pub message: String,
}

/// Result of an accessibility run
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccessibilityReport {
    pub files_analyzed: usize,
    pub findings: Vec<AccessibilityFinding>,
}

impl AccessibilityReport {
    /// Findings of one check
    pub fn findings_for(&self, check: A11yCheck) -> impl Iterator<Item = &AccessibilityFinding> {
        self.findings.iter().filter(move |f| f.check == check)
    }

    /// Finding count per check, every check present
    pub fn counts(&self) -> BTreeMap<A11yCheck, usize> {
        let mut counts: BTreeMap<A11yCheck, usize> =
            A11yCheck::ALL.iter().map(|check| (*check, 0)).collect();
        for finding in &self.findings {
            *counts.entry(finding.check).or_insert(0) += 1;
        }
        counts
    }
}

/// Run every check over one file's content
///
/// # Arguments
///
/// * `path` - File path; its extension decides whether image alt text is checked
/// * `content` - Text of the file
///
/// # Returns
///
/// Findings in check order
pub fn check_content(path: &Path, content: &str) -> Vec<AccessibilityFinding> {
    let file = path.display().to_string();
    let mut findings = Vec::new();
    let mut push = |check: A11yCheck, message: String| {
        findings.push(AccessibilityFinding {
            check,
            file: file.clone(),
            message,
        })
    };

    if file_utils::has_extension(path, MARKUP_EXTENSIONS) {
        for _ in patterns::images_without_alt(content) {
            push(A11yCheck::ImageAlt, format!("Image without alt attribute: {}", file));
        }
    }

    for _ in 0..patterns::unlabeled_buttons(content) {
        push(A11yCheck::AriaLabels, format!("Button without accessible label: {}", file));
    }

    if content.contains("color:") && content.contains("background") {
        push(
            A11yCheck::ColorContrast,
            format!("Inline colors detected - verify contrast: {}", file),
        );
    }

    let removes_outline = content.contains("outline: none") || content.contains("outline: 0");
    if removes_outline && !content.contains(":focus") {
        push(
            A11yCheck::FocusStates,
            format!("Removed outline without alternative focus state: {}", file),
        );
    }

    for (previous, skipped) in patterns::heading_skips(&patterns::headings(content)) {
        push(
            A11yCheck::HeadingHierarchy,
            format!(
                "Heading skip from h{} to h{}: {}",
                previous.level, skipped.level, file
            ),
        );
    }

    findings
}

/// Run the full accessibility check over a file or directory
pub fn run_accessibility_check(target: &Path, ignore_dirs: &[String]) -> AccessibilityReport {
    info!("Running accessibility check for {}", target.display());

    let files: Vec<_> = if target.is_file() {
        vec![target.to_path_buf()]
    } else {
        file_utils::walk_files(target, A11Y_EXTENSIONS, ignore_dirs).collect()
    };

    let mut report = AccessibilityReport::default();
    for path in files {
        report.files_analyzed += 1;
        if let Some(content) = file_utils::read_lossy(&path) {
            report.findings.extend(check_content(&path, &content));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_checks() {
        let html = r#"<h1>Title</h1>
<h3>Sub</h3>
<img src="logo.png">
<button></button>
<button>Send</button>"#;
        let findings = check_content(Path::new("index.html"), html);
        let checks: Vec<_> = findings.iter().map(|f| f.check).collect();
        assert_eq!(
            checks,
            vec![A11yCheck::ImageAlt, A11yCheck::AriaLabels, A11yCheck::HeadingHierarchy]
        );
        assert_eq!(findings[2].message, "Heading skip from h1 to h3: index.html");
    }

    #[test]
    fn test_self_closing_jsx_buttons() {
        let jsx = r#"<Toolbar>
  <button aria-label="Close" onClick={close} />
  <button onClick={open} />
</Toolbar>"#;
        let findings = check_content(Path::new("Toolbar.jsx"), jsx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].check, A11yCheck::AriaLabels);
        assert_eq!(findings[0].message, "Button without accessible label: Toolbar.jsx");
    }

    #[test]
    fn test_css_is_not_checked_for_images() {
        let css = r#".logo { background: url("<img src=x>"); color: #333; }
button:hover { outline: none; }"#;
        let findings = check_content(Path::new("site.css"), css);
        let checks: Vec<_> = findings.iter().map(|f| f.check).collect();
        assert_eq!(checks, vec![A11yCheck::ColorContrast, A11yCheck::FocusStates]);
    }

    #[test]
    fn test_focus_replacement_is_accepted() {
        let css = "a { outline: none; }\na:focus-visible { box-shadow: 0 0 0 2px blue; }";
        assert!(check_content(Path::new("a.css"), css).is_empty());
    }

    #[test]
    fn test_report_counts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.html"), "<img src=a><img src=b alt=b>").unwrap();
        std::fs::write(dir.path().join("b.vue"), "<template><h2>x</h2><h5>y</h5></template>").unwrap();
        std::fs::write(dir.path().join("notes.md"), "<img src=c>").unwrap();

        let report = run_accessibility_check(dir.path(), &[]);
        assert_eq!(report.files_analyzed, 2);
        let counts = report.counts();
        assert_eq!(counts[&A11yCheck::ImageAlt], 1);
        assert_eq!(counts[&A11yCheck::HeadingHierarchy], 1);
        assert_eq!(counts[&A11yCheck::FocusStates], 0);
        assert_eq!(report.findings_for(A11yCheck::ImageAlt).count(), 1);
    }
}
