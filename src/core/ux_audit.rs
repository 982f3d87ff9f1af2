/// UX audit
///
/// Inventories stylesheets and components and pairs the inventory with a
/// fixed checklist of UX principles to review by hand.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::core::patterns::WHITE_COLOR;
use crate::utils::file_utils::{self, COMPONENT_EXTENSIONS, STYLE_EXTENSIONS};

/// One checklist section of the audit report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistSection {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

/// Manual review checklist, printed in this order
pub const CHECKLIST: &[ChecklistSection] = &[
    ChecklistSection {
        title: "Color Contrast Check",
        items: &[
            "Run manually: https://contrast-checker.com",
            "WCAG AA: 4.5:1 for normal text, 3:1 for large text",
        ],
    },
    ChecklistSection {
        title: "Visual Hierarchy Check",
        items: &[
            "Verify heading levels (H1 > H2 > H3)",
            "Check font size progression",
        ],
    },
    ChecklistSection {
        title: "Interactive States Check",
        items: &[
            "Hover, Focus, Active, Disabled states",
            "A11y: Keyboard navigation works?",
        ],
    },
    ChecklistSection {
        title: "Touch Target Check",
        items: &[
            "Minimum 44x44px for touch targets",
            "Spacing between clickable elements",
        ],
    },
    ChecklistSection {
        title: "Cognitive Load Check",
        items: &[
            "Chunked content (5-7 items per section)",
            "Progressive disclosure for complex forms",
        ],
    },
];

/// Result of a UX audit
#[derive(Debug, Clone, Default)]
pub struct UxAudit {
    pub path: PathBuf,
    pub css_files: usize,
    pub component_files: usize,
    pub contrast_warnings: Vec<String>,
}

/// Flag white colors in a stylesheet as possible contrast issues
pub fn check_contrast_colors(content: &str) -> Vec<String> {
    WHITE_COLOR
        .find_iter(content)
        .map(|m| {
            format!(
                "Light color {} may have contrast issues on white backgrounds",
                m.as_str()
            )
        })
        .collect()
}

/// Run the UX audit over a project directory
pub fn run_audit(project_path: &Path, ignore_dirs: &[String]) -> UxAudit {
    info!("Running UX audit for {}", project_path.display());

    let mut audit = UxAudit {
        path: project_path.to_path_buf(),
        ..UxAudit::default()
    };

    for path in file_utils::walk_files(project_path, STYLE_EXTENSIONS, ignore_dirs) {
        audit.css_files += 1;
        let Some(content) = file_utils::read_lossy(&path) else {
            continue;
        };
        let warnings = check_contrast_colors(&content);
        debug!("{}: {} light colors", path.display(), warnings.len());
        audit.contrast_warnings.extend(
            warnings
                .into_iter()
                .map(|warning| format!("{} ({})", warning, path.display())),
        );
    }

    audit.component_files =
        file_utils::walk_files(project_path, COMPONENT_EXTENSIONS, ignore_dirs).count();

    audit
}
