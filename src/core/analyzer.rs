/// Core context analyzer implementation
///
/// This file contains the `ContextAnalyzer`, which discovers projects below a
/// root directory, scans their source files, and turns the findings into
/// complexity, coupling and organization metrics.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use crate::config::ContextConfig;
use crate::core::metrics::{self, Layout, Organization};
use crate::core::models::{
    AnalysisResult, GlobalMetrics, Issue, IssueKind, ModuleUsage, ProjectAnalysis, Severity,
};
use crate::core::patterns;
use crate::utils::file_utils::{self, CODE_EXTENSIONS};

/// Files or directories whose presence marks a directory as a project
const PROJECT_MARKERS: &[&str] = &[
    "package.json",
    "requirements.txt",
    "pyproject.toml",
    "go.mod",
    "Cargo.toml",
    "pom.xml",
    "build.gradle",
    "src",
    ".git",
];

/// Root files that mark a single-entry-point layout
const ENTRY_POINTS: &[&str] = &["index.ts", "index.js", "main.py"];

/// Directory names typical of a layout split by concern
const DISTRIBUTED_DIRS: &[&str] = &["services", "components", "utils", "hooks"];

/// A module with more dependents than this gets a recommendation
const HUB_MODULE_THRESHOLD: usize = 10;

/// Imports seen per file, threaded through each scan step
///
/// Every scan takes the accumulator by value and hands it back, so the scan
/// itself stays a pure function of its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyAccumulator {
    imports: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the modules imported by one file
    pub fn record<I>(mut self, file: &str, modules: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut modules = modules.into_iter().peekable();
        if modules.peek().is_some() {
            self.imports.entry(file.to_string()).or_default().extend(modules);
        }
        self
    }

    /// Fold another accumulator into this one
    pub fn merge(mut self, other: DependencyAccumulator) -> Self {
        for (file, modules) in other.imports {
            self.imports.entry(file).or_default().extend(modules);
        }
        self
    }

    /// Number of distinct (file, module) import edges
    pub fn edge_count(&self) -> usize {
        self.imports.values().map(BTreeSet::len).sum()
    }

    /// Number of files that import anything
    pub fn file_count(&self) -> usize {
        self.imports.len()
    }

    /// Modules imported by a file
    pub fn imports_of(&self, file: &str) -> Option<&BTreeSet<String>> {
        self.imports.get(file)
    }

    /// Top-level modules ranked by how many files import them
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of modules returned
    ///
    /// # Returns
    ///
    /// Modules sorted by dependents (descending), then name
    pub fn most_depended(&self, limit: usize) -> Vec<ModuleUsage> {
        let mut counts: HashMap<String, usize> = HashMap::new();

        for modules in self.imports.values() {
            let roots: BTreeSet<&str> = modules.iter().map(|m| root_module(m)).collect();
            for root in roots {
                *counts.entry(root.to_string()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<ModuleUsage> = counts
            .into_iter()
            .map(|(module, dependents)| ModuleUsage { module, dependents })
            .collect();
        ranked.sort_by(|a, b| b.dependents.cmp(&a.dependents).then_with(|| a.module.cmp(&b.module)));
        ranked.truncate(limit);
        ranked
    }
}

/// Reduce an import path to the module it belongs to.
///
/// Relative paths are kept whole; `@scope/pkg/x` becomes `@scope/pkg`;
/// anything else is cut at the first `.` or `/`.
pub fn root_module(module: &str) -> &str {
    if module.starts_with('.') || module.starts_with('/') {
        return module;
    }
    if module.starts_with('@') {
        return match module.match_indices('/').nth(1) {
            Some((idx, _)) => &module[..idx],
            None => module,
        };
    }
    module.split(['.', '/']).next().unwrap_or(module)
}

/// Findings of a single source file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileScan {
    pub lines: usize,
    pub definitions: usize,
    pub issues: Vec<Issue>,
}

/// Scan one source file.
///
/// Applies every structural check independently, extracts imports and
/// definitions with the dialect matching the file's extension, and records
/// the imports in the accumulator it returns.
///
/// # Arguments
///
/// * `path` - Path of the file, used for dialect selection and reporting
/// * `content` - Text of the file
/// * `config` - Thresholds
/// * `deps` - Accumulator carrying the imports seen so far
///
/// # Returns
///
/// The file's findings and the updated accumulator
pub fn scan_source(
    path: &Path,
    content: &str,
    config: &ContextConfig,
    deps: DependencyAccumulator,
) -> (FileScan, DependencyAccumulator) {
    let file = path.display().to_string();
    let lines = file_utils::count_lines(content);

    let mut issues = Vec::new();
    issues.extend(check_file_size(&file, lines, config.max_file_lines));
    issues.extend(check_indentation(&file, content));
    issues.extend(check_long_lines(&file, content, config));

    let (definitions, deps) = match patterns::dialect_for(path) {
        Some(dialect) => {
            let deps = deps.record(&file, dialect.imports(content));
            (dialect.definitions(content).len(), deps)
        }
        None => (0, deps),
    };

    (
        FileScan {
            lines,
            definitions,
            issues,
        },
        deps,
    )
}

fn check_file_size(file: &str, lines: usize, max_lines: usize) -> Option<Issue> {
    (lines > max_lines).then(|| Issue {
        kind: IssueKind::OversizedFile,
        file: file.to_string(),
        message: format!("File has {} lines (maximum: {})", lines, max_lines),
        severity: Severity::Warning,
    })
}

/// Whether the text mixes space- and tab-indented lines
pub fn has_mixed_indentation(content: &str) -> bool {
    let mut spaces = false;
    let mut tabs = false;

    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        if line.starts_with(' ') {
            spaces = true;
        } else if line.starts_with('\t') {
            tabs = true;
        }
        if spaces && tabs {
            return true;
        }
    }

    false
}

fn check_indentation(file: &str, content: &str) -> Option<Issue> {
    has_mixed_indentation(content).then(|| Issue {
        kind: IssueKind::InconsistentIndentation,
        file: file.to_string(),
        message: "Inconsistent indentation detected".to_string(),
        severity: Severity::Info,
    })
}

fn check_long_lines(file: &str, content: &str, config: &ContextConfig) -> Option<Issue> {
    let long_lines = content
        .lines()
        .filter(|line| line.chars().count() > config.max_line_length)
        .count();

    (long_lines > config.max_long_lines).then(|| Issue {
        kind: IssueKind::LongLines,
        file: file.to_string(),
        message: format!(
            "{} lines exceed {} characters",
            long_lines, config.max_line_length
        ),
        severity: Severity::Info,
    })
}

/// Architectural layout detected at the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchitecturePattern {
    /// Few directories around a single entry point
    Mono,
    /// Code split into concern directories
    Distributed,
}

/// Analyzer for a project tree
pub struct ContextAnalyzer {
    /// Directory being analyzed
    root: PathBuf,

    /// Thresholds and walk settings
    config: ContextConfig,
}

impl ContextAnalyzer {
    /// Create a new ContextAnalyzer instance
    ///
    /// # Arguments
    ///
    /// * `root` - Directory to analyze
    /// * `config` - Thresholds and walk settings
    pub fn new(root: impl Into<PathBuf>, config: ContextConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Run the complete analysis
    pub fn analyze(&self) -> AnalysisResult {
        info!("Analyzing context of {}", self.root.display());

        let mut projects = self.discover_projects();
        let mut all_deps = DependencyAccumulator::new();

        for project in &mut projects {
            let deps = self.analyze_project(project);
            all_deps = all_deps.merge(deps);
        }

        let global_metrics = global_metrics(&projects, &all_deps);
        let recommendations = self.recommendations(&all_deps);

        AnalysisResult {
            projects,
            global_metrics,
            recommendations,
        }
    }

    /// Find the projects below the root.
    ///
    /// The root is a single project when it contains any source file;
    /// otherwise each child directory that looks like a project is one.
    pub fn discover_projects(&self) -> Vec<ProjectAnalysis> {
        let ignore = &self.config.ignore_dirs;

        if file_utils::walk_files(&self.root, CODE_EXTENSIONS, ignore)
            .next()
            .is_some()
        {
            return vec![ProjectAnalysis::new(display_name(&self.root), &self.root)];
        }

        let mut children: Vec<PathBuf> = match fs::read_dir(&self.root) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.is_dir() && !is_ignored_dir(p, ignore))
                .collect(),
            Err(e) => {
                debug!("Cannot list {}: {}", self.root.display(), e);
                Vec::new()
            }
        };
        children.sort();

        children
            .into_iter()
            .filter(|dir| self.has_project_structure(dir))
            .map(|dir| ProjectAnalysis::new(display_name(&dir), dir))
            .collect()
    }

    fn has_project_structure(&self, dir: &Path) -> bool {
        if PROJECT_MARKERS.iter().any(|marker| dir.join(marker).exists()) {
            return true;
        }

        file_utils::walk_entries(dir, &self.config.ignore_dirs)
            .take(10)
            .any(|entry| {
                entry.file_type().is_file() && file_utils::has_extension(entry.path(), CODE_EXTENSIONS)
            })
    }

    /// Scan every source file of a project and fill in its metrics
    ///
    /// # Returns
    ///
    /// The project's import accumulator
    fn analyze_project(&self, project: &mut ProjectAnalysis) -> DependencyAccumulator {
        info!("Analyzing project: {}", project.name);

        let mut deps = DependencyAccumulator::new();
        let mut definitions = 0;

        for path in file_utils::walk_files(&project.path, CODE_EXTENSIONS, &self.config.ignore_dirs) {
            project.file_count += 1;

            let Some(content) = file_utils::read_lossy(&path) else {
                continue;
            };
            debug!("Scanning {}", path.display());

            let (scan, next) = scan_source(&path, &content, &self.config, deps);
            deps = next;

            project.total_lines += scan.lines;
            project.issues.extend(scan.issues);
            definitions += scan.definitions;
        }

        project.complexity =
            metrics::complexity_score(project.file_count, project.total_lines, definitions);
        project.coupling = metrics::coupling_score(project.file_count, deps.edge_count());
        project.suggestions = self.project_suggestions(project);

        deps
    }

    fn project_suggestions(&self, project: &ProjectAnalysis) -> Vec<String> {
        let mut suggestions = Vec::new();

        if project.coupling > 50.0 {
            suggestions.push(format!(
                "⚠️ High coupling ({:.1}%). Consider using abstractions and interfaces.",
                project.coupling
            ));
        }

        if project.complexity > 70.0 {
            suggestions.push(format!(
                "📊 High complexity ({:.1}). Review the project architecture.",
                project.complexity
            ));
        }

        if project.total_lines > 0 {
            let average = project.total_lines as f64 / project.file_count.max(1) as f64;
            if average > self.config.max_file_lines as f64 {
                suggestions.push(format!(
                    "📏 High average file size ({:.0} lines). Consider splitting into smaller modules.",
                    average
                ));
            }
        }

        let oversized: Vec<&str> = project
            .issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::OversizedFile)
            .map(|issue| issue.file.as_str())
            .collect();
        if !oversized.is_empty() {
            suggestions.push(format!(
                "📄 {} files exceed the line limit. Review: {}",
                oversized.len(),
                oversized.iter().take(3).copied().collect::<Vec<_>>().join(", ")
            ));
        }

        suggestions
    }

    fn recommendations(&self, deps: &DependencyAccumulator) -> Vec<String> {
        let mut recommendations = Vec::new();

        if let Some(top) = deps.most_depended(1).first() {
            if top.dependents > HUB_MODULE_THRESHOLD {
                recommendations.push(format!(
                    "🔗 Module '{}' is heavily depended upon. Consider adding an abstraction layer.",
                    top.module
                ));
            }
        }

        let found = self.identify_patterns();
        if found.contains(&ArchitecturePattern::Mono) {
            recommendations.push(
                "📁 Monolithic structure detected. Consider splitting into independent modules."
                    .to_string(),
            );
        }
        if found.contains(&ArchitecturePattern::Distributed) {
            recommendations.push(
                "🔀 Distributed structure detected. Make sure dependencies are clear.".to_string(),
            );
        }

        let organization = self.evaluate_organization();
        if organization.score < 50 {
            recommendations.push(format!(
                "📋 Organization needs improvement (score: {}). Suggestions: {}",
                organization.score,
                organization.suggestions.join(", ")
            ));
        }

        recommendations
    }

    /// Detect the architectural layout of the root directory
    pub fn identify_patterns(&self) -> Vec<ArchitecturePattern> {
        let dirs: Vec<String> = fs::read_dir(&self.root)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter(|e| e.path().is_dir())
                    .map(|e| e.file_name().to_string_lossy().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let mut found = Vec::new();

        if dirs.len() < 5 && ENTRY_POINTS.iter().any(|f| self.root.join(f).is_file()) {
            found.push(ArchitecturePattern::Mono);
        }
        if dirs.iter().any(|d| DISTRIBUTED_DIRS.contains(&d.as_str())) {
            found.push(ArchitecturePattern::Distributed);
        }

        found
    }

    /// Score the root directory's layout against common conventions
    pub fn evaluate_organization(&self) -> Organization {
        let has_tests = file_utils::walk_entries(&self.root, &self.config.ignore_dirs).any(|entry| {
            let name = entry.file_name().to_string_lossy();
            name.contains("test") || name.contains("spec")
        });

        let has_readme = fs::read_dir(&self.root)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .any(|e| e.file_name().to_string_lossy().starts_with("README"))
            })
            .unwrap_or(false);

        metrics::organization_score(Layout {
            has_src: self.root.join("src").exists(),
            has_components: self.root.join("src").join("components").exists(),
            has_tests,
            has_readme,
        })
    }
}

fn is_ignored_dir(path: &Path, ignore_dirs: &[String]) -> bool {
    path.file_name()
        .is_some_and(|name| ignore_dirs.iter().any(|dir| name == dir.as_str()))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .or_else(|| {
            path.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        })
        .unwrap_or_else(|| path.display().to_string())
}

fn global_metrics(projects: &[ProjectAnalysis], deps: &DependencyAccumulator) -> GlobalMetrics {
    let count = projects.len();
    let average = |f: fn(&ProjectAnalysis) -> f64| {
        if count == 0 {
            0.0
        } else {
            metrics::round2(projects.iter().map(f).sum::<f64>() / count as f64)
        }
    };

    GlobalMetrics {
        total_files: projects.iter().map(|p| p.file_count).sum(),
        total_lines: projects.iter().map(|p| p.total_lines).sum(),
        project_count: count,
        average_complexity: average(|p| p.complexity),
        average_coupling: average(|p| p.coupling),
        most_depended_modules: deps.most_depended(5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> String {
        (0..n).map(|i| format!("x = {}\n", i)).collect()
    }

    #[test]
    fn test_oversized_boundary() {
        let config = ContextConfig::default();
        let path = Path::new("big.py");

        let (scan, _) = scan_source(path, &lines(300), &config, DependencyAccumulator::new());
        assert_eq!(scan.lines, 300);
        assert!(scan.issues.iter().all(|i| i.kind != IssueKind::OversizedFile));

        let (scan, _) = scan_source(path, &lines(301), &config, DependencyAccumulator::new());
        let oversized: Vec<_> = scan
            .issues
            .iter()
            .filter(|i| i.kind == IssueKind::OversizedFile)
            .collect();
        assert_eq!(oversized.len(), 1);
        assert_eq!(oversized[0].severity, Severity::Warning);
        assert_eq!(oversized[0].message, "File has 301 lines (maximum: 300)");
    }

    #[test]
    fn test_mixed_indentation() {
        assert!(has_mixed_indentation("def a():\n    pass\ndef b():\n\tpass\n"));
        assert!(!has_mixed_indentation("def a():\n    pass\n"));
        assert!(!has_mixed_indentation("def a():\n\tpass\n   \n"));
    }

    #[test]
    fn test_long_lines_threshold() {
        let config = ContextConfig::default();
        let long = "y".repeat(121);
        let five: String = (0..5).map(|_| format!("{}\n", long)).collect();
        let six: String = (0..6).map(|_| format!("{}\n", long)).collect();

        let (scan, _) = scan_source(Path::new("a.go"), &five, &config, DependencyAccumulator::new());
        assert!(scan.issues.is_empty());

        let (scan, _) = scan_source(Path::new("a.go"), &six, &config, DependencyAccumulator::new());
        assert_eq!(scan.issues.len(), 1);
        assert_eq!(scan.issues[0].kind, IssueKind::LongLines);
        assert_eq!(scan.issues[0].message, "6 lines exceed 120 characters");
    }

    #[test]
    fn test_accumulator_is_threaded() {
        let config = ContextConfig::default();
        let deps = DependencyAccumulator::new();

        let (a, deps) = scan_source(
            Path::new("a.py"),
            "import os\nimport os\nfrom app.models import User\n\ndef f():\n    pass\n",
            &config,
            deps,
        );
        let (b, deps) = scan_source(
            Path::new("b.ts"),
            "import { x } from './a';\nfunction g() {}\n",
            &config,
            deps,
        );
        let (c, deps) = scan_source(Path::new("c.go"), "package main\n", &config, deps);

        assert_eq!((a.definitions, b.definitions, c.definitions), (1, 1, 0));
        assert_eq!(deps.file_count(), 2);
        assert_eq!(deps.edge_count(), 3);
        assert_eq!(
            deps.imports_of("a.py").unwrap().iter().collect::<Vec<_>>(),
            vec!["app.models", "os"]
        );
    }

    #[test]
    fn test_root_module() {
        assert_eq!(root_module("os.path"), "os");
        assert_eq!(root_module("java.util.List"), "java");
        assert_eq!(root_module("react-dom/client"), "react-dom");
        assert_eq!(root_module("@scope/pkg/sub"), "@scope/pkg");
        assert_eq!(root_module("@scope"), "@scope");
        assert_eq!(root_module("./local"), "./local");
    }

    #[test]
    fn test_most_depended_ranking() {
        let deps = DependencyAccumulator::new()
            .record("a.py", vec!["os.path".to_string(), "os".to_string(), "sys".to_string()])
            .record("b.py", vec!["os".to_string()])
            .record("c.py", Vec::new());

        let ranked = deps.most_depended(5);
        assert_eq!(
            ranked,
            vec![
                ModuleUsage { module: "os".into(), dependents: 2 },
                ModuleUsage { module: "sys".into(), dependents: 1 },
            ]
        );
        assert_eq!(deps.file_count(), 2);
    }

    #[test]
    fn test_discover_child_projects() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("web")).unwrap();
        fs::write(root.join("web/package.json"), "{}").unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("docs/guide.md"), "# guide").unwrap();

        let analyzer = ContextAnalyzer::new(root, ContextConfig::default());
        let projects = analyzer.discover_projects();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "web");
    }

    #[test]
    fn test_identify_patterns() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("components")).unwrap();
        fs::write(root.join("index.ts"), "export {};\n").unwrap();

        let analyzer = ContextAnalyzer::new(root, ContextConfig::default());
        assert_eq!(
            analyzer.identify_patterns(),
            vec![ArchitecturePattern::Mono, ArchitecturePattern::Distributed]
        );
    }

    #[test]
    fn test_evaluate_organization() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/app.test.ts"), "").unwrap();

        let analyzer = ContextAnalyzer::new(root, ContextConfig::default());
        let organization = analyzer.evaluate_organization();
        // missing src/components (10) and README (10)
        assert_eq!(organization.score, 80);
        assert_eq!(organization.suggestions.len(), 2);
    }
}
