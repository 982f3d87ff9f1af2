/// File handling utilities
///
/// This module provides the directory walker shared by every check, lenient
/// file reading, and extension-based file classification.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, SkillError};

/// Source extensions understood by the context analyzer
pub const CODE_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "tsx", "jsx", "java", "cpp", "c", "h", "cs", "go", "rs", "rb",
];

/// Web extensions understood by the design validator
pub const WEB_EXTENSIONS: &[&str] = &["css", "scss", "tsx", "jsx", "ts", "js", "html"];

/// Extensions scanned by the accessibility checker
pub const A11Y_EXTENSIONS: &[&str] = &["tsx", "jsx", "vue", "html", "css"];

/// Stylesheet extensions counted by the UX audit
pub const STYLE_EXTENSIONS: &[&str] = &["css", "scss"];

/// Component extensions counted by the UX audit
pub const COMPONENT_EXTENSIONS: &[&str] = &["tsx", "jsx", "vue"];

/// Kind of web file, which decides the set of design checks applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebFileKind {
    /// CSS or SCSS stylesheet
    Stylesheet,
    /// React/TypeScript/JavaScript component or module
    Component,
    /// HTML document
    Markup,
}

impl WebFileKind {
    /// Classify a path by its extension, `None` for non-web files
    pub fn from_path(path: &Path) -> Option<Self> {
        match extension_of(path)? {
            "css" | "scss" => Some(Self::Stylesheet),
            "tsx" | "jsx" | "ts" | "js" => Some(Self::Component),
            "html" => Some(Self::Markup),
            _ => None,
        }
    }
}

/// Extension of a path without the leading dot
pub fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Check whether a path carries one of the given extensions (case-sensitive)
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    extension_of(path).is_some_and(|ext| extensions.contains(&ext))
}

fn is_ignored(entry: &DirEntry, ignore_dirs: &[String]) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && ignore_dirs.iter().any(|dir| entry.file_name() == dir.as_str())
}

/// Lazily walk every entry (files and directories) below `root`
///
/// Entries that cannot be read are skipped rather than failing the walk.
/// Symlinks are not followed.
///
/// # Arguments
///
/// * `root` - Directory to walk
/// * `ignore_dirs` - Directory names pruned from the walk
///
/// # Returns
///
/// Iterator over readable entries, the root itself excluded
pub fn walk_entries<'a>(
    root: &Path,
    ignore_dirs: &'a [String],
) -> impl Iterator<Item = DirEntry> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .into_iter()
        .filter_entry(move |entry| !is_ignored(entry, ignore_dirs))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
}

/// Lazily walk the files below `root` whose extension is in `extensions`
///
/// # Arguments
///
/// * `root` - Directory to walk
/// * `extensions` - Allow-list of extensions, without dots
/// * `ignore_dirs` - Directory names pruned from the walk
///
/// # Returns
///
/// Iterator over matching file paths
pub fn walk_files<'a>(
    root: &Path,
    extensions: &'a [&'a str],
    ignore_dirs: &'a [String],
) -> impl Iterator<Item = PathBuf> + 'a {
    walk_entries(root, ignore_dirs)
        .filter(|entry| entry.file_type().is_file())
        .map(DirEntry::into_path)
        .filter(move |path| has_extension(path, extensions))
}

/// Read a file as text, dropping bytes that are not valid UTF-8.
///
/// A file that cannot be read at all yields `None`, which callers treat as
/// "zero findings" for that file.
pub fn read_lossy(file_path: &Path) -> Option<String> {
    match fs::read(file_path) {
        Ok(bytes) => Some(match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                debug!("{} is not valid UTF-8, dropping invalid bytes", file_path.display());
                e.as_bytes().utf8_chunks().map(|chunk| chunk.valid()).collect()
            }
        }),
        Err(e) => {
            warn!("Failed to read {}: {}", file_path.display(), e);
            None
        }
    }
}

/// Read a file that the caller cannot do without
pub fn read_required(file_path: &Path) -> Result<String> {
    if !file_path.exists() {
        return Err(SkillError::PathNotFound(file_path.to_path_buf()));
    }
    fs::read_to_string(file_path).map_err(|source| SkillError::Io {
        path: file_path.to_path_buf(),
        source,
    })
}

/// Count the lines of a text the way editors do (a trailing newline does not
/// open a new line)
pub fn count_lines(content: &str) -> usize {
    content.lines().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("src/app.tsx"), CODE_EXTENSIONS));
        assert!(!has_extension(Path::new("README.md"), CODE_EXTENSIONS));
        assert!(!has_extension(Path::new("Makefile"), CODE_EXTENSIONS));
        assert!(!has_extension(Path::new("main.PY"), CODE_EXTENSIONS));
    }

    #[test]
    fn test_web_file_kind() {
        assert_eq!(WebFileKind::from_path(Path::new("a.scss")), Some(WebFileKind::Stylesheet));
        assert_eq!(WebFileKind::from_path(Path::new("a.jsx")), Some(WebFileKind::Component));
        assert_eq!(WebFileKind::from_path(Path::new("a.html")), Some(WebFileKind::Markup));
        assert_eq!(WebFileKind::from_path(Path::new("a.py")), None);
    }

    #[test]
    fn test_walk_files_filters_and_prunes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("src/main.py"), "print(1)\n").unwrap();
        fs::write(root.join("src/nested/util.rs"), "fn main() {}\n").unwrap();
        fs::write(root.join("src/notes.txt"), "hello\n").unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "x\n").unwrap();

        let ignore = vec!["node_modules".to_string()];
        let mut found: Vec<_> = walk_files(root, CODE_EXTENSIONS, &ignore)
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        found.sort();

        assert_eq!(
            found,
            vec![PathBuf::from("src/main.py"), PathBuf::from("src/nested/util.rs")]
        );
    }

    #[test]
    fn test_read_lossy_drops_invalid_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.py");
        fs::write(&path, b"abc\xffdef\n").unwrap();

        assert_eq!(read_lossy(&path).as_deref(), Some("abcdef\n"));
        assert_eq!(read_lossy(&dir.path().join("missing.py")), None);
    }

    #[test]
    fn test_read_lossy_keeps_replacement_characters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marker.txt");
        let mut bytes = "a\u{FFFD}b".as_bytes().to_vec();
        bytes.extend_from_slice(b"\xc3(c\n");
        fs::write(&path, bytes).unwrap();

        assert_eq!(read_lossy(&path).as_deref(), Some("a\u{FFFD}b(c\n"));
    }

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(""), 0);
        assert_eq!(count_lines("a\nb\n"), 2);
        assert_eq!(count_lines("a\nb"), 2);
    }
}
