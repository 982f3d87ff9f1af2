/// Pattern definitions for the skill checks
///
/// This module holds every regular expression used by the scanners, compiled
/// once, plus the per-language dialect matchers that extract import-like and
/// definition-like syntax from source text.

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::file_utils::extension_of;

lazy_static! {
    // Python
    static ref PY_IMPORT: Regex = Regex::new(r"(?m)^[ \t]*(?:from|import)[ \t]+([\w.]+)").unwrap();
    static ref PY_DEF: Regex = Regex::new(r"(?m)^[ \t]*(?:async[ \t]+)?def[ \t]+(\w+)[ \t]*\(").unwrap();

    // JavaScript / TypeScript
    static ref JS_IMPORT: Regex =
        Regex::new(r#"\b(?:import|from|require)\s*\(?\s*['"]([^'"\n]+)['"]"#).unwrap();
    static ref JS_FUNCTION: Regex =
        Regex::new(r"\bfunction\s*\*?\s*([A-Za-z_$][\w$]*)\s*\(").unwrap();
    static ref JS_BINDING: Regex = Regex::new(
        r"\b(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=\s*(?:async\s+)?(?:function\b|\([^)]*\)\s*=>|[A-Za-z_$][\w$]*\s*=>)"
    ).unwrap();
    static ref JS_METHOD: Regex =
        Regex::new(r"(?m)^[ \t]*(?:async[ \t]+)?([A-Za-z_$][\w$]*)[ \t]*\([^)\n]*\)[ \t]*\{").unwrap();

    // Java
    static ref JAVA_IMPORT: Regex =
        Regex::new(r"(?m)^[ \t]*import[ \t]+(?:static[ \t]+)?([\w.]+(?:\.\*)?)[ \t]*;").unwrap();

    // Markup and styles
    pub static ref HEX_COLOR: Regex = Regex::new(r"#[0-9A-Fa-f]{3,6}\b").unwrap();
    pub static ref WHITE_COLOR: Regex = Regex::new(r"(?i)#(?:fff|ffffff)\b").unwrap();
    pub static ref PX_VALUE: Regex = Regex::new(r":\s*(\d+)px").unwrap();
    pub static ref IMPORTANT: Regex = Regex::new(r"!important").unwrap();
    pub static ref INLINE_STYLE: Regex = Regex::new(r"style\s*=\s*\{").unwrap();
    static ref HEADING: Regex = Regex::new(r"<h([1-6])[^>]*>").unwrap();
    static ref IMG_TAG: Regex = Regex::new(r"<img[^>]*>").unwrap();
    static ref BUTTON_OPEN: Regex = Regex::new(r"(?i)<button\b([^>]*)>").unwrap();
    static ref BUTTON_BOUNDARY: Regex = Regex::new(r"(?i)</button\s*>|<button\b").unwrap();
    static ref ANY_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();

    // Naming conventions
    static ref PASCAL_CASE_FILE: Regex = Regex::new(r"^[A-Z][a-z0-9]+(?:[A-Z][a-z0-9]+)*\.tsx?$").unwrap();
    static ref CAMEL_CASE_FILE: Regex = Regex::new(r"^[a-z][a-zA-Z0-9]*\.ts$").unwrap();

    // Definitions with their parameter lists, any C-like or Python dialect
    pub static ref SIGNATURE: Regex = Regex::new(
        r"(?m)^[ \t]*(?:(?:export|async|public|private|protected|static|pub)[ \t]+)*(?:def|function|fn)[ \t]+(\w+)[ \t]*\(([^)]*)\)"
    ).unwrap();
}

/// Words that look like a method shorthand to `JS_METHOD` but are control flow
const JS_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "with", "function", "return", "else",
];

/// Import- and definition-like syntax of one language family
///
/// Each dialect is scoped to its own extensions so patterns of one language
/// never fire on another.
pub trait Dialect: Sync {
    /// Short identifier of the dialect
    fn name(&self) -> &'static str;

    /// Extensions (without dot) this dialect applies to
    fn extensions(&self) -> &'static [&'static str];

    /// Modules imported by the source text
    fn imports(&self, content: &str) -> Vec<String>;

    /// Names of the functions defined in the source text
    fn definitions(&self, _content: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Python `import x` / `from x import y`
pub struct PythonDialect;

impl Dialect for PythonDialect {
    fn name(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn imports(&self, content: &str) -> Vec<String> {
        captures(&PY_IMPORT, content)
    }

    fn definitions(&self, content: &str) -> Vec<String> {
        captures(&PY_DEF, content)
    }
}

/// JavaScript and TypeScript modules
pub struct ScriptDialect;

impl Dialect for ScriptDialect {
    fn name(&self) -> &'static str {
        "script"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["js", "ts", "tsx", "jsx"]
    }

    fn imports(&self, content: &str) -> Vec<String> {
        captures(&JS_IMPORT, content)
    }

    fn definitions(&self, content: &str) -> Vec<String> {
        let mut names = captures(&JS_FUNCTION, content);
        names.extend(captures(&JS_BINDING, content));
        names.extend(
            captures(&JS_METHOD, content)
                .into_iter()
                .filter(|name| !JS_KEYWORDS.contains(&name.as_str())),
        );
        names
    }
}

/// Java `import a.b.C;`
pub struct JavaDialect;

impl Dialect for JavaDialect {
    fn name(&self) -> &'static str {
        "java"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn imports(&self, content: &str) -> Vec<String> {
        captures(&JAVA_IMPORT, content)
    }
}

static DIALECTS: &[&dyn Dialect] = &[&PythonDialect, &ScriptDialect, &JavaDialect];

/// Pick the dialect matching a file's extension
pub fn dialect_for(path: &Path) -> Option<&'static dyn Dialect> {
    let ext = extension_of(path)?;
    DIALECTS
        .iter()
        .copied()
        .find(|dialect| dialect.extensions().contains(&ext))
}

fn captures(pattern: &Regex, content: &str) -> Vec<String> {
    pattern
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// A heading tag found in markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    /// 1-based line of the opening tag
    pub line: usize,
}

/// Headings in document order
pub fn headings(content: &str) -> Vec<Heading> {
    HEADING
        .captures_iter(content)
        .filter_map(|cap| {
            let level = cap[1].parse().ok()?;
            let offset = cap.get(0)?.start();
            Some(Heading {
                level,
                line: line_of(content, offset),
            })
        })
        .collect()
}

/// Every place where the heading level jumps by more than one
///
/// # Returns
///
/// `(previous, skipped_to)` pairs, one per skip
pub fn heading_skips(headings: &[Heading]) -> Vec<(Heading, Heading)> {
    headings
        .windows(2)
        .filter(|pair| pair[1].level > pair[0].level + 1)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/// 1-based line number of a byte offset
pub fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}

/// `<img>` tags that carry no `alt` attribute
pub fn images_without_alt(content: &str) -> Vec<&str> {
    IMG_TAG
        .find_iter(content)
        .map(|m| m.as_str())
        .filter(|tag| !tag.contains("alt="))
        .collect()
}

/// `<button>` elements with neither an `aria-label` nor visible text.
///
/// A self-closing `<button />` has no text. The body of an open tag ends at
/// its `</button>` or at the next `<button`, whichever comes first; a tag
/// with neither is not counted.
pub fn unlabeled_buttons(content: &str) -> usize {
    BUTTON_OPEN
        .captures_iter(content)
        .filter(|cap| {
            let attributes = &cap[1];
            if attributes.contains("aria-label=") {
                return false;
            }
            if attributes.trim_end().ends_with('/') {
                return true;
            }

            let rest = match cap.get(0) {
                Some(open) => &content[open.end()..],
                None => return false,
            };
            match BUTTON_BOUNDARY.find(rest) {
                Some(end) => ANY_TAG.replace_all(&rest[..end.start()], "").trim().is_empty(),
                None => false,
            }
        })
        .count()
}

/// Whether a TypeScript file name follows the project naming conventions:
/// PascalCase for `.tsx` components, PascalCase or camelCase for `.ts` modules
pub fn follows_naming_convention(name: &str) -> bool {
    if name.ends_with(".tsx") {
        PASCAL_CASE_FILE.is_match(name)
    } else if name.ends_with(".ts") {
        PASCAL_CASE_FILE.is_match(name) || CAMEL_CASE_FILE.is_match(name)
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_selection() {
        assert_eq!(dialect_for(Path::new("a.py")).map(|d| d.name()), Some("python"));
        assert_eq!(dialect_for(Path::new("a.tsx")).map(|d| d.name()), Some("script"));
        assert_eq!(dialect_for(Path::new("A.java")).map(|d| d.name()), Some("java"));
        assert!(dialect_for(Path::new("a.go")).is_none());
    }

    #[test]
    fn test_python_dialect() {
        let src = "import os\nfrom collections import defaultdict\n\ndef main():\n    pass\n\nasync def fetch(url):\n    pass\n";
        assert_eq!(PythonDialect.imports(src), vec!["os", "collections"]);
        assert_eq!(PythonDialect.definitions(src), vec!["main", "fetch"]);
    }

    #[test]
    fn test_script_dialect() {
        let src = r#"import React from 'react';
import './styles.css';
const fs = require("fs");

export function render(props) {
  if (props.ok) {
    return 1;
  }
}
const handler = async (event) => {};
class Widget {
  update(value) {
    return value;
  }
}
"#;
        assert_eq!(ScriptDialect.imports(src), vec!["react", "./styles.css", "fs"]);
        let defs = ScriptDialect.definitions(src);
        assert!(defs.contains(&"render".to_string()));
        assert!(defs.contains(&"handler".to_string()));
        assert!(defs.contains(&"update".to_string()));
        assert!(!defs.contains(&"if".to_string()));
        assert_eq!(defs.len(), 3);
    }

    #[test]
    fn test_dialects_do_not_cross() {
        // A Python-looking line inside a script file is not a script import.
        let src = "from os import path\n";
        assert!(ScriptDialect.imports(src).is_empty());
        assert!(JavaDialect.imports("import os\n").is_empty());
    }

    #[test]
    fn test_java_dialect() {
        let src = "package a;\nimport java.util.List;\nimport static org.junit.Assert.*;\n";
        assert_eq!(
            JavaDialect.imports(src),
            vec!["java.util.List", "org.junit.Assert.*"]
        );
        assert!(JavaDialect.definitions(src).is_empty());
    }

    #[test]
    fn test_heading_skips() {
        let found = headings("<h1>A</h1><h3>B</h3>");
        assert_eq!(found.iter().map(|h| h.level).collect::<Vec<_>>(), vec![1, 3]);
        let skips = heading_skips(&found);
        assert_eq!(skips.len(), 1);
        assert_eq!((skips[0].0.level, skips[0].1.level), (1, 3));

        assert!(heading_skips(&headings("<h1>A</h1><h2>B</h2><h1>C</h1>")).is_empty());
    }

    #[test]
    fn test_heading_lines() {
        let found = headings("<body>\n<h2>A</h2>\n\n<h4 class=\"x\">B</h4>");
        assert_eq!(found, vec![Heading { level: 2, line: 2 }, Heading { level: 4, line: 4 }]);
    }

    #[test]
    fn test_images_and_buttons() {
        let html = r#"<img src="a.png"><img src="b.png" alt="b">
<button aria-label="close"></button><button>Save</button><button><span></span></button>"#;
        assert_eq!(images_without_alt(html), vec![r#"<img src="a.png">"#]);
        assert_eq!(unlabeled_buttons(html), 1);
    }

    #[test]
    fn test_self_closing_buttons() {
        assert_eq!(unlabeled_buttons("<button />"), 1);
        assert_eq!(unlabeled_buttons(r#"<button type="submit"/>"#), 1);
        assert_eq!(unlabeled_buttons(r#"<button aria-label="close" />"#), 0);
        // a labelled self-closing button does not swallow the next one
        assert_eq!(unlabeled_buttons(r#"<button aria-label="x" /><button></button>"#), 1);
        assert_eq!(unlabeled_buttons("<button />\n<button>Save</button>"), 1);
    }

    #[test]
    fn test_button_body_stops_at_next_button() {
        assert_eq!(unlabeled_buttons("<button><button>Save</button>"), 1);
        assert_eq!(unlabeled_buttons("<BUTTON>\n  <Icon />\n</BUTTON >"), 1);
        assert_eq!(unlabeled_buttons("<button>Open"), 0);
        assert_eq!(unlabeled_buttons("<buttons></buttons>"), 0);
    }

    #[test]
    fn test_naming_convention() {
        assert!(follows_naming_convention("UserCard.tsx"));
        assert!(!follows_naming_convention("userCard.tsx"));
        assert!(follows_naming_convention("utils.ts"));
        assert!(follows_naming_convention("Button.ts"));
        assert!(!follows_naming_convention("my_utils.ts"));
        assert!(follows_naming_convention("styles.css"));
    }
}
