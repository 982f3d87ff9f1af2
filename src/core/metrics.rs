/// Score computations
///
/// Pure functions turning raw counts into the bounded heuristic scores the
/// reports show.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};

/// Token budget of the working layer
pub const WORKING_TOKEN_LIMIT: usize = 150;
/// Token budget of the session layer
pub const SESSION_TOKEN_LIMIT: usize = 800;
/// Token budget of the project layer
pub const PROJECT_TOKEN_LIMIT: usize = 2000;

/// Complexity score of a project.
///
/// `min(100, density * 30 + min(avg_file_size / 100, 1) * 40 + 30)` where
/// density is definitions per file. A project without files scores `0.0`.
pub fn complexity_score(files: usize, lines: usize, definitions: usize) -> f64 {
    if files == 0 {
        return 0.0;
    }

    let density = definitions as f64 / files as f64;
    let average_size = lines as f64 / files as f64;

    let score = density * 30.0 + (average_size / 100.0).min(1.0) * 40.0 + 30.0;
    score.min(100.0)
}

/// Coupling score: observed import edges over the `N*(N-1)/2` possible file
/// pairs, as a percentage capped at 100. Fewer than two files score `0.0`.
pub fn coupling_score(files: usize, edges: usize) -> f64 {
    if files < 2 || edges == 0 {
        return 0.0;
    }

    let possible = (files * (files - 1)) as f64 / 2.0;
    (edges as f64 / possible * 100.0).min(100.0)
}

/// JSON formatter with `", "` and `": "` separators that escapes every
/// character outside printable ASCII as `\uXXXX`
struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        for c in fragment.chars() {
            if c.is_ascii() && c != '\x7f' {
                writer.write_all(&[c as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Serialize a value on one line with spaced separators and ASCII-only output.
///
/// This is the text the token estimate is measured on.
pub fn spaced_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, SpacedAsciiFormatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Crude token estimate: one token per four characters
pub fn estimate_tokens(serialized: &str) -> usize {
    serialized.chars().count() / 4
}

/// Where an estimated token count falls against the layer budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenUsage {
    /// Small enough for the working layer
    WorkingLayer,
    /// Within the recommended limits
    WithinLimits,
    /// Above the session budget, still under the project limit
    SessionLevel,
    /// Above the project limit
    OverProjectLimit,
}

/// Classify a token estimate
pub fn classify_tokens(tokens: usize) -> TokenUsage {
    if tokens > PROJECT_TOKEN_LIMIT {
        TokenUsage::OverProjectLimit
    } else if tokens >= SESSION_TOKEN_LIMIT {
        TokenUsage::SessionLevel
    } else if tokens < WORKING_TOKEN_LIMIT {
        TokenUsage::WorkingLayer
    } else {
        TokenUsage::WithinLimits
    }
}

/// Penalty for a missing `src` directory
pub const MISSING_SRC_PENALTY: u32 = 20;
/// Penalty for a missing `src/components` directory
pub const MISSING_COMPONENTS_PENALTY: u32 = 10;
/// Penalty for a project without test files
pub const MISSING_TESTS_PENALTY: u32 = 20;
/// Penalty for a project without a README
pub const MISSING_README_PENALTY: u32 = 10;

/// Organization score of a project layout with its improvement hints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organization {
    pub score: u32,
    pub suggestions: Vec<String>,
}

/// Layout facts the organization score is computed from
#[derive(Debug, Clone, Copy, Default)]
pub struct Layout {
    pub has_src: bool,
    pub has_components: bool,
    pub has_tests: bool,
    pub has_readme: bool,
}

/// Score a layout: start at 100 and subtract a fixed penalty per missing
/// convention, floored at 0.
pub fn organization_score(layout: Layout) -> Organization {
    let mut penalty = 0;
    let mut suggestions = Vec::new();

    if !layout.has_src {
        penalty += MISSING_SRC_PENALTY;
        suggestions.push("Create a 'src' directory for source code".to_string());
    }
    if !layout.has_components {
        penalty += MISSING_COMPONENTS_PENALTY;
        suggestions.push("Create a 'src/components' directory for components".to_string());
    }
    if !layout.has_tests {
        penalty += MISSING_TESTS_PENALTY;
        suggestions.push("Add unit tests".to_string());
    }
    if !layout.has_readme {
        penalty += MISSING_README_PENALTY;
        suggestions.push("Add a README.md file".to_string());
    }

    Organization {
        score: 100u32.saturating_sub(penalty),
        suggestions,
    }
}

/// Round to two decimals, as the global averages are reported
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spaced_json_layout() {
        let value = json!({"a": [1, 2, {}], "b": null});
        assert_eq!(spaced_json(&value).unwrap(), r#"{"a": [1, 2, {}], "b": null}"#);
    }

    #[test]
    fn test_spaced_json_escapes_non_ascii() {
        let text = spaced_json(&json!({"a": "é"})).unwrap();
        assert_eq!(text, r#"{"a": "\u00e9"}"#);
        assert_eq!(text.chars().count(), 13);

        assert_eq!(spaced_json(&json!("😀\u{7f}")).unwrap(), r#""\ud83d\ude00\u007f""#);
        assert_eq!(spaced_json(&json!("tab\there")).unwrap(), r#""tab\there""#);
    }

    #[test]
    fn test_complexity_without_files() {
        assert_eq!(complexity_score(0, 0, 0), 0.0);
    }

    #[test]
    fn test_complexity_blend() {
        // density 1 -> 30, avg 50 lines -> 20, floor 30
        assert!((complexity_score(2, 100, 2) - 80.0).abs() < 1e-9);
        // avg size term saturates at 40
        assert!((complexity_score(1, 1000, 0) - 70.0).abs() < 1e-9);
        // capped
        assert_eq!(complexity_score(1, 10, 10), 100.0);
    }

    #[test]
    fn test_coupling_bounds() {
        assert_eq!(coupling_score(0, 5), 0.0);
        assert_eq!(coupling_score(1, 5), 0.0);
        assert_eq!(coupling_score(4, 0), 0.0);
        // 4 files -> 6 pairs, 3 edges -> 50%
        assert!((coupling_score(4, 3) - 50.0).abs() < 1e-9);
        assert_eq!(coupling_score(2, 40), 100.0);
        for files in 0..20 {
            for edges in 0..50 {
                let score = coupling_score(files, edges);
                assert!((0.0..=100.0).contains(&score));
            }
        }
    }

    #[test]
    fn test_token_classification() {
        assert_eq!(classify_tokens(0), TokenUsage::WorkingLayer);
        assert_eq!(classify_tokens(149), TokenUsage::WorkingLayer);
        assert_eq!(classify_tokens(150), TokenUsage::WithinLimits);
        assert_eq!(classify_tokens(799), TokenUsage::WithinLimits);
        assert_eq!(classify_tokens(800), TokenUsage::SessionLevel);
        assert_eq!(classify_tokens(2000), TokenUsage::SessionLevel);
        assert_eq!(classify_tokens(2001), TokenUsage::OverProjectLimit);
    }

    #[test]
    fn test_estimate_tokens_counts_chars() {
        assert_eq!(estimate_tokens("abcdefgh"), 2);
        assert_eq!(estimate_tokens("abc"), 0);
        assert_eq!(estimate_tokens("ééééé"), 1);
    }

    #[test]
    fn test_organization_penalties() {
        let full = Layout { has_src: true, has_components: true, has_tests: true, has_readme: true };
        assert_eq!(organization_score(full).score, 100);
        assert!(organization_score(full).suggestions.is_empty());

        let bare = organization_score(Layout::default());
        assert_eq!(bare.score, 40);
        assert_eq!(bare.suggestions.len(), 4);

        let no_tests = Layout { has_tests: false, ..full };
        assert_eq!(organization_score(no_tests).score, 80);

        let no_readme_no_components = Layout { has_readme: false, has_components: false, ..full };
        assert_eq!(organization_score(no_readme_no_components).score, 80);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.3333), 33.33);
        assert_eq!(round2(0.0), 0.0);
    }
}
