/// Creativity evaluator
///
/// Looks for code shapes that usually hide a better abstraction (long
/// conditional chains, deep nesting, repeated lines, wide signatures) and
/// turns them into refactoring suggestions and thinking prompts.

use std::collections::HashSet;

use serde::Serialize;

use crate::core::patterns::{self, SIGNATURE};

/// Branches in one chain before it is reported
const MAX_CHAIN_BRANCHES: usize = 5;
/// Nesting level above which a block is reported
const MAX_NESTING_LEVEL: usize = 3;
/// Columns per nesting level; a tab counts as one level
const INDENT_WIDTH: usize = 4;
/// Lines this short are too generic to count as repetition
const MIN_REPEATED_LENGTH: usize = 20;
/// Parameters a definition may take before it is reported
const MAX_PARAMETERS: usize = 5;

/// Receiver parameters that do not count toward a signature's width
const RECEIVERS: &[&str] = &["self", "&self", "&mut self", "mut self", "cls"];

const THINKING_PROMPTS: &[&str] = &[
    "What if this code could be expressed more elegantly?",
    "How would this problem be solved in a functional programming style?",
    "What design patterns could simplify this logic?",
    "How could this code be more self-documenting?",
    "What if we could remove this code entirely through abstraction?",
];

/// Pattern occurrences found in one piece of code, one list per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreativityPatterns {
    pub if_else_chains: Vec<String>,
    pub deep_nesting: Vec<String>,
    pub repetitive_code: Vec<String>,
    pub missing_abstractions: Vec<String>,
}

impl CreativityPatterns {
    /// Categories with their occurrences, in report order
    pub fn categories(&self) -> [(&'static str, &[String]); 4] {
        [
            ("if_else_chains", self.if_else_chains.as_slice()),
            ("deep_nesting", self.deep_nesting.as_slice()),
            ("repetitive_code", self.repetitive_code.as_slice()),
            ("missing_abstractions", self.missing_abstractions.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.categories().iter().all(|(_, found)| found.is_empty())
    }
}

/// Full evaluation of one input
#[derive(Debug, Clone, Serialize)]
pub struct CreativityReport {
    pub file: String,
    pub patterns: CreativityPatterns,
    pub suggestions: Vec<String>,
}

/// Analyze code and collect suggestions in one step
///
/// # Arguments
///
/// * `file` - Label of the input (a path, or `<stdin>`)
/// * `content` - Code to analyze
pub fn evaluate(file: &str, content: &str) -> CreativityReport {
    let patterns = analyze_code_patterns(content);
    let suggestions = suggest_creative_alternatives(&patterns);
    CreativityReport {
        file: file.to_string(),
        patterns,
        suggestions,
    }
}

/// Scan code for the four creativity patterns
pub fn analyze_code_patterns(content: &str) -> CreativityPatterns {
    CreativityPatterns {
        if_else_chains: if_else_chains(content),
        deep_nesting: deep_nesting(content),
        repetitive_code: repetitive_code(content),
        missing_abstractions: missing_abstractions(content),
    }
}

fn is_comment(stripped: &str) -> bool {
    stripped.starts_with("//") || stripped.starts_with('#') || stripped.starts_with("/*")
}

fn if_else_chains(content: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut branches = 0;

    for (index, line) in content.lines().enumerate() {
        let stripped = line.trim();
        if stripped.starts_with("if ") || stripped.starts_with("} else if") {
            branches += 1;
        } else if stripped == "}" && branches > 0 {
            if branches > MAX_CHAIN_BRANCHES {
                found.push(format!("Line {}: Long if-else chain detected", index + 1));
            }
            branches = 0;
        }
    }

    found
}

fn indent_level(line: &str) -> usize {
    let columns: usize = line
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { INDENT_WIDTH } else { 1 })
        .sum();
    columns / INDENT_WIDTH
}

fn deep_nesting(content: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut previous = 0;

    for (index, line) in content.lines().enumerate() {
        let stripped = line.trim();
        if stripped.is_empty() || is_comment(stripped) {
            continue;
        }
        let level = indent_level(line);
        if level > MAX_NESTING_LEVEL && level > previous {
            found.push(format!("Line {}: Deep nesting (level {})", index + 1, level));
        }
        previous = level;
    }

    found
}

fn repetitive_code(content: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut found = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let stripped = line.trim();
        if stripped.chars().count() <= MIN_REPEATED_LENGTH
            || stripped.starts_with("//")
            || stripped.starts_with("/*")
        {
            continue;
        }
        if !seen.insert(stripped) {
            let preview: String = stripped.chars().take(50).collect();
            found.push(format!("Similar line at {}: {}...", index + 1, preview));
        }
    }

    found
}

fn missing_abstractions(content: &str) -> Vec<String> {
    SIGNATURE
        .captures_iter(content)
        .filter_map(|cap| {
            let parameters = cap[2]
                .split(',')
                .map(str::trim)
                .filter(|param| !param.is_empty() && !RECEIVERS.contains(param))
                .count();
            if parameters <= MAX_PARAMETERS {
                return None;
            }
            let line = patterns::line_of(content, cap.get(0)?.start());
            Some(format!("Line {}: '{}' takes {} parameters", line, &cap[1], parameters))
        })
        .collect()
}

/// Turn the found patterns into refactoring suggestions
///
/// Every non-empty category contributes its suggestions; the general thinking
/// prompts always close the list.
pub fn suggest_creative_alternatives(patterns: &CreativityPatterns) -> Vec<String> {
    let mut suggestions: Vec<&str> = Vec::new();

    if !patterns.if_else_chains.is_empty() {
        suggestions.extend([
            "Consider using a strategy pattern or lookup table instead of long if-else chains",
            "Use polymorphism to replace conditional logic with object behavior",
        ]);
    }

    if !patterns.deep_nesting.is_empty() {
        suggestions.extend([
            "Apply the 'Early Return' pattern to reduce nesting",
            "Extract nested logic into separate functions",
            "Use the 'Guard Clauses' pattern for validation",
        ]);
    }

    if !patterns.repetitive_code.is_empty() {
        suggestions.extend([
            "Extract repeated logic into reusable functions or utilities",
            "Consider creating a domain-specific language (DSL) for repeated operations",
            "Use higher-order functions for common operations",
        ]);
    }

    if !patterns.missing_abstractions.is_empty() {
        suggestions.extend([
            "Look for opportunities to create interfaces or abstract classes",
            "Consider using the 'Extract Method' refactoring pattern",
            "Apply the 'Composite Pattern' for tree-like structures",
        ]);
    }

    suggestions.extend(THINKING_PROMPTS);
    suggestions.into_iter().map(String::from).collect()
}

/// Render the creative enhancement prompt around a piece of code
pub fn generate_creative_prompt(context: &str) -> String {
    format!(
        r#"
# Creative Code Enhancement Prompt

## Context
{context}

## Creative Thinking Questions

1. **Simplicity**: How can this code be made simpler?
   - What if we removed half the code?

2. **Abstraction**: What could be abstracted?
   - What patterns emerge from this code?

3. **Composition**: How can we compose instead of inherit?
   - What small, focused functions can we create?

4. **Expressiveness**: How can we make the code more readable?
   - What naming would make this self-documenting?

5. **Innovation**: What novel approaches could work?
   - What if we approached this from a completely different angle?

## Output Format

Please provide:
1. Analysis of current code patterns
2. Creative alternatives (at least 3)
3. Benefits of each approach
4. Recommended implementation with explanation
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(branches: usize) -> String {
        let mut code = String::from("if (a == 0) {\n  go(0);\n");
        for i in 1..branches {
            code.push_str(&format!("}} else if (a == {}) {{\n  go({});\n", i, i));
        }
        code.push_str("}\n");
        code
    }

    #[test]
    fn test_if_else_chain() {
        let found = analyze_code_patterns(&chain(6)).if_else_chains;
        assert_eq!(found, vec!["Line 13: Long if-else chain detected"]);
        assert!(analyze_code_patterns(&chain(5)).if_else_chains.is_empty());
    }

    #[test]
    fn test_deep_nesting_reports_block_starts() {
        let code = "fn a() {\n    if x {\n        for y in z {\n            if w {\n                one();\n                two();\n            }\n        }\n    }\n}\n";
        let found = analyze_code_patterns(code).deep_nesting;
        assert_eq!(found, vec!["Line 5: Deep nesting (level 4)"]);

        let tabs = "a\n\t\t\t\tb\n";
        assert_eq!(
            analyze_code_patterns(tabs).deep_nesting,
            vec!["Line 2: Deep nesting (level 4)"]
        );
    }

    #[test]
    fn test_repetitive_code() {
        let code = "let total = compute(items, 1);\nshort\nlet total = compute(items, 1);\n// let total = compute(items, 1);\n";
        let found = analyze_code_patterns(code).repetitive_code;
        assert_eq!(found, vec!["Similar line at 3: let total = compute(items, 1);..."]);
    }

    #[test]
    fn test_missing_abstractions() {
        let code = "def build(self, a, b, c, d, e, f):\n    pass\n\ndef small(self, a, b, c, d, e):\n    pass\n";
        let found = analyze_code_patterns(code).missing_abstractions;
        assert_eq!(found, vec!["Line 1: 'build' takes 6 parameters"]);
    }

    #[test]
    fn test_suggestions_always_end_with_prompts() {
        let empty = CreativityPatterns::default();
        assert!(empty.is_empty());
        assert_eq!(suggest_creative_alternatives(&empty), THINKING_PROMPTS);

        let patterns = CreativityPatterns {
            deep_nesting: vec!["Line 1: Deep nesting (level 4)".to_string()],
            ..Default::default()
        };
        let suggestions = suggest_creative_alternatives(&patterns);
        assert_eq!(suggestions.len(), 3 + THINKING_PROMPTS.len());
        assert_eq!(suggestions[0], "Apply the 'Early Return' pattern to reduce nesting");
    }

    #[test]
    fn test_missing_abstraction_suggestions() {
        let patterns = CreativityPatterns {
            missing_abstractions: vec!["Line 3: Function with 6 parameters".to_string()],
            ..Default::default()
        };
        let suggestions = suggest_creative_alternatives(&patterns);
        assert_eq!(
            &suggestions[..3],
            [
                "Look for opportunities to create interfaces or abstract classes",
                "Consider using the 'Extract Method' refactoring pattern",
                "Apply the 'Composite Pattern' for tree-like structures",
            ]
        );
        assert_eq!(&suggestions[3..], THINKING_PROMPTS);
    }

    #[test]
    fn test_prompt_embeds_context() {
        let prompt = generate_creative_prompt("fn main() {}");
        assert!(prompt.contains("## Context\nfn main() {}\n"));
        assert!(prompt.contains("5. **Innovation**"));
    }

    #[test]
    fn test_report_serializes_category_order() {
        let report = evaluate("<stdin>", "x = 1\n");
        let json = serde_json::to_string(&report).unwrap();
        let first = json.find("if_else_chains").unwrap();
        let last = json.find("missing_abstractions").unwrap();
        assert!(first < last);
        assert!(json.starts_with(r#"{"file":"<stdin>""#));
    }
}
