//! Rule-file reader: one `"<pattern> <result-char>"` per line.

use std::num::NonZeroU8;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// One line of a rule file, ready for compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub pattern: String,
    pub result: NonZeroU8,
    /// 1-based line number, for error reporting.
    pub line: usize,
}

pub fn load_rules(path: &Path) -> Result<Vec<Rule>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read rule file {}", path.display()))?;
    parse_rules(&content)
}

/// Parse rule-file content. Blank lines are skipped; anything else must be
/// a pattern, whitespace, and exactly one result character.
pub fn parse_rules(content: &str) -> Result<Vec<Rule>> {
    let mut rules = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        if line.trim_matches([' ', '\t']).is_empty() {
            continue;
        }

        let Some(pattern_end) = line.find([' ', '\t']) else {
            bail!("syntax error at line {line_no} (expected \"<pattern> <result>\"): {line}");
        };
        let pattern = &line[..pattern_end];
        if pattern.is_empty() {
            bail!("syntax error at line {line_no} (empty pattern): {line}");
        }

        let mut tail = line[pattern_end..]
            .chars()
            .filter(|&c| c != ' ' && c != '\t');
        let result_char = match (tail.next(), tail.next()) {
            (Some(c), None) => c,
            (None, _) => {
                bail!("syntax error at line {line_no} (missing result): {line}");
            }
            (Some(_), Some(_)) => {
                bail!("syntax error at line {line_no} (result must be single char): {line}");
            }
        };
        if !result_char.is_ascii() {
            bail!("syntax error at line {line_no} (result must be a single byte): {line}");
        }
        let Some(result) = NonZeroU8::new(result_char as u8) else {
            bail!("syntax error at line {line_no} (result must be a single byte): {line}");
        };

        rules.push(Rule {
            pattern: pattern.to_string(),
            result,
            line: line_no,
        });
    }
    Ok(rules)
}
