//! Locates matched / missing / extra skills in the job description text

use crate::processing::linguistics::is_word_bounded;
use crate::processing::MatchResult;
use colored::Colorize;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillGroup {
    Matched,
    Missing,
    Extra,
}

impl std::fmt::Display for SkillGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkillGroup::Matched => write!(f, "Matched"),
            SkillGroup::Missing => write!(f, "Missing"),
            SkillGroup::Extra => write!(f, "Extra"),
        }
    }
}

/// Byte range of a skill occurrence in the original text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub skill: String,
    pub group: SkillGroup,
}

/// Case-insensitive, word-bounded occurrences of every result skill.
/// Longer terms win; spans never overlap and are sorted by position.
pub fn find_spans(text: &str, result: &MatchResult) -> Vec<HighlightSpan> {
    let mut terms: Vec<(&str, SkillGroup)> = result
        .matched
        .iter()
        .map(|s| (s.as_str(), SkillGroup::Matched))
        .chain(result.missing.iter().map(|s| (s.as_str(), SkillGroup::Missing)))
        .chain(result.extra.iter().map(|s| (s.as_str(), SkillGroup::Extra)))
        .filter(|(s, _)| !s.trim().is_empty())
        .collect();
    terms.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));

    let mut spans: Vec<HighlightSpan> = Vec::new();
    for (skill, group) in terms {
        // Escaped literal, so this cannot fail to compile
        let Ok(pattern) = RegexBuilder::new(&regex::escape(skill))
            .case_insensitive(true)
            .build()
        else {
            continue;
        };

        for m in pattern.find_iter(text) {
            if !is_word_bounded(text, m.start(), m.end()) {
                continue;
            }
            let overlaps = spans
                .iter()
                .any(|s| m.start() < s.end && s.start < m.end());
            if !overlaps {
                spans.push(HighlightSpan {
                    start: m.start(),
                    end: m.end(),
                    skill: skill.to_string(),
                    group,
                });
            }
        }
    }

    spans.sort_by_key(|s| s.start);
    spans
}

/// Colour each span for terminal output
pub fn render_ansi(text: &str, spans: &[HighlightSpan]) -> String {
    render_with(text, spans, |fragment, group| match group {
        SkillGroup::Matched => fragment.on_green().black().to_string(),
        SkillGroup::Missing => fragment.on_yellow().black().to_string(),
        SkillGroup::Extra => fragment.on_magenta().black().to_string(),
    })
}

/// Emphasise each span in Markdown: bold for matched, italic for missing,
/// code for extra
pub fn render_markdown(text: &str, spans: &[HighlightSpan]) -> String {
    render_with(text, spans, |fragment, group| match group {
        SkillGroup::Matched => format!("**{}**", fragment),
        SkillGroup::Missing => format!("_{}_", fragment),
        SkillGroup::Extra => format!("`{}`", fragment),
    })
}

fn render_with<F>(text: &str, spans: &[HighlightSpan], style: F) -> String
where
    F: Fn(&str, SkillGroup) -> String,
{
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in spans {
        output.push_str(&text[cursor..span.start]);
        output.push_str(&style(&text[span.start..span.end], span.group));
        cursor = span.end;
    }
    output.push_str(&text[cursor..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{compare, SkillSet, WeightTable};

    fn set(items: &[&str]) -> SkillSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn result() -> MatchResult {
        compare(
            set(&["java", "docker"]),
            set(&["java", "javascript", "sql"]),
            &WeightTable::default(),
        )
    }

    #[test]
    fn test_spans_are_word_bounded_and_case_insensitive() {
        let text = "Java, JavaScript and SQL. No MySQL.";
        let spans = find_spans(text, &result());

        let found: Vec<(&str, SkillGroup)> = spans
            .iter()
            .map(|s| (&text[s.start..s.end], s.group))
            .collect();
        assert_eq!(
            found,
            vec![
                ("Java", SkillGroup::Matched),
                ("JavaScript", SkillGroup::Missing),
                ("SQL", SkillGroup::Missing),
            ]
        );
    }

    #[test]
    fn test_spans_do_not_overlap() {
        let spans = find_spans("javascript java javascript", &result());
        for pair in spans.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        assert_eq!(spans.len(), 3);
    }

    #[test]
    fn test_render_markdown() {
        let text = "Java and SQL";
        let spans = find_spans(text, &result());
        assert_eq!(render_markdown(text, &spans), "**Java** and _SQL_");
    }

    #[test]
    fn test_render_without_spans_is_identity() {
        let text = "nothing to see";
        assert_eq!(render_markdown(text, &[]), text);
    }
}
