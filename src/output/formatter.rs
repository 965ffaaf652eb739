//! Output formatters: console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::highlighter;
use crate::output::report::{MatchReport, SkillRow};
use crate::processing::SkillSet;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting match reports
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colours
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    highlight: bool,
}

/// JSON formatter for structured consumers
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for exported reports
pub struct MarkdownFormatter {
    include_metadata: bool,
    highlight: bool,
}

/// Dispatches to the formatter for a format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn join_or_none(skills: &SkillSet) -> String {
    if skills.is_empty() {
        "None".to_string()
    } else {
        skills.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn bullet_list(skills: &SkillSet, indent: &str) -> String {
    if skills.is_empty() {
        return format!("{}- None\n", indent);
    }
    skills
        .iter()
        .map(|s| format!("{}- {}\n", indent, s))
        .collect()
}

fn format_weight(row: &SkillRow) -> String {
    row.weight
        .map(|w| format!("{}", w))
        .unwrap_or_else(|| "-".to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool, highlight: bool) -> Self {
        Self {
            use_colors,
            detailed,
            highlight,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".blue().bold(), title.blue().bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = match score {
            s if s >= 80.0 => ("STRONG MATCH", Color::Green),
            s if s >= 60.0 => ("GOOD MATCH", Color::Yellow),
            s if s >= 40.0 => ("PARTIAL MATCH", Color::BrightYellow),
            _ => ("WEAK MATCH", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.result;

        output.push_str(&self.format_header("🎯 RESUME MATCH"));
        output.push_str(&format!(
            "Match Score: {}% {}\n",
            report.overview.score,
            self.format_score_badge(report.overview.score)
        ));
        output.push_str(&format!(
            "Skills in JD: {} | Matched: {} | Missing: {} | Extra: {}\n",
            report.overview.total_jd_skills,
            report.overview.matched_count,
            report.overview.missing_count,
            report.overview.extra_count
        ));

        output.push_str(&self.format_header(&format!("✅ Matched Skills ({})", result.matched.len())));
        output.push_str(&format!("{}\n", self.colorize(&join_or_none(&result.matched), Color::Green)));

        output.push_str(&self.format_header(&format!("⚠️  Missing Skills from CV ({})", result.missing.len())));
        output.push_str(&format!("{}\n", self.colorize(&join_or_none(&result.missing), Color::Yellow)));

        output.push_str(&self.format_header(&format!("🧩 Extra Skills in CV ({})", result.extra.len())));
        output.push_str(&format!("{}\n", self.colorize(&join_or_none(&result.extra), Color::Magenta)));

        if self.detailed {
            output.push_str(&self.format_header("📋 Skill Breakdown"));
            output.push_str(&format!("  {:<30} {:<8} {}\n", "Skill", "Group", "Weight"));
            for row in &report.skill_table {
                output.push_str(&format!(
                    "  {:<30} {:<8} {}\n",
                    row.skill,
                    row.group.to_string(),
                    format_weight(row)
                ));
            }

            output.push_str(&self.format_header("💡 Recommendations"));
            for rec in &report.recommendations {
                output.push_str(&format!("  • {}\n", rec));
            }
        }

        if self.highlight {
            output.push_str(&self.format_header("📌 Highlighted Job Description"));
            let rendered = if self.use_colors {
                highlighter::render_ansi(&report.job_text, &report.highlights)
            } else {
                highlighter::render_markdown(&report.job_text, &report.highlights)
            };
            output.push_str(&rendered);
            output.push('\n');
        }

        output.push_str(&format!(
            "\n{} Resume Matcher v{} | {} vocabulary terms | {}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.matcher_version,
            report.metadata.vocabulary_size,
            report.metadata.strategy
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, highlight: bool) -> Self {
        Self {
            include_metadata,
            highlight,
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# 📄 Resume Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Resume:** `{}` | **Job:** `{}`\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.resume_file,
                report.metadata.job_file
            ));
        }

        output.push_str("## 🔍 Overview\n\n");
        output.push_str(&format!("- Match Score: {}%\n", report.overview.score));
        output.push_str(&format!("- Total Skills in JD: {}\n", report.overview.total_jd_skills));
        output.push_str(&format!("- Matched Skills: {}\n", report.overview.matched_count));
        output.push_str(&format!("- Missing Skills: {}\n\n---\n\n", report.overview.missing_count));

        output.push_str("## ✅ Matched Skills\n");
        output.push_str(&bullet_list(&result.matched, ""));
        output.push_str("\n---\n\n## ⚠️ Missing Skills\n");
        output.push_str(&bullet_list(&result.missing, ""));
        output.push_str("\n---\n\n## 🧩 Extra Skills in CV\n");
        output.push_str(&bullet_list(&result.extra, ""));

        output.push_str("\n---\n\n## 📋 Extracted Keywords\n\n**From CV:**\n");
        output.push_str(&bullet_list(&result.cv_skills, ""));
        output.push_str("\n**From JD:**\n");
        output.push_str(&bullet_list(&result.jd_skills, ""));

        output.push_str("\n---\n\n## 📊 Skill Breakdown\n\n");
        output.push_str("| Skill | Group | Weight |\n|-------|-------|--------|\n");
        for row in &report.skill_table {
            output.push_str(&format!("| {} | {} | {} |\n", row.skill, row.group, format_weight(row)));
        }

        output.push_str("\n---\n\n## 💡 Recommendations\n\n");
        for rec in &report.recommendations {
            output.push_str(&format!("- {}\n", rec));
        }

        if self.highlight {
            output.push_str("\n---\n\n## 📌 Highlighted JD\n\n");
            output.push_str(&highlighter::render_markdown(&report.job_text, &report.highlights));
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str(&format!(
                "\n---\n\n_Report generated automatically by Resume Matcher v{} ({})._\n",
                report.metadata.matcher_version, report.metadata.strategy
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, false, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, highlight: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed, highlight),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(true, highlight),
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_match{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_match{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_match{}.md", base_name, timestamp_suffix),
    }
}
