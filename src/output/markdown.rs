//! Markdown report generation
//!
//! This module writes one report per language variant plus a combined report
//! covering every variant. Each issue appears once in its language report and
//! once in the combined report.

use crate::crawler::{LanguageReport, LinkResult, SiteReport};
use crate::output::traits::{OutputResult, ReportSink};
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Table cell limits for the title, URL and reason columns
const TITLE_CELL_CHARS: usize = 50;
const URL_CELL_CHARS: usize = 60;
const REASON_CELL_CHARS: usize = 80;

/// Writes Markdown reports into an output directory
#[derive(Debug, Clone)]
pub struct MarkdownReport {
    output_dir: PathBuf,
    generated_at: DateTime<Local>,
}

impl MarkdownReport {
    /// Creates a sink writing into `output_dir`, stamped with the current time
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            generated_at: Local::now(),
        }
    }

    /// Overrides the generation time used in file names and headers
    pub fn generated_at(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn file_stamp(&self) -> String {
        self.generated_at.format("%Y%m%d_%H%M%S").to_string()
    }

    fn header_stamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl ReportSink for MarkdownReport {
    fn write(&self, report: &SiteReport) -> OutputResult<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir)?;

        let stamp = self.file_stamp();
        let generated = self.header_stamp();
        let mut files = Vec::with_capacity(report.languages.len() + 1);

        for (language, stem) in report.languages.iter().zip(language_file_stems(report)) {
            let path = self
                .output_dir
                .join(format!("link_analysis_{}_{}.md", stem, stamp));
            write_file(&path, &format_language_report(report, language, &generated))?;
            tracing::info!("Wrote {} report to {}", language.language.code, path.display());
            files.push(path);
        }

        let combined = self
            .output_dir
            .join(format!("link_analysis_combined_{}.md", stamp));
        write_file(&combined, &format_combined_report(report, &generated))?;
        tracing::info!("Wrote combined report to {}", combined.display());
        files.push(combined);

        Ok(files)
    }
}

/// File name part for each variant, in report order
///
/// Codes come from page links, so anything outside `[A-Za-z0-9_-]` becomes
/// `_`. Stems stay unique case-insensitively and never equal `combined`.
fn language_file_stems(report: &SiteReport) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::from(["combined".to_string()]);

    report
        .languages
        .iter()
        .map(|language| {
            let base = safe_file_component(&language.language.code);
            let mut stem = base.clone();
            let mut n = 2;
            while !used.insert(stem.to_lowercase()) {
                stem = format!("{}_{}", base, n);
                n += 1;
            }
            stem
        })
        .collect()
}

fn safe_file_component(code: &str) -> String {
    let safe: String = code
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();

    if safe.is_empty() {
        "unknown".to_string()
    } else {
        safe
    }
}

fn write_file(path: &Path, contents: &str) -> OutputResult<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

/// Formats the report for a single language variant
pub fn format_language_report(
    report: &SiteReport,
    language: &LanguageReport,
    generated: &str,
) -> String {
    let code = language.language.code.to_uppercase();
    let mut md = String::new();

    md.push_str(&format!("# Website Link Analysis Report - {}\n\n", code));
    push_metadata(&mut md, report, generated);
    md.push_str(&format!(
        "- **Language**: {} ({})\n",
        code, language.language.display_name
    ));
    md.push_str(&format!("- **Entry URL**: {}\n\n", language.language.entry_url));

    md.push_str("## Summary\n\n");

    if let Some(failure) = &language.failure {
        md.push_str(&format!("Analysis of {} failed: {}\n", code, failure));
        return md;
    }

    md.push_str(&format!(
        "Found {} problematic links in {}\n\n",
        language.results.len(),
        code
    ));

    if language.results.is_empty() {
        md.push_str(&format!(
            "No issues found in {}! All links are working properly and content is relevant.\n",
            code
        ));
    } else {
        push_results_table(&mut md, &language.results);
    }

    md
}

/// Formats the report covering every language variant
pub fn format_combined_report(report: &SiteReport, generated: &str) -> String {
    let mut md = String::new();

    md.push_str("# Multi-Language Website Link Analysis Report\n\n");
    push_metadata(&mut md, report, generated);
    md.push('\n');

    let total_issues = report.total_issues();
    md.push_str("## Overall Summary\n\n");
    md.push_str(&format!(
        "Found {} total issues across all languages\n\n",
        total_issues
    ));

    md.push_str("| Language | Issues |\n");
    md.push_str("|----------|--------|\n");
    for language in &report.languages {
        let issues = match &language.failure {
            Some(_) => "analysis failed".to_string(),
            None => language.results.len().to_string(),
        };
        md.push_str(&format!(
            "| {} | {} |\n",
            language.language.code.to_uppercase(),
            issues
        ));
    }
    md.push('\n');

    let failed = report.failed_languages();
    if !failed.is_empty() {
        md.push_str("## Failed Languages\n\n");
        for language in failed {
            md.push_str(&format!(
                "- **{}**: {}\n",
                language.language.code.to_uppercase(),
                language.failure.as_deref().unwrap_or_default()
            ));
        }
        md.push('\n');
    }

    for language in report.languages.iter().filter(|l| !l.results.is_empty()) {
        md.push_str(&format!(
            "## Issues in {}\n\n",
            language.language.code.to_uppercase()
        ));
        push_results_table(&mut md, &language.results);
        md.push('\n');
    }

    if total_issues == 0 {
        md.push_str("No issues found across all languages! All links are working properly.\n");
    }

    md
}

fn push_metadata(md: &mut String, report: &SiteReport, generated: &str) {
    md.push_str(&format!("- **Website**: {}\n", report.source_url));
    md.push_str(&format!("- **Generated**: {}\n", generated));
    if !report.goal.is_empty() {
        md.push_str(&format!(
            "- **Site Goal**: {}\n",
            table_cell(&report.goal, REASON_CELL_CHARS)
        ));
    }
    if let Some(hash) = &report.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
}

fn push_results_table(md: &mut String, results: &[LinkResult]) {
    md.push_str("| Page/Link Title | URL | Status | Issue Description |\n");
    md.push_str("|-----------------|-----|--------|-------------------|\n");

    for result in results {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            table_cell(&result.title, TITLE_CELL_CHARS),
            table_cell(result.url.as_str(), URL_CELL_CHARS),
            result.status,
            table_cell(&result.reason, REASON_CELL_CHARS)
        ));
    }
}

/// Truncates text to `max_chars` characters, appending `...` when cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Truncates text and makes it safe inside a Markdown table row
fn table_cell(text: &str, max_chars: usize) -> String {
    truncate(&text.replace(['\n', '\r'], " "), max_chars).replace('|', "\\|")
}
