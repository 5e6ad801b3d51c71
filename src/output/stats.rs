//! Console summary of a finished run

use crate::crawler::SiteReport;
use crate::output::markdown::truncate;
use std::path::PathBuf;

/// Issues shown per language before eliding the rest
const ISSUES_PER_LANGUAGE: usize = 3;

/// Formats the end-of-run summary
///
/// # Arguments
///
/// * `report` - The finished analysis
/// * `files` - Report files that were written
pub fn format_summary(report: &SiteReport, files: &[PathBuf]) -> String {
    let mut out = String::new();

    out.push_str("\n=== Analysis Complete ===\n");
    out.push_str(&format!(
        "Analyzed {} language versions\n",
        report.languages.len()
    ));
    out.push_str(&format!(
        "Found {} total problematic links\n",
        report.total_issues()
    ));

    if !files.is_empty() {
        out.push_str("\nReports generated:\n");
        for file in files {
            out.push_str(&format!("- {}\n", file.display()));
        }
    }

    out.push_str("\nIssues by language:\n");
    for language in &report.languages {
        let code = language.language.code.to_uppercase();

        if let Some(failure) = &language.failure {
            out.push_str(&format!("- {}: analysis failed ({})\n", code, failure));
            continue;
        }

        out.push_str(&format!("- {}: {} issues\n", code, language.results.len()));
        for result in language.results.iter().take(ISSUES_PER_LANGUAGE) {
            out.push_str(&format!(
                "  • {}: {} - {}\n",
                truncate(&result.title, 50),
                result.status,
                truncate(&result.reason, 50)
            ));
        }
        if language.results.len() > ISSUES_PER_LANGUAGE {
            out.push_str(&format!(
                "  • ... and {} more (see reports)\n",
                language.results.len() - ISSUES_PER_LANGUAGE
            ));
        }
    }

    out
}

/// Prints the end-of-run summary to stdout
pub fn print_summary(report: &SiteReport, files: &[PathBuf]) {
    print!("{}", format_summary(report, files));
}
