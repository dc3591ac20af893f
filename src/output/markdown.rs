//! Markdown summary generation
//!
//! Renders a crawl response as a human-readable report: run information,
//! crawl counters, and one answers table per category.

use crate::output::response::CrawlResponse;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Maximum potential answers listed per clue in the report
const MAX_ALTERNATIVES: usize = 5;

/// Writes a markdown summary of `response` to `output_path`
pub fn generate_markdown_summary(response: &CrawlResponse, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(response);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl response as markdown
pub fn format_markdown_summary(response: &CrawlResponse) -> String {
    let mut md = String::new();

    md.push_str("# Clue-Harvest Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Status**: {:?}\n", response.status));
    if let Some(error) = &response.error {
        md.push_str(&format!("- **Error**: {}\n", error));
    }
    md.push_str(&format!("- **Complete**: {}\n", response.complete));
    md.push_str(&format!("- **Started**: {}\n", response.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", response.finished_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {} seconds\n\n",
        response.duration_seconds()
    ));

    // Counters
    let stats = &response.stats;
    md.push_str("## Crawl Statistics\n\n");
    md.push_str("| Counter | Value |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!(
        "| Categories discovered | {} |\n",
        stats.categories_discovered
    ));
    md.push_str(&format!(
        "| Categories selected | {} |\n",
        stats.categories_selected
    ));
    md.push_str(&format!("| Listing pages | {} |\n", stats.listing_pages));
    md.push_str(&format!("| Clue pages | {} |\n", stats.clue_pages));
    md.push_str(&format!("| Sub-clue pages | {} |\n", stats.sub_clue_pages));
    md.push_str(&format!("| Records | {} |\n", stats.records));
    md.push_str(&format!("| Failures | {} |\n", stats.total_failures()));
    md.push_str(&format!(
        "| Answer expansions | {} |\n",
        stats.reveal_expansions
    ));
    md.push_str(&format!(
        "| Expansion caps hit | {} |\n\n",
        stats.reveal_caps_hit
    ));

    // One section per category
    for group in response.results.groups() {
        let heading = if group.category.is_empty() {
            "(uncategorized)"
        } else {
            group.category.as_str()
        };
        md.push_str(&format!("## {}\n\n", escape_cell(heading)));
        md.push_str(&format!("Clues: {}\n\n", group.content.len()));
        md.push_str("| Clue | Date | Answer | Alternatives |\n");
        md.push_str("|------|------|--------|--------------|\n");

        for record in &group.content {
            let alternatives = record
                .potential_answers
                .iter()
                .take(MAX_ALTERNATIVES)
                .map(|p| {
                    if p.confidence.is_empty() {
                        p.answer.clone()
                    } else {
                        format!("{} ({})", p.answer, p.confidence)
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");

            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                escape_cell(&record.title),
                escape_cell(&record.date),
                escape_cell(&record.answer),
                escape_cell(&alternatives)
            ));
        }
        md.push('\n');
    }

    md
}

/// Keeps pipes and newlines from breaking a table row
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
