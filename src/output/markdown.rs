//! Markdown summary generation
//!
//! This module generates a human-readable report of a run: metadata, degree
//! statistics per sample, histograms and failures by reason.

use crate::output::stats::{DegreeStatistics, SampleSummary};
use crate::output::traits::{OutputResult, RunSummary};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Widest histogram bar, in characters
const BAR_WIDTH: usize = 40;

/// Writes the markdown summary of a run
///
/// # Arguments
///
/// * `summary` - The run summary data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(summary: &RunSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a run summary as markdown
pub fn format_markdown_summary(summary: &RunSummary) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Degrees of Separation from {}\n\n", summary.target_title));

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", summary.started_at));
    md.push_str(&format!("- **Finished**: {}\n", summary.finished_at));
    md.push_str(&format!(
        "- **Duration**: {} seconds ({:.2} minutes)\n",
        summary.duration_seconds,
        summary.duration_seconds as f64 / 60.0
    ));
    md.push_str(&format!("- **Config Hash**: {}\n", summary.config_hash));
    md.push_str(&format!("- **Step Limit**: {}\n", summary.max_steps));
    md.push_str(&format!("- **Requests**: {}\n", summary.requests));
    md.push_str(&format!(
        "- **Walks**: {} attempted, {} reached {}\n\n",
        summary.attempted(),
        summary.succeeded(),
        summary.target_title
    ));

    if summary.samples.is_empty() {
        md.push_str("No samples were collected.\n");
        return md;
    }

    for sample in &summary.samples {
        format_sample(&mut md, sample);
    }

    md
}

fn format_sample(md: &mut String, sample: &SampleSummary) {
    md.push_str(&format!("## {}\n\n", sample.kind));
    md.push_str(&format!("- **Attempted**: {}\n", sample.attempted));
    md.push_str(&format!("- **Reached Target**: {}\n", sample.succeeded));
    md.push_str(&format!("- **Failed**: {}\n", sample.failed()));
    md.push_str(&format!("- **Success Rate**: {:.2}%\n\n", sample.success_rate()));

    match &sample.statistics {
        Some(stats) => {
            format_statistics(md, stats);
            format_histogram(md, stats);
        }
        None => md.push_str("No walk reached the target.\n\n"),
    }

    if !sample.failures.is_empty() {
        md.push_str("### Failures\n\n");
        md.push_str("| Reason | Count |\n");
        md.push_str("|--------|-------|\n");
        for (reason, count) in &sample.failures {
            md.push_str(&format!("| {} | {} |\n", reason, count));
        }
        md.push('\n');
    }

    if !sample.rank_vs_degrees.is_empty() {
        md.push_str("### Rank vs Degrees\n\n");
        md.push_str("| Rank | Degrees |\n");
        md.push_str("|------|---------|\n");
        for (rank, degrees) in &sample.rank_vs_degrees {
            md.push_str(&format!("| {} | {} |\n", rank, degrees));
        }
        md.push('\n');
    }

    if !sample.categories.is_empty() {
        md.push_str("### Categories\n\n");
        md.push_str("| Table | Category | Most Viewed | Walks | Median | Q1 | Q3 | Views #1 | Views #10 | Views #30 |\n");
        md.push_str("|-------|----------|-------------|-------|--------|----|----|----------|-----------|-----------|\n");

        for category in &sample.categories {
            let (count, median, q1, q3) = match &category.statistics {
                Some(s) => (
                    s.count.to_string(),
                    format!("{:.1}", s.median),
                    format!("{:.1}", s.q1),
                    format!("{:.1}", s.q3),
                ),
                None => ("0".to_string(), "-".to_string(), "-".to_string(), "-".to_string()),
            };
            let views: Vec<String> = category
                .popularity_at
                .iter()
                .map(|(_, p)| p.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string()))
                .collect();

            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
                category.category_id,
                category.name.as_deref().unwrap_or("-"),
                category.top_text,
                count,
                median,
                q1,
                q3,
                views.join(" | ")
            ));
        }
        md.push('\n');
    }
}

fn format_statistics(md: &mut String, stats: &DegreeStatistics) {
    md.push_str("### Degrees\n\n");
    md.push_str("| Min | Q1 | Median | Q3 | Max | Mean |\n");
    md.push_str("|-----|----|--------|----|-----|------|\n");
    md.push_str(&format!(
        "| {} | {:.1} | {:.1} | {:.1} | {} | {:.2} |\n\n",
        stats.min, stats.q1, stats.median, stats.q3, stats.max, stats.mean
    ));
}

fn format_histogram(md: &mut String, stats: &DegreeStatistics) {
    let peak = stats.histogram.values().copied().max().unwrap_or(0);

    md.push_str("### Histogram\n\n");
    md.push_str("```\n");
    for (degrees, count) in &stats.histogram {
        let bar = if peak == 0 {
            0
        } else {
            ((count * BAR_WIDTH) + peak - 1) / peak
        };
        md.push_str(&format!(
            "{:>3} | {:<width$} {}\n",
            degrees,
            "#".repeat(bar),
            count,
            width = BAR_WIDTH
        ));
    }
    md.push_str("```\n\n");
}
