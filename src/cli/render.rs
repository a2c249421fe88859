//! Console rendering for catalog listings.
//!
//! Renderers return the finished text so the dispatcher decides where it
//! goes. Cells are padded before they are colored.

use std::fmt::{self, Write};

use colored::*;

use crate::application::services::TypeGroup;
use crate::domain::entities::LinkEntry;

const NAME_WIDTH: usize = 20;
const URL_WIDTH: usize = 30;
const TYPE_WIDTH: usize = 12;
const TAGS_WIDTH: usize = 21;
const TAGS_PREVIEW_CHARS: usize = 18;

/// Pads `text` to `width` characters, cutting it with `…` when longer.
fn cell(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    } else {
        format!("{text:<width$}")
    }
}

/// First characters of the joined tags followed by `...`; empty without tags.
fn tags_preview(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let joined: String = tags.join(", ").chars().take(TAGS_PREVIEW_CHARS).collect();
    format!("{joined}...")
}

fn rating_label(rating: f64) -> String {
    format!("{rating:.1}★")
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Collects what `write` produces into a string.
fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    // fmt::Write for String never fails
    let _ = write(&mut out);
    out
}

/// Numbered table of the whole catalog.
///
/// ```text
/// 🔗 OSINT Useful Links
///
///   #    Name                 URL                            Type         Tags                  Rating
///   ──────────────────────────────────────────────────────────────────────────────────────────────────
///   1    example.com          https://example.com            website                            0.0★
/// ```
pub fn entry_table(entries: &[LinkEntry]) -> String {
    render(|out| write_entry_table(out, entries))
}

fn write_entry_table(out: &mut String, entries: &[LinkEntry]) -> fmt::Result {
    writeln!(out, "{}", "🔗 OSINT Useful Links".bright_blue().bold())?;
    writeln!(out)?;
    writeln!(
        out,
        "  {} {} {} {} {} {}",
        cell("#", 4).bright_white().bold(),
        cell("Name", NAME_WIDTH).bright_white().bold(),
        cell("URL", URL_WIDTH).bright_white().bold(),
        cell("Type", TYPE_WIDTH).bright_white().bold(),
        cell("Tags", TAGS_WIDTH).bright_white().bold(),
        "Rating".bright_white().bold()
    )?;
    writeln!(out, "  {}", "─".repeat(98).bright_black())?;

    for (index, entry) in entries.iter().enumerate() {
        writeln!(
            out,
            "  {} {} {} {} {} {}",
            cell(&(index + 1).to_string(), 4).bright_black(),
            cell(&entry.name, NAME_WIDTH).cyan(),
            format!("{:<width$}", entry.link, width = URL_WIDTH).blue(),
            cell(&entry.entry_type, TYPE_WIDTH).magenta(),
            cell(&tags_preview(&entry.tags), TAGS_WIDTH).yellow(),
            rating_label(entry.metrics.rating).green()
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "  Total: {}",
        entries.len().to_string().bright_white().bold()
    )
}

/// Table of search results.
pub fn search_table(query: &str, entries: &[LinkEntry]) -> String {
    render(|out| write_search_table(out, query, entries))
}

fn write_search_table(out: &mut String, query: &str, entries: &[LinkEntry]) -> fmt::Result {
    writeln!(
        out,
        "{}",
        format!("🔍 Search Results for '{query}'").bright_blue().bold()
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "  {} {} {} {}",
        cell("Name", NAME_WIDTH).bright_white().bold(),
        cell("URL", URL_WIDTH).bright_white().bold(),
        cell("Type", TYPE_WIDTH).bright_white().bold(),
        "Rating".bright_white().bold()
    )?;
    writeln!(out, "  {}", "─".repeat(72).bright_black())?;

    for entry in entries {
        writeln!(
            out,
            "  {} {} {} {}",
            cell(&entry.name, NAME_WIDTH).cyan(),
            format!("{:<width$}", entry.link, width = URL_WIDTH).blue(),
            cell(&entry.entry_type, TYPE_WIDTH).magenta(),
            rating_label(entry.metrics.rating).green()
        )?;
    }

    Ok(())
}

/// Detail block for a single entry.
pub fn entry_details(entry: &LinkEntry) -> String {
    render(|out| write_entry_details(out, entry))
}

fn write_entry_details(out: &mut String, entry: &LinkEntry) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", entry.name.cyan().bold())?;
    writeln!(out, "{}", entry.link.blue())?;
    writeln!(out)?;
    writeln!(out, "{} {}", "Description:".bold(), entry.description)?;
    writeln!(out)?;

    let rating = format!(
        "{:.1} (based on {} reviews)",
        entry.metrics.rating, entry.metrics.rating_count
    );

    let rows: [(&str, String); 13] = [
        ("URL", entry.link.clone()),
        ("Type", entry.entry_type.clone()),
        ("Subtypes", entry.subtypes.join(", ")),
        ("Tags", entry.tags.join(", ")),
        ("Roles", entry.roles.join(", ")),
        ("Language", entry.language.clone()),
        ("Cost", entry.cost.clone()),
        ("Requires Account", yes_no(entry.requires_account).to_string()),
        ("API Available", yes_no(entry.api_available).to_string()),
        ("Rating", rating),
        ("Data Types", entry.data_types.join(", ")),
        ("Date Collected", entry.date_collected.clone()),
        ("Last Updated", entry.date_updated.clone()),
    ];

    for (label, value) in rows {
        writeln!(out, "  {} {}", format!("{label:<18}").cyan(), value)?;
    }

    Ok(())
}

/// Type headings with subtype sub-headings, each listing name and link.
pub fn grouped_view(groups: &[TypeGroup]) -> String {
    render(|out| write_grouped_view(out, groups))
}

fn write_grouped_view(out: &mut String, groups: &[TypeGroup]) -> fmt::Result {
    for group in groups {
        writeln!(out, "{}", group.entry_type.magenta().bold())?;

        for subtype in &group.subtypes {
            writeln!(out, "  {}", subtype.subtype.yellow())?;

            for entry in &subtype.entries {
                writeln!(
                    out,
                    "    {} {}",
                    cell(&entry.name, NAME_WIDTH).cyan(),
                    entry.link.blue()
                )?;
            }
        }

        writeln!(out)?;
    }

    Ok(())
}
