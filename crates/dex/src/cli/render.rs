//! # Rendering Module
//!
//! Turns `CmdResult` pieces into terminal strings. Every function here returns
//! a `String` instead of printing, so the output can be asserted on in tests;
//! `commands.rs` does the actual writing.
//!
//! Layout calculations (width, truncation, padding) are Unicode-aware via
//! `unicode-width`. Colors come from `colored`, which honors `NO_COLOR` and
//! non-terminal output on its own.

use chrono::{DateTime, Utc};
use colored::*;
use dexapp::commands::{CmdMessage, MessageLevel};
use dexapp::config::DexConfig;
use dexapp::model::{ALL_TYPES, CreatureDetail, FilterCriteria, HistoryEntry};
use dexapp::query::QueryView;
use std::fmt::Write as _;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

pub const LINE_WIDTH: usize = 80;
pub const ID_WIDTH: usize = 7;
pub const TIME_WIDTH: usize = 16;
const STAT_BAR_MAX: u32 = 255;
const STAT_BAR_WIDTH: usize = 30;

/// Renders one page of results with a header and a footer.
pub fn render_page(view: &QueryView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", describe_criteria(&view.criteria).bold());

    if view.is_loading {
        let _ = writeln!(out, "{}", "Loading...".dimmed());
    }

    for entry in &view.items {
        let id = entry
            .reference_id
            .map(|id| format!("#{}", id))
            .unwrap_or_else(|| "#?".to_string());
        let id_col = format!("{:>width$}  ", id, width = ID_WIDTH);
        let available = LINE_WIDTH.saturating_sub(id_col.width());
        let _ = writeln!(
            out,
            "{}{}",
            id_col.dimmed(),
            truncate_to_width(&entry.name, available)
        );
    }

    if view.total_count > 0 {
        let _ = writeln!(out, "{}", page_footer(view).dimmed());
    }
    out
}

/// "Page 2 of 3 (57 results)"
pub fn page_footer(view: &QueryView) -> String {
    let noun = if view.total_count == 1 {
        "result"
    } else {
        "results"
    };
    format!(
        "Page {} of {} ({} {})",
        view.page, view.total_pages, view.total_count, noun
    )
}

pub fn describe_criteria(criteria: &FilterCriteria) -> String {
    match (criteria.has_name_filter(), criteria.has_type_filter()) {
        (false, false) => "All creatures".to_string(),
        (true, false) => format!("Name contains \"{}\"", criteria.name_term),
        (false, true) => format!("Type: {}", criteria.type_tag),
        (true, true) => format!(
            "Name contains \"{}\", type: {}",
            criteria.name_term, criteria.type_tag
        ),
    }
}

/// Label shown for a history entry: the term, else the type, else a
/// catch-all.
pub fn history_label(entry: &HistoryEntry) -> String {
    if !entry.term.is_empty() {
        entry.term.clone()
    } else if !entry.type_tag.is_empty() && entry.type_tag != ALL_TYPES {
        format!("Type: {}", entry.type_tag)
    } else {
        "All creatures".to_string()
    }
}

pub fn render_history(entries: &[HistoryEntry], now: DateTime<Utc>) -> String {
    let mut out = String::new();

    for (i, entry) in entries.iter().enumerate() {
        let idx = format!("{:>3}. ", i + 1);
        let mut label = history_label(entry);
        if !entry.term.is_empty() && entry.type_tag != ALL_TYPES && !entry.type_tag.is_empty() {
            label = format!("{} [{}]", label, entry.type_tag);
        }

        let when = DateTime::parse_from_rfc3339(&entry.timestamp)
            .map(|ts| format_time_ago(ts.with_timezone(&Utc), now))
            .unwrap_or_else(|_| entry.timestamp.clone());
        let when = format!("{:>width$}", when, width = TIME_WIDTH);

        let available = LINE_WIDTH.saturating_sub(idx.width() + TIME_WIDTH + 1);
        let label = truncate_to_width(&label, available);
        let padding = available.saturating_sub(label.width());

        let _ = writeln!(
            out,
            "{}{}{} {}",
            idx.yellow(),
            label,
            " ".repeat(padding),
            when.dimmed()
        );
    }
    out
}

pub fn render_detail(detail: &CreatureDetail, fallback_image: Option<&str>) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}",
        format!("#{}", detail.id).yellow(),
        detail.name.bold()
    );
    let _ = writeln!(out, "{}", "-".repeat(32));
    let _ = writeln!(out, "Types:   {}", detail.types.join(", "));
    // Height in decimetres, weight in hectograms
    let _ = writeln!(
        out,
        "Height:  {:.1} m",
        f64::from(detail.height) / 10.0
    );
    let _ = writeln!(
        out,
        "Weight:  {:.1} kg",
        f64::from(detail.weight) / 10.0
    );

    if !detail.abilities.is_empty() {
        let abilities: Vec<String> = detail
            .abilities
            .iter()
            .map(|a| {
                if a.is_hidden {
                    format!("{} (hidden)", a.name)
                } else {
                    a.name.clone()
                }
            })
            .collect();
        let _ = writeln!(out, "Abilities: {}", abilities.join(", "));
    }

    if !detail.stats.is_empty() {
        let _ = writeln!(out);
        let name_width = detail
            .stats
            .iter()
            .map(|s| s.name.width())
            .max()
            .unwrap_or(0);
        for stat in &detail.stats {
            let filled = (stat.base_stat.min(STAT_BAR_MAX) as usize * STAT_BAR_WIDTH)
                / STAT_BAR_MAX as usize;
            let _ = writeln!(
                out,
                "{:<name_width$}  {:>3} {}",
                stat.name,
                stat.base_stat,
                "█".repeat(filled).as_str().green(),
                name_width = name_width
            );
        }
    }

    if let Some(image) = detail.artwork_url.as_deref().or(fallback_image) {
        let _ = writeln!(out);
        let _ = writeln!(out, "Image:   {}", image.underline());
    }
    out
}

pub fn render_types(types: &[String]) -> String {
    let mut out = String::new();
    for t in types {
        if t == ALL_TYPES {
            let _ = writeln!(out, "{} {}", t, "(no type filter)".dimmed());
        } else {
            let _ = writeln!(out, "{}", t);
        }
    }
    out
}

pub fn render_config(config: &DexConfig, data_dir: &Path, config_file: &Path) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", "data dir:".dimmed(), data_dir.display());
    let source = if config_file.exists() {
        config_file.display().to_string()
    } else {
        format!("{} (not present, using defaults)", config_file.display())
    };
    let _ = writeln!(out, "{} {}", "config:".dimmed(), source);
    let _ = writeln!(out);

    let rows = [
        ("base_url", config.base_url.clone()),
        ("sprite_base_url", config.sprite_base_url.clone()),
        ("catalog_limit", config.catalog_limit.to_string()),
        ("page_size", config.page_size.to_string()),
        ("history_limit", config.history_limit.to_string()),
        ("request_timeout_secs", config.request_timeout_secs.to_string()),
        ("cache_type_members", config.cache_type_members.to_string()),
    ];
    let key_width = rows.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    for (key, value) in rows {
        let _ = writeln!(out, "{:<key_width$} = {}", key, value, key_width = key_width);
    }
    out
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.normal(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        let _ = writeln!(out, "{}", line);
    }
    out
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

pub fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}
