use chrono::{DateTime, Utc};
use colored::Colorize;
use complab::api::{CmdMessage, MessageLevel};
use complab::config::{ComplabConfig, KEYS};
use complab::model::{Component, StoredEntry};
use std::path::Path;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const FRAMEWORK_WIDTH: usize = 12;
const PREVIEW_MARKER: &str = "◉";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// One line per entry: index, name and tags, the shard it lives under, age.
pub(super) fn print_components(entries: &[StoredEntry]) {
    for (i, entry) in entries.iter().enumerate() {
        let meta = &entry.meta;
        let idx_str = format!("{:>3}. ", i + 1);
        let marker = if meta.previewable {
            format!("{} ", PREVIEW_MARKER)
        } else {
            "  ".to_string()
        };
        let framework = format!("{:<width$}", entry.shard, width = FRAMEWORK_WIDTH);

        let label = if meta.tags.is_empty() {
            format!("{} ({})", meta.name, meta.id)
        } else {
            format!("{} ({}) #{}", meta.name, meta.id, meta.tags.join(" #"))
        };

        let fixed_width = idx_str.width() + marker.width() + FRAMEWORK_WIDTH + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let label = truncate_to_width(&label, available);
        let padding = available.saturating_sub(label.width());

        println!(
            "{}{}{}{}{}{}",
            idx_str.yellow(),
            marker,
            label,
            " ".repeat(padding),
            framework.cyan(),
            format_time_ago(meta.updated).dimmed()
        );
    }
}

pub(super) fn print_component(component: &Component, path: Option<&Path>) {
    let meta = &component.meta;
    println!("{} {}", meta.name.bold(), format!("({})", meta.id).yellow());
    if !meta.description.is_empty() {
        println!("{}", meta.description);
    }
    println!("--------------------------------");
    let fields = [
        ("framework", meta.framework.clone()),
        ("platform", meta.platform.clone()),
        ("language", meta.language.clone()),
        ("version", meta.version.clone()),
        ("author", meta.author.clone()),
        ("tags", meta.tags.join(", ")),
        ("main file", meta.main_file.clone()),
        ("styles", meta.external_styles.join(", ")),
        ("created", meta.created.to_rfc3339()),
        ("updated", meta.updated.to_rfc3339()),
    ];
    for (label, value) in fields.iter().filter(|(_, v)| !v.is_empty()) {
        println!("{:>10}: {}", label.dimmed(), value);
    }
    let mut flags = Vec::new();
    if meta.previewable {
        flags.push("previewable");
    }
    if meta.snippet {
        flags.push("snippet");
    }
    if meta.partial_import {
        flags.push("partial import");
    }
    if !flags.is_empty() {
        println!("{:>10}: {}", "flags".dimmed(), flags.join(", "));
    }
    if let Some(path) = path {
        println!("{:>10}: {}", "path".dimmed(), path.display());
    }

    for name in &meta.source_files {
        let content = component.files.get(name).map(String::as_str).unwrap_or("");
        let title = if name == &meta.main_file {
            format!("{} (main)", name)
        } else {
            name.clone()
        };
        println!("\n================================ {}", title.bold());
        println!("{}", content);
    }
}

pub(super) fn print_config(config: &ComplabConfig) {
    for key in KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{} = {}", key, value);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
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

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
