pub mod cards;
pub mod detail;
pub mod report;

use serde::Serialize;
use tokio::time::Instant;

use crate::model::SchoolRecord;
use crate::score::DirectoryStats;
use crate::view::AppState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

pub(crate) fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// One line per visible record: name, region, score.
pub fn render_text(state: &AppState) -> Vec<u8> {
    let mut out = String::new();
    for r in state.visible_records().take(state.profile().display_limit) {
        out.push_str(&r.name);
        out.push('\t');
        out.push_str(&r.region);
        if let Some(score) = r.score {
            out.push('\t');
            out.push_str(&score.to_string());
        }
        out.push('\n');
    }
    out.into_bytes()
}

#[derive(Serialize)]
struct JsonSnapshot<'a> {
    section: &'static str,
    stats: DirectoryStats,
    total_matches: usize,
    records: Vec<&'a SchoolRecord>,
}

/// Visible records (up to the display limit) with the aggregate stats.
pub fn render_json(state: &AppState) -> Vec<u8> {
    let snapshot = JsonSnapshot {
        section: state.section().slug(),
        stats: state.stats(),
        total_matches: state.visible_count(),
        records: state
            .visible_records()
            .take(state.profile().display_limit)
            .collect(),
    };
    serde_json::to_vec_pretty(&snapshot).unwrap_or_else(|_| b"{}\n".to_vec())
}

pub fn render_html(state: &mut AppState, now: Instant) -> Vec<u8> {
    report::render_page(state, now).into_bytes()
}

pub fn render(format: OutputFormat, state: &mut AppState, now: Instant) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(state),
        OutputFormat::Json => render_json(state),
        OutputFormat::Html => render_html(state, now),
    }
}
