//! Console rendering for visit outcomes. `describe` is pure and owns the
//! wording; `render` applies color. Traversal code never formats anything.

use colored::Colorize;
use prowl_scanner::PageVisit;

/// Severity bucket for one visit line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Ok,
    Denied,
    Missing,
    Other,
    Failed,
}

/// A renderable account of one visit, free of color and side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitEvent {
    pub marker: &'static str,
    pub path: String,
    pub label: String,
    pub tone: Tone,
}

pub fn describe(visit: &PageVisit) -> VisitEvent {
    match visit.status {
        Some(200) => VisitEvent {
            marker: "[+]",
            path: visit.path.clone(),
            label: "200 OK".to_string(),
            tone: Tone::Ok,
        },
        Some(403) => VisitEvent {
            marker: "[?]",
            path: visit.path.clone(),
            label: "403 Forbidden".to_string(),
            tone: Tone::Denied,
        },
        Some(404) => VisitEvent {
            marker: "[!]",
            path: visit.path.clone(),
            label: "404 Not Found".to_string(),
            tone: Tone::Missing,
        },
        Some(code) => VisitEvent {
            marker: "[-]",
            path: visit.path.clone(),
            label: code.to_string(),
            tone: Tone::Other,
        },
        None => VisitEvent {
            marker: "[!]",
            path: visit.path.clone(),
            label: visit
                .error
                .clone()
                .unwrap_or_else(|| "fetch failed".to_string()),
            tone: Tone::Failed,
        },
    }
}

pub fn render(event: &VisitEvent) -> String {
    let line = format!("{} {}   --> {}", event.marker, event.path, event.label);
    match event.tone {
        Tone::Ok => line.green().to_string(),
        Tone::Denied | Tone::Other => line.yellow().to_string(),
        Tone::Missing | Tone::Failed => line.red().to_string(),
    }
}
