use crate::classify::SuspectReason;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Outcome of one fetch attempt against a frontier path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageVisit {
    pub path: String,
    pub depth: usize,
    /// Response status, or `None` when the transport failed outright.
    pub status: Option<u16>,
    pub error: Option<String>,
}

/// One candidate string that could not be resolved to a followable URL.
/// Entries are append-only and never deduplicated; repeated detections
/// across pages are all recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspiciousEntry {
    pub origin: String,
    pub raw_value: String,
    pub reason: SuspectReason,
}

/// Terminal aggregate of one crawl invocation: every visit outcome in
/// fetch order, plus everything routed away from the frontier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlReport {
    pub visits: Vec<PageVisit>,
    /// Referenced hosts other than the target, keyed `host[:port]`.
    pub external_domains: BTreeSet<String>,
    pub suspicious: Vec<SuspiciousEntry>,
}
