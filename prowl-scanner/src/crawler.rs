//! Breadth-first crawl engine: pop a path, fetch it, harvest candidates,
//! classify each one, and enqueue whatever is internal and unseen.

use crate::classify::{self, Classification};
use crate::error::{Result, ScanError};
use crate::extract;
use crate::path;
use crate::result::{CrawlReport, PageVisit, SuspiciousEntry};
use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub type VisitCallback = Arc<dyn Fn(&PageVisit) + Send + Sync>;

/// Transport collaborator: issue one GET and hand back status plus body.
/// `None` covers every network-level failure (connect error, timeout,
/// unreadable body); the crawl treats it as a per-path outcome, never a
/// reason to stop. Headers are not surfaced.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<(u16, String)>;
}

/// Transport backed by a shared reqwest client.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent("Prowl/0.2 (https://github.com/trapdoorsec/prowl)")
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(10)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Option<(u16, String)> {
        debug!("Fetching {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request failed for {}: {}", url, e);
                return None;
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => Some((status, body)),
            Err(e) => {
                warn!("Failed to read body from {}: {}", url, e);
                None
            }
        }
    }
}

/// Mutable traversal state for one crawl invocation. Nothing here outlives
/// the call that created it.
struct CrawlContext {
    frontier: VecDeque<(String, usize)>,
    /// Paths currently sitting in the frontier.
    pending: HashSet<String>,
    /// Paths whose fetch has been attempted. Insertion happens at dequeue
    /// time, immediately before the fetch.
    visited: HashSet<String>,
}

impl CrawlContext {
    fn new() -> Self {
        let mut frontier = VecDeque::new();
        frontier.push_back(("/".to_string(), 0));
        let mut pending = HashSet::new();
        pending.insert("/".to_string());

        Self {
            frontier,
            pending,
            visited: HashSet::new(),
        }
    }
}

pub struct Crawler<T: Transport> {
    transport: T,
    max_depth: Option<usize>,
    visit_callback: Option<VisitCallback>,
}

impl<T: Transport> Crawler<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_depth: None,
            visit_callback: None,
        }
    }

    /// Bound how far link expansion is followed. Pages one hop past the
    /// ceiling are still probed; their discoveries are not.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Called with each visit outcome as it happens, in fetch order.
    pub fn with_visit_callback(mut self, callback: VisitCallback) -> Self {
        self.visit_callback = Some(callback);
        self
    }

    /// Crawl the target site breadth-first from its root path and return
    /// the terminal aggregate. The target's own path/query are discarded;
    /// the seed is always `/` at depth 0.
    pub async fn crawl(&self, target: &str) -> Result<CrawlReport> {
        let mut base_root = Url::parse(target)
            .map_err(|e| ScanError::InvalidUrl(format!("{target}: {e}")))?;
        if base_root.host_str().is_none() {
            return Err(ScanError::InvalidUrl(format!("{target} has no host")));
        }
        base_root.set_path("/");
        base_root.set_query(None);
        base_root.set_fragment(None);

        let base_domain = classify::host_key(&base_root);
        info!("Starting crawl of {}", base_domain);

        let mut ctx = CrawlContext::new();
        let mut report = CrawlReport::default();

        while let Some((current, depth)) = ctx.frontier.pop_front() {
            ctx.pending.remove(&current);

            if ctx.visited.contains(&current) {
                continue;
            }
            if let Some(max) = self.max_depth
                && depth > max.saturating_add(1)
            {
                // Skipped entries stay unvisited; anything reachable only
                // through them is never enqueued.
                debug!("Skipping {} at depth {} (limit {})", current, depth, max);
                continue;
            }
            ctx.visited.insert(current.clone());

            let fetch_url = build_fetch_url(&base_root, &current);
            let mut visit = PageVisit {
                path: current.clone(),
                depth,
                status: None,
                error: None,
            };

            match self.transport.fetch(&fetch_url).await {
                None => {
                    warn!("Fetch failed for {}", fetch_url);
                    visit.error = Some(format!("failed to fetch {fetch_url}"));
                }
                Some((status, body)) => {
                    visit.status = Some(status);
                    if status == 200 {
                        harvest(&body, &current, depth, &base_root, &base_domain, &mut ctx, &mut report);
                    }
                }
            }

            if let Some(ref callback) = self.visit_callback {
                callback(&visit);
            }
            report.visits.push(visit);
        }

        info!("Crawl complete. Visited {} paths", report.visits.len());
        Ok(report)
    }
}

/// Run extraction and classification over one fetched body, feeding the
/// frontier and the report.
fn harvest(
    body: &str,
    current: &str,
    depth: usize,
    base_root: &Url,
    base_domain: &str,
    ctx: &mut CrawlContext,
    report: &mut CrawlReport,
) {
    let document = Html::parse_document(body);

    for candidate in extract::extract(&document) {
        match classify::classify(&candidate, current, base_root, base_domain) {
            Classification::Internal(path) => {
                if !ctx.visited.contains(&path) && !ctx.pending.contains(&path) {
                    debug!("Queueing {} at depth {}", path, depth + 1);
                    ctx.pending.insert(path.clone());
                    ctx.frontier.push_back((path, depth + 1));
                }
            }
            Classification::External(domain) => {
                report.external_domains.insert(domain);
            }
            Classification::StaticAsset => {}
            Classification::Suspicious(reason) => {
                report.suspicious.push(SuspiciousEntry {
                    origin: current.to_string(),
                    raw_value: candidate.value,
                    reason,
                });
            }
        }
    }
}

/// Directories are probed with a trailing slash so relative links in the
/// response resolve against the directory rather than a sibling file.
fn build_fetch_url(base_root: &Url, path: &str) -> String {
    let mut url = base_root.clone();
    if path == "/" || path::is_file_path(path) {
        url.set_path(path);
    } else {
        url.set_path(&format!("{path}/"));
    }
    url.to_string()
}
