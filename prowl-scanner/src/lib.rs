pub mod classify;
pub mod crawler;
pub mod error;
pub mod export;
pub mod extract;
pub mod path;
pub mod result;

pub use classify::{Classification, SuspectReason};
pub use crawler::{Crawler, HttpTransport, Transport};
pub use error::ScanError;
pub use result::{CrawlReport, PageVisit, SuspiciousEntry};
