use crate::render;
use clap::ArgMatches;
use colored::Colorize;
use prowl_scanner::{CrawlReport, Crawler, HttpTransport, PageVisit, export};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber;
use url::Url;

const BANNER: &str = r#"
    ___  _______ _    __/ /
   / _ \/ __/ _ \ |/|/ / /
  / .__/_/  \___/__,__/_/
 /_/
"#;

pub fn print_banner() {
    println!("{}", BANNER.bright_blue().bold());
    println!(
        "  {} v{}",
        "prowl - single-site path discovery".bright_white(),
        env!("CARGO_PKG_VERSION")
    );
    println!("  {}\n", "For authorized security testing only.".dimmed());
}

/// Parse the positional target, trying http:// when no scheme is given.
pub fn parse_target(raw: &str) -> Option<String> {
    let line = raw.trim().trim_end_matches('/');
    if line.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(line)
        && url.host_str().is_some()
    {
        return Some(line.to_string());
    }

    let with_scheme = format!("http://{line}");
    match Url::parse(&with_scheme) {
        Ok(url) if url.host_str().is_some() => Some(with_scheme),
        _ => None,
    }
}

/// Lenient depth parsing: anything that is not a non-negative integer
/// leaves the crawl unbounded.
pub fn parse_max_depth(raw: Option<&String>) -> Option<usize> {
    raw.and_then(|value| value.parse::<usize>().ok())
}

pub async fn handle_scan(matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let raw_target = matches.get_one::<String>("TARGET").unwrap();
    let target = match parse_target(raw_target) {
        Some(target) => target,
        None => {
            eprintln!("✗ Invalid target '{raw_target}'");
            std::process::exit(1);
        }
    };

    let timeout = *matches.get_one::<u64>("timeout").unwrap_or(&10);
    let raw_depth = matches.get_one::<String>("max-depth");
    let max_depth = parse_max_depth(raw_depth);
    if let Some(raw) = raw_depth
        && max_depth.is_none()
    {
        tracing::warn!("Ignoring invalid --max-depth value '{}'", raw);
    }
    let export_path = matches.get_one::<String>("export-suspicious");

    println!("[i] Crawling {}", target.bright_white().bold());
    match max_depth {
        Some(depth) => println!("[i] Max depth: {depth}\n"),
        None => println!("[i] Max depth: unbounded\n"),
    }

    let mut crawler = Crawler::new(HttpTransport::new(timeout)).with_visit_callback(Arc::new(
        |visit: &PageVisit| {
            println!("{}", render::render(&render::describe(visit)));
        },
    ));
    if let Some(depth) = max_depth {
        crawler = crawler.with_max_depth(depth);
    }

    let report = match crawler.crawl(&target).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("✗ Crawl failed: {e}");
            std::process::exit(1);
        }
    };

    print_summary(&report);

    if let Some(raw_path) = export_path {
        export_suspicious(&report, raw_path);
    }
}

fn print_summary(report: &CrawlReport) {
    println!("\n{}", "━".repeat(52));
    println!("Paths visited: {}", report.visits.len());

    if !report.external_domains.is_empty() {
        println!("\n{}", "References to external domains were found:".yellow().bold());
        for domain in &report.external_domains {
            println!("    - {domain}");
        }
        println!("You can review them manually to decide whether to go beyond the target.");
    }

    if !report.suspicious.is_empty() {
        println!("\n{}", "Suspicious candidates (never followed):".red().bold());
        for entry in &report.suspicious {
            println!(
                "    {}  {}  [{}]",
                entry.origin,
                entry.raw_value,
                entry.reason.to_string().red()
            );
        }
    }
}

/// Export failures are reported and swallowed; the crawl results on screen
/// are already complete at this point.
fn export_suspicious(report: &CrawlReport, raw_path: &str) {
    let expanded = shellexpand::tilde(raw_path);
    let path = PathBuf::from(expanded.as_ref());

    match export::write_suspicious_csv(&report.suspicious, &path) {
        Ok(()) => println!(
            "\n{} {} suspicious entries exported to {}",
            "✓".green().bold(),
            report.suspicious.len(),
            path.display().to_string().bright_white()
        ),
        Err(e) => eprintln!("✗ Failed to export suspicious findings: {e}"),
    }
}
