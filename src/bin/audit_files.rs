//! Audit a set of saved pages from one site and print one JSON report per line.
//!
//! All files share one session, so header and footer links repeated across pages are
//! reported only for the first page that carries them.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{info, warn};

use deadlink_audit::{AuditFailure, AuditOptions, Auditor, CachePolicy, Error, HeaderCache};

#[derive(Debug, Parser)]
#[command(name = "audit_files", about = "Find dead anchor links in saved HTML pages")]
struct Cli {
    /// HTML files to audit, in crawl order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Maximum number of container fingerprints kept (0 for no limit)
    #[arg(long, default_value_t = 10_000)]
    max_containers: usize,

    /// Report every header and footer link on every page
    #[arg(long)]
    no_dedup: bool,

    /// Pretty-print each report
    #[arg(long)]
    pretty: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let policy = CachePolicy {
        max_containers: (cli.max_containers > 0).then_some(cli.max_containers),
        ..CachePolicy::default()
    };
    let options = AuditOptions {
        deduplicate: !cli.no_dedup,
        ..AuditOptions::default()
    };
    let mut auditor = Auditor::with_cache(options, HeaderCache::with_policy(policy));

    let mut failed = 0usize;
    for path in &cli.files {
        let url = Some(path.display().to_string());
        auditor.options_mut().url.clone_from(&url);

        let outcome = fs::read(path)
            .map_err(Error::from)
            .and_then(|body| auditor.audit_bytes(&body, None));

        let mut page_failed = outcome.is_err();
        let json = match outcome {
            Ok(report) => to_json(&report, cli.pretty),
            Err(err) => {
                warn!("{}: {err}", path.display());
                to_json(&AuditFailure::from_error(url, &err), cli.pretty)
            }
        };
        match json {
            Ok(line) => println!("{line}"),
            Err(err) => {
                warn!("{}: cannot serialize report: {err}", path.display());
                page_failed = true;
            }
        }
        if page_failed {
            failed += 1;
        }
    }

    info!(
        "audited {} files ({failed} failed), {} containers cached",
        cli.files.len(),
        auditor.cache().len()
    );

    if failed == cli.files.len() {
        process::exit(1);
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
