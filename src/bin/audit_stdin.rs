//! Simple CLI that reads one HTML page from stdin and writes its audit report as JSON.
//!
//! Failures are written in the same JSON envelope with `success: false`.

use deadlink_audit::{audit_bytes, AuditFailure, AuditOptions, Error, HeaderCache};
use log::error;
use std::io::{self, Read};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Optional arguments: page URL, then Content-Type
    let mut args = std::env::args().skip(1);
    let url = args.next();
    let content_type = args.next();

    let options = AuditOptions {
        url: url.clone(),
        ..AuditOptions::default()
    };
    let mut cache = HeaderCache::new();

    let mut body = Vec::new();
    let outcome = io::stdin()
        .read_to_end(&mut body)
        .map_err(Error::from)
        .and_then(|_| audit_bytes(&body, content_type.as_deref(), &mut cache, &options));

    let json = match outcome {
        Ok(report) => serde_json::to_string(&report),
        Err(err) => serde_json::to_string(&AuditFailure::from_error(url, &err)),
    };

    match json {
        Ok(line) => println!("{line}"),
        Err(err) => {
            error!("cannot serialize report: {err}");
            std::process::exit(1);
        }
    }
}
