//! Performance benchmarks for deadlink-audit.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - A small synthetic page (~1KB) audited with and without a warm cache
//! - Large generated pages to exercise the anchor scan and zone walk
//! - Container inserts into a full cache, where every insert evicts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use deadlink_audit::fingerprint::ContainerFingerprint;
use deadlink_audit::{audit, audit_with_options, dom, AuditOptions, CachePolicy, HeaderCache};
use std::fmt::Write;

const SAMPLE_HTML: &str = r##"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Page</title>
</head>
<body>
    <header class="site-header">
        <nav class="navbar">
            <a href="/">Home</a>
            <a href="#">Products <span class="caret"></span></a>
            <a href="#">Company</a>
            <a href="/#">Contact</a>
        </nav>
    </header>
    <article>
        <h1>Sample Article Title</h1>
        <p>This is the first paragraph. It has a <a href="#">placeholder link</a> in it.</p>
        <div class="cta"><a href="#/"><img src="x.png" alt=""></a></div>
        <p>Here is a second paragraph with a <a href="/real">real link</a>.</p>
    </article>
    <footer>
        <ul class="footer__links">
            <li><a href="#">Privacy</a></li>
            <li><a href="#">Terms</a></li>
        </ul>
        <p>Copyright 2024</p>
    </footer>
</body>
</html>
"##;

fn large_page(sections: usize) -> String {
    let mut html = String::from("<html><body><header><nav>");
    for i in 0..20 {
        let _ = write!(html, r##"<a href="#">Menu {i}</a>"##);
    }
    html.push_str("</nav></header><main>");
    for i in 0..sections {
        let _ = write!(
            html,
            r##"<section id="s{i}"><div class="card"><p>Body text {i} <a href="#">more</a> <a href="/p/{i}">link</a></p></div></section>"##
        );
    }
    html.push_str(r##"</main><footer class="site-footer"><a href="#">Top</a></footer></body></html>"##);
    html
}

fn bench_audit_cold(c: &mut Criterion) {
    c.bench_function("audit_cold_cache", |b| {
        b.iter(|| {
            let mut cache = HeaderCache::new();
            audit(black_box(SAMPLE_HTML), &mut cache)
        });
    });
}

fn bench_audit_warm(c: &mut Criterion) {
    let mut cache = HeaderCache::new();
    let _ = audit(SAMPLE_HTML, &mut cache);

    c.bench_function("audit_warm_cache", |b| {
        b.iter(|| audit(black_box(SAMPLE_HTML), &mut cache));
    });
}

fn bench_audit_without_dedup(c: &mut Criterion) {
    let options = AuditOptions {
        deduplicate: false,
        ..AuditOptions::default()
    };
    let mut cache = HeaderCache::new();

    c.bench_function("audit_without_dedup", |b| {
        b.iter(|| audit_with_options(black_box(SAMPLE_HTML), &mut cache, black_box(&options)));
    });
}

fn bench_large_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_page");

    for sections in [100, 1_000] {
        let html = large_page(sections);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("audit", sections), &html, |b, html| {
            b.iter(|| {
                let mut cache = HeaderCache::new();
                audit(black_box(html), &mut cache)
            });
        });
    }

    group.finish();
}

fn bench_full_cache_inserts(c: &mut Criterion) {
    let fingerprints: Vec<ContainerFingerprint> = (0..2_000)
        .map(|i| {
            let doc = dom::parse(&format!("<nav><a>Item {i}</a></nav>"));
            ContainerFingerprint::of(&doc.select("nav"))
        })
        .collect();
    let (warm, burst) = fingerprints.split_at(1_000);

    c.bench_function("full_cache_inserts", |b| {
        b.iter(|| {
            let mut cache = HeaderCache::with_policy(CachePolicy {
                max_containers: Some(1_000),
                ttl: None,
            });
            for fp in warm {
                cache.check(fp, "k");
            }
            for fp in burst {
                cache.check(black_box(fp), "k");
            }
            cache.evicted()
        });
    });
}

criterion_group!(
    benches,
    bench_audit_cold,
    bench_audit_warm,
    bench_audit_without_dedup,
    bench_large_pages,
    bench_full_cache_inserts
);
criterion_main!(benches);
