use deadlink_audit::{audit, AuditReport, HeaderCache, ZoneKind};

fn audit_fresh(html: &str) -> AuditReport {
    let mut cache = HeaderCache::new();
    match audit(html, &mut cache) {
        Ok(report) => report,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

fn zone_of(html: &str) -> Option<(ZoneKind, String)> {
    let report = audit_fresh(html);
    assert_eq!(report.total(), 1, "expected exactly one dead link");
    let zone = report
        .all_links()
        .next()
        .and_then(|link| link.zone.as_ref())
        .map(|zone| (zone.kind, zone.selector_label.clone()));
    zone
}

#[test]
fn nav_inside_footer_is_a_header_zone() {
    let zone = zone_of(r##"<footer><nav><a href="#">Sitemap</a></nav></footer>"##);
    assert_eq!(zone, Some((ZoneKind::Header, "nav".to_string())));
}

#[test]
fn footer_inside_nav_is_a_footer_zone() {
    let zone = zone_of(r##"<nav><div class="footer"><a href="#">Legal</a></div></nav>"##);
    assert_eq!(zone, Some((ZoneKind::Footer, ".footer".to_string())));
}

#[test]
fn header_rule_wins_on_the_same_element() {
    let zone = zone_of(r##"<div class="navbar footer"><a href="#">Both</a></div>"##);
    assert_eq!(zone, Some((ZoneKind::Header, ".navbar".to_string())));
}

#[test]
fn id_and_role_rules_match() {
    assert_eq!(
        zone_of(r##"<div id="main-nav"><a href="#">x</a></div>"##),
        Some((ZoneKind::Header, "#main-nav".to_string()))
    );
    assert_eq!(
        zone_of(r##"<div role="contentinfo"><a href="#">x</a></div>"##),
        Some((ZoneKind::Footer, "[role=\"contentinfo\"]".to_string()))
    );
}

#[test]
fn extended_footer_variants_match() {
    for class in ["footer-bottom", "footer__menu", "bottom-footer", "page-footer", "copyright-footer"] {
        let html = format!(r##"<div class="{class}"><a href="#">x</a></div>"##);
        assert_eq!(
            zone_of(&html).map(|(kind, _)| kind),
            Some(ZoneKind::Footer),
            "class {class} should be a footer zone"
        );
    }
}

#[test]
fn class_rules_match_whole_tokens_only() {
    assert_eq!(zone_of(r##"<div class="article-header"><a href="#">x</a></div>"##), None);
    assert_eq!(zone_of(r##"<div class="footerish"><a href="#">x</a></div>"##), None);
}

#[test]
fn matching_ignores_case() {
    assert_eq!(
        zone_of(r##"<DIV CLASS="NavBar"><A HREF="#">x</A></DIV>"##),
        Some((ZoneKind::Header, ".navbar".to_string()))
    );
}

#[test]
fn classes_on_body_do_not_make_a_zone() {
    let report = audit_fresh(r##"<html><body class="header footer"><p><a href="#">x</a></p></body></html>"##);
    assert_eq!(report.hash_links.len(), 1);
    assert!(report.header_hash_links.is_empty());
    assert!(report.footer_hash_links.is_empty());
}

#[test]
fn deeply_nested_anchor_finds_its_zone() {
    let zone = zone_of(
        r##"<footer id="colophon"><div><div><ul><li><span><a href="#">Deep</a></span></li></ul></div></div></footer>"##,
    );
    assert_eq!(zone, Some((ZoneKind::Footer, "footer".to_string())));
}
