use std::fs;
use tempfile::TempDir;
use versus_core::{builtin_catalog, FormattedEntry, SiteConfig, PLACEHOLDER};
use versus_server::{write_site, Site};

#[test]
fn builtin_site_renders_every_entry() {
    let site = Site::build(SiteConfig::default(), builtin_catalog().unwrap()).unwrap();
    assert_eq!(site.entries.len(), 30);
    assert_eq!(site.page.matches("<article").count(), 30);
    assert!(site.page.starts_with("<!DOCTYPE html>"));
    assert!(site.page.contains("<h1>Convex vs Prisma</h1>"));
    assert!(site.page.contains("prefers-color-scheme: light"));
    assert!(site.page.contains(PLACEHOLDER));
    assert!(site.page.contains(r#"<span class="tok-kw">const</span>"#));
}

#[test]
fn initial_selection_is_marked_active() {
    let site = Site::build(SiteConfig::default(), builtin_catalog().unwrap()).unwrap();
    assert!(site.page.contains(r#"data-section="Reading Data""#));
    assert!(site
        .page
        .contains(r#"<button class="tab active" type="button" data-tab-section="Reading Data">"#));
    assert!(site
        .page
        .contains(r#"<button class="tab" type="button" data-tab-section="Schema">"#));
}

#[test]
fn writes_page_and_entries() {
    let site = Site::build(SiteConfig::default(), builtin_catalog().unwrap()).unwrap();
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("dist");

    write_site(&out, &site).unwrap();

    let page = fs::read_to_string(out.join("index.html")).unwrap();
    assert_eq!(page, site.page);

    let json = fs::read_to_string(out.join("entries.json")).unwrap();
    let entries: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(entries.len(), site.entries.len());
    assert_eq!(entries[0]["section"], "Reading Data");
    let first: &FormattedEntry = &site.entries[0];
    assert_eq!(
        entries[0]["variants"]["convex"],
        first.variants.get("convex").unwrap()
    );
}
