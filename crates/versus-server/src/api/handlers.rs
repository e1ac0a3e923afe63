//! Request handlers. Each takes the built site and returns a response model;
//! routing lives in the HTTP server.

use super::models::{ApiResponse, ServerInfo, ViewQuery, ViewResponse};
use crate::site::Site;
use versus_core::catalog::SectionOutline;
use versus_core::{project, FormattedEntry, Result, Selection, Side};

pub fn get_catalog(site: &Site) -> ApiResponse<Vec<SectionOutline>> {
    ApiResponse::success(site.catalog.outline().to_vec())
}

pub fn get_entries(site: &Site) -> ApiResponse<Vec<FormattedEntry>> {
    ApiResponse::success(site.entries.clone())
}

/// Project every entry for the requested selection. Unknown names are
/// reported instead of falling back to the initial selection.
pub fn get_view(site: &Site, query: &ViewQuery) -> ApiResponse<ViewResponse> {
    match build_view(site, query) {
        Ok(view) => ApiResponse::success(view),
        Err(e) => ApiResponse::error(e.to_string()),
    }
}

fn build_view(site: &Site, query: &ViewQuery) -> Result<ViewResponse> {
    let catalog = &site.catalog;
    let mut selection = Selection::initial(catalog);

    if let Some(section) = &query.section {
        selection = selection.select_section(catalog, section)?;
    }
    if let Some(subsection) = &query.subsection {
        let section = selection.section.clone();
        selection = selection.select_subsection(catalog, &section, subsection)?;
    }
    if let Some(left) = &query.left {
        selection = selection.select_variant(catalog, Side::Left, left)?;
    }
    if let Some(right) = &query.right {
        selection = selection.select_variant(catalog, Side::Right, right)?;
    }
    if query.show_all.unwrap_or(false) {
        selection = selection.toggle_show_all();
    }

    Ok(ViewResponse {
        pairs: project(&site.entries, &selection),
        selection,
    })
}

pub fn get_info(site: &Site) -> ApiResponse<ServerInfo> {
    ApiResponse::success(ServerInfo {
        title: site.config.title.clone(),
        base_path: site.config.base_path.clone(),
        entries: site.entries.len(),
        built_at: site.built_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use versus_core::catalog::CatalogBuilder;
    use versus_core::{SiteConfig, PLACEHOLDER};

    fn site() -> Site {
        let mut builder = CatalogBuilder::new();
        builder
            .add_entry("Reading Data", "Find Records", vec![("prisma", "a()"), ("convex", "b()")])
            .unwrap();
        builder
            .add_entry("Writing data", "Create Records", vec![("prisma", "c()"), ("convex", "d()")])
            .unwrap();
        Site::build(SiteConfig::default(), builder.build().unwrap()).unwrap()
    }

    #[test]
    fn view_defaults_to_initial_selection() {
        let response = get_view(&site(), &ViewQuery::default());
        assert!(response.success);
        let view = response.data.unwrap();
        assert_eq!(view.selection.section, "Reading Data");
        let shown: Vec<bool> = view.pairs.iter().map(|p| p.visible).collect();
        assert_eq!(shown, vec![true, false]);
        assert_eq!(view.pairs[0].left, "a();");
        assert_eq!(view.pairs[0].right, "b();");
    }

    #[test]
    fn view_applies_every_field() {
        let query = ViewQuery {
            section: Some("Writing data".to_string()),
            subsection: Some("Create Records".to_string()),
            left: Some("convexHelpers".to_string()),
            right: Some("convexEnts".to_string()),
            show_all: Some(true),
        };
        let view = get_view(&site(), &query).data.unwrap();
        assert!(view.selection.show_all);
        assert!(view.pairs.iter().all(|p| p.visible));
        assert_eq!(view.pairs[1].left, "d();");
        assert_eq!(view.pairs[1].right, PLACEHOLDER);
    }

    #[test]
    fn view_rejects_unknown_names() {
        let site = site();
        let query = ViewQuery {
            section: Some("Deleting Data".to_string()),
            ..ViewQuery::default()
        };
        let response = get_view(&site, &query);
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Unknown section: Deleting Data"));

        let query = ViewQuery {
            right: Some("drizzle".to_string()),
            ..ViewQuery::default()
        };
        assert!(!get_view(&site, &query).success);
    }

    #[test]
    fn catalog_lists_outline() {
        let outline = get_catalog(&site()).data.unwrap();
        assert_eq!(outline.len(), 2);
        assert_eq!(outline[1].subsections[0].name, "Create Records");
        assert_eq!(outline[1].subsections[0].entries, 1);
    }
}
