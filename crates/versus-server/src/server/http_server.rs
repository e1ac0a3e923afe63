//! HTTP server hosting the generated page and the JSON API.

use crate::api::{get_catalog, get_entries, get_info, get_view, ViewQuery};
use crate::site::Site;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use versus_core::{Catalog, Result, SiteConfig, VersusError};
use warp::filters::BoxedFilter;
use warp::http::Uri;
use warp::{Filter, Rejection, Reply};

/// Filter matching the configured base path segments
fn base_filter(config: &SiteConfig) -> BoxedFilter<()> {
    config
        .base_segments()
        .into_iter()
        .fold(warp::any().boxed(), |filter, segment| {
            filter.and(warp::path(segment)).boxed()
        })
}

/// All routes for `site`, mounted below its base path
pub fn routes(site: Arc<Site>) -> Result<impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone> {
    let base = base_filter(&site.config);
    let location = if site.config.base_path.is_empty() {
        "/".to_string()
    } else {
        site.config.base_path.clone()
    };
    let location: Uri = location
        .parse()
        .map_err(|e| VersusError::InvalidConfig(format!("base path '{}': {}", location, e)))?;

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["Content-Type"])
        .allow_methods(vec!["GET"]);

    let page_site = site.clone();
    let page_route = base
        .clone()
        .and(warp::path::end())
        .and(warp::get())
        .map(move || warp::reply::html(page_site.page.clone()));

    let catalog_site = site.clone();
    let catalog_route = base
        .clone()
        .and(warp::path!("api" / "catalog"))
        .and(warp::get())
        .map(move || warp::reply::json(&get_catalog(&catalog_site)));

    let entries_site = site.clone();
    let entries_route = base
        .clone()
        .and(warp::path!("api" / "entries"))
        .and(warp::get())
        .map(move || warp::reply::json(&get_entries(&entries_site)));

    let view_site = site.clone();
    let view_route = base
        .clone()
        .and(warp::path!("api" / "view"))
        .and(warp::get())
        .and(warp::query::<ViewQuery>())
        .map(move |query: ViewQuery| warp::reply::json(&get_view(&view_site, &query)));

    let info_site = site;
    let info_route = base
        .and(warp::path!("api" / "info"))
        .and(warp::get())
        .map(move || warp::reply::json(&get_info(&info_site)));

    // Shadowed by the page route when mounted at the root
    let redirect_route = warp::path::end()
        .and(warp::get())
        .map(move || warp::redirect::permanent(location.clone()));

    let health_route = warp::path!("health").map(|| "versus is running");

    Ok(page_route
        .or(catalog_route)
        .or(entries_route)
        .or(view_route)
        .or(info_route)
        .or(redirect_route)
        .or(health_route)
        .with(cors))
}

/// Build the site for `catalog` and serve it on `port` until Ctrl-C
pub async fn start_server(port: u16, config: SiteConfig, catalog: Catalog) -> Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let site = Arc::new(Site::build(config, catalog)?);
    let url = format!("http://localhost:{}{}", port, site.config.url(""));
    let routes = routes(site)?;

    let server = warp::serve(routes).try_bind_with_graceful_shutdown(addr, async {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal, stopping server");
    });

    match server {
        Ok((addr, server)) => {
            info!("Serving on {}", addr);
            println!("versus is running at {}", url);
            server.await;
            Ok(())
        }
        Err(e) => Err(VersusError::Server(format!(
            "Failed to bind to port {}: {}",
            port, e
        ))),
    }
}
