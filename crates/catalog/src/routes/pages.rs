//! Static HTML pages.
//!
//! Pages are plain files in the configured templates directory, served as-is.

use std::path::Path;

use axum::Router;
use tower_http::services::ServeFile;

use crate::state::AppState;

/// Route path and file name for each page.
pub const PAGES: &[(&str, &str)] = &[
    ("/", "index.html"),
    ("/products", "product.html"),
    ("/about", "about.html"),
    ("/contact", "contact.html"),
    ("/manage", "manage_products.html"),
];

/// Create the page routes, resolving files under `templates_dir`.
pub fn page_routes(templates_dir: &Path) -> Router<AppState> {
    PAGES
        .iter()
        .fold(Router::new(), |router, (path, file)| {
            router.route_service(path, ServeFile::new(templates_dir.join(file)))
        })
}
