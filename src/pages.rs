//! Page registry: the logical page set, defined once in code.
//!
//! Every page binds a live-server route, a static output path, a title, and a
//! render function. The prerenderer iterates [`all_pages`] to produce the
//! static tree; the live server resolves requests against the same set, so
//! the two surfaces cannot drift apart.
//!
//! Category pages load their product rows fresh on every render — there is no
//! cache to invalidate when a workbook changes.

use crate::catalog::{self, ProductCategory};
use crate::templates::{self, ContactState, SITE_NAME};
use maud::Markup;
use std::path::Path;

/// One logical site page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    ProductsIndex,
    Category(ProductCategory),
    Contact,
}

impl Page {
    /// `<title>` text.
    pub fn title(&self) -> String {
        match self {
            Page::Home => SITE_NAME.to_string(),
            Page::About => format!("About Us - {SITE_NAME}"),
            Page::ProductsIndex => format!("Products - {SITE_NAME}"),
            Page::Category(category) => format!("{} - {SITE_NAME}", category.title),
            Page::Contact => format!("Contact Us - {SITE_NAME}"),
        }
    }

    /// Live-server route for this page.
    pub fn route(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::About => "/about",
            Page::ProductsIndex => "/products",
            Page::Category(category) => category.route,
            Page::Contact => "/contact",
        }
    }

    /// Output path of the prerendered document, relative to the output root.
    ///
    /// Routes map to `route/index.html` so a plain file host serves them at
    /// the trailing-slash URL.
    pub fn output_path(&self) -> String {
        match self {
            Page::Home => "index.html".to_string(),
            Page::About => "about/index.html".to_string(),
            Page::ProductsIndex => "products/index.html".to_string(),
            Page::Category(category) => format!("products/{}/index.html", category.key),
            Page::Contact => "contact/index.html".to_string(),
        }
    }

    /// Render the page, loading catalog data from `data_dir` where needed.
    pub fn render(&self, data_dir: &Path) -> Markup {
        match self {
            Page::Home => templates::home(catalog::categories()),
            Page::About => templates::about(),
            Page::ProductsIndex => templates::products_index(catalog::categories()),
            Page::Category(category) => {
                let products = catalog::load_product_data(data_dir, category.key);
                templates::category_page(category, &products)
            }
            Page::Contact => templates::contact(&ContactState::default()),
        }
    }
}

/// The full page set, in build order: home, about, products index, one page
/// per category, contact.
pub fn all_pages() -> Vec<Page> {
    let mut pages = vec![Page::Home, Page::About, Page::ProductsIndex];
    pages.extend(catalog::categories().iter().copied().map(Page::Category));
    pages.push(Page::Contact);
    pages
}
