//! HTML templates for every site page.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating:
//! malformed markup is a build error and all interpolation is auto-escaped.
//!
//! Every link and asset reference is emitted in its root-relative form
//! (`/about`, `/styles.css`, ...). The live server serves those paths
//! directly; the static build passes the rendered document through
//! [`crate::rewrite`] to prefix them with the deployment base path. The
//! rewriter matches these attribute values literally, so the set of strings
//! emitted here and the set it recognizes must stay in sync.

use crate::catalog::{ProductCategory, ProductTable};
use maud::{DOCTYPE, Markup, html};

/// Company display name, used in titles and chrome.
pub const SITE_NAME: &str = "Artemisia Pharma";

/// Contact page state: `sent` is `None` on first render, `Some(true)` after a
/// successful relay, `Some(false)` with an error message after a failed one.
#[derive(Debug, Clone, Default)]
pub struct ContactState {
    pub sent: Option<bool>,
    pub error: Option<String>,
}

/// Base HTML document: head, chrome, background canvas, client script.
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="/styles.css";
            }
            body {
                canvas #bg-canvas aria-hidden="true" {}
                (site_header())
                main { (content) }
                (site_footer())
                script src="/app.js" {}
            }
        }
    }
}

/// Site header with logo and primary navigation.
fn site_header() -> Markup {
    html! {
        header.site-header {
            a.brand href="/" {
                img src="/logo.svg" alt=(SITE_NAME);
                span { (SITE_NAME) }
            }
            nav.site-nav {
                a href="/" { "Home" }
                a href="/about" { "About" }
                a href="/products" { "Products" }
                a href="/contact" { "Contact" }
            }
        }
    }
}

fn site_footer() -> Markup {
    html! {
        footer.site-footer {
            p { "© " (SITE_NAME) ". Pharmaceutical pellets, granules and formulations." }
        }
    }
}

/// Home page: hero plus a teaser of the product range.
pub fn home(categories: &[ProductCategory]) -> Markup {
    let content = html! {
        section.hero.reveal {
            h1 { "Precision pellet technology" }
            p {
                (SITE_NAME) " develops and manufactures pharmaceutical pellets, "
                "granules and multiparticulate formulations for oral solid dosage forms."
            }
            a.button href="/products" { "Explore products" }
        }
        section.category-teaser.reveal {
            h2 { "What we make" }
            ul.category-list {
                @for category in categories {
                    li {
                        a href=(category.route) { (category.title) }
                        span.category-description { (category.description) }
                    }
                }
            }
        }
    };
    base_document(SITE_NAME, content)
}

/// About page.
pub fn about() -> Markup {
    let content = html! {
        article.about.reveal {
            h1 { "About Us" }
            p {
                (SITE_NAME) " is a specialty manufacturer of multiparticulate drug "
                "delivery systems. Our facilities produce immediate, sustained and "
                "delayed release pellets alongside granules and inert cores."
            }
            p {
                "We partner with formulation teams worldwide to bring robust, "
                "scalable oral solid dosage products to market."
            }
        }
    };
    base_document(&page_title("About Us"), content)
}

/// Products index: one card per category, in display order.
pub fn products_index(categories: &[ProductCategory]) -> Markup {
    let content = html! {
        section.products-index {
            h1 { "Products" }
            div.category-grid {
                @for category in categories {
                    a.category-card.reveal href=(category.route) {
                        h2 { (category.title) }
                        p { (category.description) }
                    }
                }
            }
        }
    };
    base_document(&page_title("Products"), content)
}

/// A category page with its product table.
///
/// An empty table renders a placeholder instead of an empty grid — the page
/// stays useful even when the backing workbook is missing.
pub fn category_page(category: &ProductCategory, products: &ProductTable) -> Markup {
    let content = html! {
        section.category-page {
            h1 { (category.title) }
            p.category-description.reveal { (category.description) }
            @if products.is_empty() {
                p.empty-list.reveal { "Product list coming soon. Please " a href="/contact" { "contact us" } " for details." }
            } @else {
                table.product-table.reveal {
                    thead {
                        tr {
                            @for header in &products.headers {
                                th { (header) }
                            }
                        }
                    }
                    tbody {
                        @for row in &products.rows {
                            tr {
                                @for header in &products.headers {
                                    td { (row.get(header).unwrap_or("")) }
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    base_document(&page_title(category.title), content)
}

/// Contact page with the submission form and sent/error banners.
pub fn contact(state: &ContactState) -> Markup {
    let content = html! {
        section.contact.reveal {
            h1 { "Contact Us" }
            @if state.sent == Some(true) {
                p.banner.banner-sent { "Thank you — your message has been sent." }
            }
            @if let Some(error) = &state.error {
                p.banner.banner-error { (error) }
            }
            form.contact-form method="POST" action="/contact" {
                label for="name" { "Name" }
                input #name name="name" type="text" required;
                label for="email" { "Email" }
                input #email name="email" type="email" required;
                label for="message" { "Message" }
                textarea #message name="message" rows="6" required {}
                button type="submit" { "Send message" }
            }
        }
    };
    base_document(&page_title("Contact Us"), content)
}

fn page_title(section: &str) -> String {
    format!("{section} - {SITE_NAME}")
}
