//! Post-render link rewriting for base-path deployment.
//!
//! A project-pages style static host serves the site under a path prefix
//! (`https://host/artemisia-pharma-website/...`), while the templates emit
//! root-relative links so the live server can serve them unchanged. This
//! module bridges the two by rewriting the rendered HTML.
//!
//! Matching is purely textual against the known literal attribute values the
//! templates produce — it is not an HTML-aware transform, and it is only
//! correct because the templates are controlled and emit a small, fixed set
//! of attribute strings. [`crate::templates`] documents the contract.
//!
//! Rewriting is idempotent for links and assets: every rewritten attribute no
//! longer matches its root-relative pattern, so a second pass is a no-op.

use crate::catalog;

/// Inputs to a rewrite pass.
#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
    /// Deployment base path, no trailing slash (e.g. `/artemisia-pharma-website`).
    /// `/` means a root deployment and is treated as an empty prefix — joining
    /// it verbatim would emit scheme-relative `//...` URLs.
    pub base_path: String,
    /// Cache-busting token appended to asset URLs as `?v=...`.
    pub version: String,
    /// External form-submission endpoint. When `None`, the contact form is
    /// disabled on the static site.
    pub form_endpoint: Option<String>,
}

/// Message shown by the disabled static-site contact form.
const FORM_DISABLED_ALERT: &str = "This form is disabled on the static site.";

/// Rewrite a rendered document for static hosting under a base path.
///
/// - Asset references gain the base path and a `?v=` version token
/// - Navigation links gain the base path and a trailing slash
/// - The first `method="POST"` form has its action wired to the configured
///   endpoint, or replaced with a no-op fragment plus a blocking `onsubmit`
pub fn rewrite_for_pages(html: &str, opts: &RewriteOptions) -> String {
    let base = match opts.base_path.as_str() {
        "/" => "",
        other => other,
    };
    let v = &opts.version;

    let mut out = html
        // assets
        .replace(
            r#"href="/styles.css""#,
            &format!(r#"href="{base}/styles.css?v={v}""#),
        )
        .replace(
            r#"src="/app.js""#,
            &format!(r#"src="{base}/app.js?v={v}""#),
        );
    for ext in ["png", "jpg", "jpeg", "svg"] {
        out = out.replace(
            &format!(r#"src="/logo.{ext}""#),
            &format!(r#"src="{base}/logo.{ext}?v={v}""#),
        );
    }

    // nav + root links
    out = out
        .replace(r#"href="/""#, &format!(r#"href="{base}/""#))
        .replace(r#"href="/about""#, &format!(r#"href="{base}/about/""#))
        .replace(r#"href="/products""#, &format!(r#"href="{base}/products/""#));
    for category in catalog::categories() {
        out = out.replace(
            &format!(r#"href="{}""#, category.route),
            &format!(r#"href="{base}{}/""#, category.route),
        );
    }
    out = out.replace(r#"href="/contact""#, &format!(r#"href="{base}/contact/""#));

    rewrite_form_action(&out, opts.form_endpoint.as_deref())
}

/// Rewrite the first POST form's action.
///
/// Only the first matching form tag is touched — the page set has a single
/// contact form per document. Behavior for documents with a second POST form
/// is deliberately unspecified beyond "first match only".
fn rewrite_form_action(html: &str, endpoint: Option<&str>) -> String {
    let Some((tag_start, tag_end)) = find_post_form_tag(html) else {
        return html.to_string();
    };
    let tag = &html[tag_start..tag_end];

    let Some((action_start, action_end)) = find_attribute_value(tag, "action") else {
        return html.to_string();
    };

    let new_tag = match endpoint {
        Some(url) => format!(
            "{}{}{}",
            &tag[..action_start],
            url,
            &tag[action_end..]
        ),
        None => {
            // Already disabled — keep the pass idempotent
            if tag.contains("onsubmit=") {
                return html.to_string();
            }
            let onsubmit =
                format!(r#"#" onsubmit="alert('{FORM_DISABLED_ALERT}'); return false;"#);
            format!("{}{}{}", &tag[..action_start], onsubmit, &tag[action_end..])
        }
    };

    format!("{}{}{}", &html[..tag_start], new_tag, &html[tag_end..])
}

/// Locate the first `<form ...>` tag carrying `method="POST"`.
///
/// Returns the byte range of the whole tag, `<` through `>` inclusive.
fn find_post_form_tag(html: &str) -> Option<(usize, usize)> {
    let mut search_from = 0;
    while let Some(rel) = html[search_from..].find("<form") {
        let start = search_from + rel;
        let end = start + html[start..].find('>')? + 1;
        if html[start..end].contains(r#"method="POST""#) {
            return Some((start, end));
        }
        search_from = end;
    }
    None
}

/// Byte range of an attribute's value (inside the quotes) within a tag.
fn find_attribute_value(tag: &str, name: &str) -> Option<(usize, usize)> {
    let needle = format!(r#"{name}=""#);
    let value_start = tag.find(&needle)? + needle.len();
    let value_end = value_start + tag[value_start..].find('"')?;
    Some((value_start, value_end))
}
