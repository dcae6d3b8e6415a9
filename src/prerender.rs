//! Static-site prerendering.
//!
//! Produces a deployable static tree from the page registry:
//!
//! ```text
//! 1. Clear      remove + recreate the output directory
//! 2. Assets     copy public/ into the output root (if present)
//! 3. Render     each registry page → rewrite links → path/index.html
//! 4. Publish    mirror output into the publish dir, add .nojekyll and a
//!               catch-all 404.html redirecting to the base path
//! ```
//!
//! Any render or IO error aborts the whole build — a half-built static site
//! must not be published, and there are no partial-success semantics to
//! recover into. Contrast with [`crate::catalog`], which degrades instead.

use crate::config::SiteConfig;
use crate::pages;
use crate::rewrite::{RewriteOptions, rewrite_for_pages};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything a build needs, resolved up front.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
    pub output_dir: PathBuf,
    pub publish_dir: PathBuf,
    pub base_path: String,
    pub version: String,
    pub form_endpoint: Option<String>,
}

impl BuildOptions {
    /// Resolve build options from site config plus environment overrides,
    /// anchored at `root` (the directory `site.toml` lives in).
    pub fn from_config(root: &Path, config: &SiteConfig) -> Self {
        Self {
            data_dir: root.join(&config.data_dir),
            public_dir: root.join(&config.public_dir),
            output_dir: root.join(&config.output_dir),
            publish_dir: root.join(&config.publish_dir),
            base_path: config.base_path.clone(),
            version: crate::config::build_version(),
            form_endpoint: crate::config::form_endpoint(),
        }
    }
}

/// What a build produced, for CLI reporting.
#[derive(Debug)]
pub struct BuildReport {
    /// `(title, output path)` per rendered page, in build order.
    pub pages: Vec<(String, String)>,
    pub copied_assets: bool,
}

/// Run the full prerender pipeline.
pub fn build(opts: &BuildOptions) -> Result<BuildReport, BuildError> {
    remove_dir_if_exists(&opts.output_dir)?;
    fs::create_dir_all(&opts.output_dir)?;

    let copied_assets = opts.public_dir.is_dir();
    if copied_assets {
        copy_dir_recursive(&opts.public_dir, &opts.output_dir)?;
    }

    let rewrite_opts = RewriteOptions {
        base_path: opts.base_path.clone(),
        version: opts.version.clone(),
        form_endpoint: opts.form_endpoint.clone(),
    };

    let mut report_pages = Vec::new();
    for page in pages::all_pages() {
        let out_path = opts.output_dir.join(page.output_path());
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let html = page.render(&opts.data_dir).into_string();
        let rewritten = rewrite_for_pages(&html, &rewrite_opts);
        fs::write(&out_path, rewritten)?;
        report_pages.push((page.title(), page.output_path()));
    }

    publish(opts)?;

    Ok(BuildReport {
        pages: report_pages,
        copied_assets,
    })
}

/// Mirror the output tree into the publish directory and add hosting markers:
/// an empty `.nojekyll` (no Jekyll pass on GitHub Pages) and a `404.html`
/// that bounces unmapped paths back to the base path.
fn publish(opts: &BuildOptions) -> Result<(), BuildError> {
    remove_dir_if_exists(&opts.publish_dir)?;
    fs::create_dir_all(&opts.publish_dir)?;
    copy_dir_recursive(&opts.output_dir, &opts.publish_dir)?;
    fs::write(opts.publish_dir.join(".nojekyll"), "")?;
    fs::write(
        opts.publish_dir.join("404.html"),
        redirect_document(&opts.base_path),
    )?;
    Ok(())
}

/// Catch-all redirect document for paths not produced by static routing.
fn redirect_document(base_path: &str) -> String {
    // Root deployment: the redirect target is `/`, not `//`
    let base_path = if base_path == "/" { "" } else { base_path };
    format!(
        "<!doctype html>\n\
         <meta charset=\"utf-8\">\n\
         <title>Redirecting…</title>\n\
         <meta http-equiv=\"refresh\" content=\"0; url={base_path}/\">\n\
         <script>location.replace('{base_path}/');</script>"
    )
}

fn remove_dir_if_exists(dir: &Path) -> std::io::Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_opts(root: &Path) -> BuildOptions {
        BuildOptions {
            data_dir: root.join("data"),
            public_dir: root.join("public"),
            output_dir: root.join("dist"),
            publish_dir: root.join("docs"),
            base_path: "/artemisia-pharma-website".to_string(),
            version: "test".to_string(),
            form_endpoint: None,
        }
    }

    #[test]
    fn build_renders_every_registry_page() {
        let tmp = TempDir::new().unwrap();
        let opts = test_opts(tmp.path());
        let report = build(&opts).unwrap();

        assert_eq!(report.pages.len(), pages::all_pages().len());
        for page in pages::all_pages() {
            assert!(
                opts.output_dir.join(page.output_path()).is_file(),
                "missing {}",
                page.output_path()
            );
        }
    }

    #[test]
    fn build_copies_public_assets() {
        let tmp = TempDir::new().unwrap();
        let opts = test_opts(tmp.path());
        fs::create_dir_all(opts.public_dir.join("img")).unwrap();
        fs::write(opts.public_dir.join("styles.css"), "body{}").unwrap();
        fs::write(opts.public_dir.join("img/logo.svg"), "<svg/>").unwrap();

        let report = build(&opts).unwrap();
        assert!(report.copied_assets);
        assert!(opts.output_dir.join("styles.css").is_file());
        assert!(opts.output_dir.join("img/logo.svg").is_file());
        // Publish mirror carries the assets too
        assert!(opts.publish_dir.join("img/logo.svg").is_file());
    }

    #[test]
    fn build_without_public_dir_still_succeeds() {
        let tmp = TempDir::new().unwrap();
        let opts = test_opts(tmp.path());
        let report = build(&opts).unwrap();
        assert!(!report.copied_assets);
    }

    #[test]
    fn publish_dir_carries_hosting_markers() {
        let tmp = TempDir::new().unwrap();
        let opts = test_opts(tmp.path());
        build(&opts).unwrap();

        assert_eq!(
            fs::read_to_string(opts.publish_dir.join(".nojekyll")).unwrap(),
            ""
        );
        let redirect = fs::read_to_string(opts.publish_dir.join("404.html")).unwrap();
        assert!(redirect.contains("url=/artemisia-pharma-website/"));
        assert!(redirect.contains("location.replace('/artemisia-pharma-website/')"));
    }

    #[test]
    fn build_clears_stale_output() {
        let tmp = TempDir::new().unwrap();
        let opts = test_opts(tmp.path());
        fs::create_dir_all(opts.output_dir.join("old")).unwrap();
        fs::write(opts.output_dir.join("old/page.html"), "stale").unwrap();

        build(&opts).unwrap();
        assert!(!opts.output_dir.join("old").exists());
    }

    #[test]
    fn rendered_pages_are_rewritten_for_the_base_path() {
        let tmp = TempDir::new().unwrap();
        let opts = test_opts(tmp.path());
        build(&opts).unwrap();

        let home = fs::read_to_string(opts.output_dir.join("index.html")).unwrap();
        assert!(home.contains(r#"href="/artemisia-pharma-website/about/""#));
        assert!(home.contains("?v=test"));

        let contact = fs::read_to_string(opts.output_dir.join("contact/index.html")).unwrap();
        assert!(contact.contains(r##"action="#""##));
    }

    #[test]
    fn root_deployment_redirect_has_no_double_slash() {
        let redirect = redirect_document("/");
        assert!(redirect.contains("url=/\""));
        assert!(redirect.contains("location.replace('/')"));
        assert!(!redirect.contains("//"));
    }

    #[test]
    fn same_version_builds_are_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let opts = test_opts(tmp.path());
        build(&opts).unwrap();
        let first: Vec<_> = pages::all_pages()
            .iter()
            .map(|p| fs::read(opts.output_dir.join(p.output_path())).unwrap())
            .collect();

        build(&opts).unwrap();
        let second: Vec<_> = pages::all_pages()
            .iter()
            .map(|p| fs::read(opts.output_dir.join(p.output_path())).unwrap())
            .collect();

        assert_eq!(first, second);
    }
}
