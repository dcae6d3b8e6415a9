use artemisia_site::{catalog, config, datagen, prerender, server};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "artemisia-site")]
#[command(about = "Website and static-site prerenderer for Artemisia Pharma")]
#[command(long_about = "\
Website and static-site prerenderer for Artemisia Pharma

One page set, two delivery modes: 'build' prerenders every page into a
static tree (plus a publish mirror with a catch-all 404 redirect), while
'serve' exposes the same pages as live HTTP routes and relays contact-form
submissions by email.

Product listings live in one .xlsx workbook per category under data/ —
first worksheet, first row as headers. Run 'artemisia-site gen-data' to
scaffold starter workbooks.

Environment:
  FORM_ENDPOINT   external form action wired into the static contact page
  BUILD_VERSION   cache-busting token override (default: build timestamp)
  PORT            live server port (default: 3000)
  SMTP_HOST, SMTP_PORT, SMTP_SECURE, SMTP_USER, SMTP_PASS, SMTP_FROM,
  COMPANY_EMAIL   contact-form relay settings")]
#[command(version)]
struct Cli {
    /// Site configuration file
    #[arg(long, default_value = "site.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prerender the static site into the output and publish directories
    Build {
        /// External form-submission endpoint (overrides FORM_ENDPOINT)
        #[arg(long)]
        form_endpoint: Option<String>,
    },
    /// Serve the site live, with the contact-form email relay
    Serve {
        /// Listen port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Write starter product workbooks into the data directory
    GenData,
    /// Validate that every category's workbook exists and parses
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let site = config::SiteConfig::load(&cli.config)?;
    let root = cli
        .config
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();

    match cli.command {
        Command::Build { form_endpoint } => {
            let mut opts = prerender::BuildOptions::from_config(&root, &site);
            if form_endpoint.is_some() {
                opts.form_endpoint = form_endpoint;
            }

            println!("==> Building static site → {}", opts.output_dir.display());
            let report = prerender::build(&opts)?;
            if report.copied_assets {
                println!("Copied assets from {}", opts.public_dir.display());
            }
            for (title, out) in &report.pages {
                println!("{title} → {out}");
            }
            println!(
                "==> Published {} pages to {} (version {})",
                report.pages.len(),
                opts.publish_dir.display(),
                opts.version
            );
        }
        Command::Serve { port } => {
            let port = port
                .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
                .unwrap_or(3000);
            let state = server::AppState {
                data_dir: root.join(&site.data_dir),
                smtp: config::SmtpConfig::from_env(),
            };
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(server::serve(state, port))?;
        }
        Command::GenData => {
            let data_dir = root.join(&site.data_dir);
            let written = datagen::write_sample_workbooks(&data_dir)?;
            for path in &written {
                println!("Created {}", path.display());
            }
            println!("==> {} starter workbooks in {}", written.len(), data_dir.display());
        }
        Command::Check => {
            let data_dir = root.join(&site.data_dir);
            println!("==> Checking {}", data_dir.display());
            let mut missing = 0;
            for category in catalog::categories() {
                let path = catalog::spreadsheet_path(&data_dir, category.key)
                    .expect("every category has a workbook mapping");
                if path.is_file() {
                    let table = catalog::load_product_data(&data_dir, category.key);
                    println!("{} ({} products)", category.title, table.len());
                    println!("    Source: {}", path.display());
                } else {
                    missing += 1;
                    println!("{} — MISSING", category.title);
                    println!("    Expected: {}", path.display());
                }
            }
            if missing > 0 {
                return Err(format!("{missing} category workbooks missing").into());
            }
            println!("==> Catalog data is valid");
        }
    }

    Ok(())
}
