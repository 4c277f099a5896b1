//! # Inkplan CLI
//!
//! Command-line interface for e-ink planner and template layouts.
//!
//! ## Usage
//!
//! ```bash
//! # List devices, layouts and templates
//! inkplan profiles
//! inkplan templates
//!
//! # Check whether a layout fits a device
//! inkplan fit schedule --device palma --layout full --param schedule_start_hour=6
//!
//! # Build one template page as JSON and PNG
//! inkplan template dotted-grid --device scribe --json page.json --png page.png
//!
//! # Build a whole planner year
//! inkplan planner --year 2026 --device remarkable --layout compact --png-dir out/
//! ```
//!
//! Set `RUST_LOG=inkplan=debug` for more detail.

use chrono::Datelike;
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use inkplan::{
    InkplanError, ProfileRegistry,
    fit::{FitMode, FitReport, FitResult, FitTarget, validate_fit},
    params::{NotesFill, ParamKey, TemplateParams},
    planner::{PlannerRequest, build_year},
    preview,
    template::{TemplateKind, build_template},
};

/// Inkplan - E-ink planner and note template layouts
#[derive(Parser, Debug)]
#[command(name = "inkplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every command that picks a layout.
#[derive(clap::Args, Debug)]
struct LayoutArgs {
    /// Device profile (remarkable, scribe, palma)
    #[arg(long, default_value = "remarkable")]
    device: String,

    /// Layout profile (full, balanced, compact); device default if omitted
    #[arg(long)]
    layout: Option<String>,

    /// Reject instead of falling back to a denser layout
    #[arg(long)]
    strict: bool,

    /// Template parameter override, repeatable (e.g. --param line_spacing_mm=8)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,
}

impl LayoutArgs {
    fn mode(&self) -> FitMode {
        if self.strict { FitMode::Strict } else { FitMode::Fallback }
    }

    fn template_params(&self) -> Result<TemplateParams, InkplanError> {
        TemplateParams::from_cli_pairs(&self.params)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List device and layout profiles
    Profiles {
        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },

    /// List template kinds and parameter keys
    Templates,

    /// Validate a layout for a planner or a template
    Fit {
        /// `planner` or a template kind
        target: String,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build one template page
    Template {
        /// Template kind (omit to see available kinds)
        kind: Option<String>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Write the page geometry as JSON
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// Write a PNG preview
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,
    },

    /// Build a planner year
    Planner {
        /// Calendar year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Write the document as JSON
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// Write one PNG preview per page into this directory
        #[arg(long, value_name = "DIR")]
        png_dir: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("inkplan=info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), InkplanError> {
    let cli = Cli::parse();
    let registry = ProfileRegistry::builtin();

    match cli.command {
        Commands::Profiles { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(registry)?);
                return Ok(());
            }
            println!("Devices:");
            for device in registry.devices() {
                println!(
                    "  {:<12} {:<16} {:.1} × {:.1} mm @ {} dpi (default layout: {})",
                    device.key,
                    device.name,
                    device.page_width_mm,
                    device.page_height_mm,
                    device.dpi,
                    device.default_layout
                );
            }
            println!("\nLayouts:");
            for layout in registry.layouts() {
                println!(
                    "  {:<12} max rows {:<3} split weeks: {:<5} sidebar: {}",
                    layout.name, layout.max_rows, layout.allows_split, layout.show_sidebar
                );
            }
        }

        Commands::Templates => {
            print_templates();
        }

        Commands::Fit { target, layout, json } => {
            let target: FitTarget = target.parse()?;
            let params = layout.template_params()?;
            let report = validate_fit(
                registry,
                &layout.device,
                layout.layout.as_deref(),
                target,
                &params,
                layout.mode(),
            )?;
            log_fit(&report);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_fit(&report);
            }
        }

        Commands::Template { kind, layout, json, png } => {
            let Some(name) = kind else {
                print_templates();
                return Ok(());
            };
            let kind: TemplateKind = name.parse()?;
            let params = layout.template_params()?;
            let page = build_template(
                registry,
                kind,
                &layout.device,
                layout.layout.as_deref(),
                &params,
                layout.mode(),
            )?;
            log_fit(&page.fit);

            if let Some(path) = json {
                write_json(&path, &page)?;
                println!("Saved to {}", path.display());
            }
            if let Some(path) = png {
                let device = registry.resolve_device(&layout.device)?;
                preview::save_png(&page.geometry, device, &path)?;
                println!("Saved to {}", path.display());
            }
            if let Some(chosen) = page.fit.result.layout() {
                println!("Built {} page for {} ({} layout)", kind, page.fit.device, chosen.name);
            }
        }

        Commands::Planner { year, layout, json, png_dir } => {
            let year = year.unwrap_or_else(|| chrono::Local::now().year());
            let request = PlannerRequest {
                device: layout.device.clone(),
                layout: layout.layout.clone(),
                year,
                params: layout.template_params()?,
                mode: layout.mode(),
            };

            info!(year, device = %request.device, "building planner");
            let document = build_year(registry, &request)?;
            log_fit(&document.fit);
            if document.pages.len() != document.expected_pages {
                warn!(
                    built = document.pages.len(),
                    expected = document.expected_pages,
                    "page count mismatch"
                );
            }

            if let Some(path) = json {
                write_json(&path, &document)?;
                println!("Saved to {}", path.display());
            }
            if let Some(dir) = png_dir {
                let device = registry.resolve_device(&document.device)?;
                fs::create_dir_all(&dir)?;
                document
                    .pages
                    .par_iter()
                    .enumerate()
                    .try_for_each(|(i, page)| {
                        let file = dir.join(format!("{:03}-{}.png", i + 1, page_slug(&page.title)));
                        preview::save_png(&page.geometry, device, &file)
                    })?;
                println!("Saved {} pages to {}", document.pages.len(), dir.display());
            }
            println!(
                "Built {} pages for {} {} ({} layout)",
                document.pages.len(),
                document.device,
                year,
                document.layout
            );
        }
    }

    Ok(())
}

fn print_templates() {
    println!("Available templates:");
    for kind in TemplateKind::ALL {
        println!("  {:<14} {}", kind.as_str(), kind.description());
    }
    println!("\nParameters (--param key=value):");
    for key in ParamKey::ALL {
        println!("  {:<20} {}", key.as_str(), key.description());
    }
    let fills: Vec<&str> = NotesFill::ALL.iter().map(|f| f.as_str()).collect();
    println!("\nnotes_fill values: {}", fills.join(", "));
}

fn log_fit(report: &FitReport) {
    match &report.result {
        FitResult::Fits { layout } => {
            info!(device = report.device, layout = layout.name, "layout fits")
        }
        FitResult::Fallback { layout, reason } => warn!(
            device = report.device,
            requested = report.requested,
            layout = layout.name,
            "{}",
            reason
        ),
        FitResult::Rejected { reason } => {
            warn!(device = report.device, requested = report.requested, "{}", reason)
        }
    }
}

fn print_fit(report: &FitReport) {
    println!("{} / {} / {}: {}", report.device, report.requested, report.target, report.result);
    for issue in &report.issues {
        println!("  - {}", issue);
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), InkplanError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

/// File-name-safe form of a page title.
fn page_slug(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    slug.split('-').filter(|s| !s.is_empty()).collect::<Vec<_>>().join("-")
}
