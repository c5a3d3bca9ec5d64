//! cvpress - turn a markdown resume into a print-faithful PDF.
//!
//! # Usage
//!
//! ```bash
//! cvpress resume.md
//! cvpress --export cv.pdf resume.md
//! cvpress --watch resume.md
//! cvpress --print-html dump.html resume.md
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use cvpress::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use cvpress::export::{ChromiumRasterizer, PdfExporter, write_pdf};
use cvpress::preview::estimate_layout;
use cvpress::storage::read_document;
use cvpress::theme::Theme;
use cvpress::watcher::SourceWatcher;

/// A markdown resume editor core with PDF export
#[derive(Parser, Debug)]
#[command(name = "cvpress", version, about, long_about = None)]
struct Cli {
    /// Markdown resume to export
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output PDF path (defaults to the input name with a .pdf extension)
    #[arg(short, long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Dump the assembled print HTML instead of rasterizing
    #[arg(long, value_name = "PATH")]
    print_html: Option<PathBuf>,

    /// Preview theme
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Headless browser binary used for rasterization
    #[arg(long, value_name = "BINARY")]
    rasterizer: Option<PathBuf>,

    /// Watch the file and re-export on every change
    #[arg(short, long)]
    watch: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn export_once(
    file: &Path,
    output: &Path,
    print_html: Option<&PathBuf>,
    rasterizer: &Path,
) -> Result<()> {
    let content = read_document(file)?;
    let snapshot = estimate_layout(&content);

    let base_dir = file
        .canonicalize()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let exporter =
        PdfExporter::new(ChromiumRasterizer::new(rasterizer)).with_base_dir(base_dir);

    if let Some(html_path) = print_html {
        let document = exporter.build_document(&snapshot);
        std::fs::write(html_path, &document.html)
            .with_context(|| format!("Failed to write {}", html_path.display()))?;
        println!(
            "Wrote print HTML to {} (avatar at {:.2}mm)",
            html_path.display(),
            document.avatar_top_mm
        );
        return Ok(());
    }

    let bytes = exporter
        .export(&snapshot)
        .with_context(|| format!("Failed to export {}", file.display()))?;
    write_pdf(output, &bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = ConfigFlags {
        theme: cli.theme,
        ..parse_flag_tokens(&raw_args)
    };

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let rasterizer = effective
        .rasterizer
        .clone()
        .unwrap_or_else(|| PathBuf::from("chromium"));
    let output = cli
        .export
        .clone()
        .unwrap_or_else(|| cli.file.with_extension("pdf"));

    if !cli.file.exists() && !effective.watch {
        anyhow::bail!("File not found: {}", cli.file.display());
    }

    export_once(&cli.file, &output, cli.print_html.as_ref(), &rasterizer)?;

    if effective.watch {
        let mut watcher = SourceWatcher::new(&cli.file, Duration::from_millis(250))
            .context("Failed to watch file")?;
        println!("Watching {} for changes...", cli.file.display());
        loop {
            if watcher.poll_changed() {
                if let Err(err) =
                    export_once(&cli.file, &output, cli.print_html.as_ref(), &rasterizer)
                {
                    eprintln!("[warn] re-export failed: {err:#}");
                }
            }
            std::thread::sleep(Duration::from_millis(250));
        }
    }

    Ok(())
}
