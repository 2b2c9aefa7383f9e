use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use storeshot_core::config::{CONFIG_FILE_NAME, DEFAULT_LOCALES, EXPORT_DIR_NAME};
use storeshot_core::{BOLD_FONT_CANDIDATES, FontSource, OverlayConfig, Renderer, pick_font};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "storeshot",
    about = "Render localized app-store screenshots from overlay_config.json",
    version,
    author
)]
struct Cli {
    /// Asset root: holds the config and the screenshots it references
    #[arg(long, default_value = ".", help_heading = "Input/Output")]
    root: PathBuf,
    /// Config file (defaults to <root>/overlay_config.json)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Output directory (defaults to <root>/export)
    #[arg(short, long, help_heading = "Input/Output")]
    out_dir: Option<PathBuf>,
    /// Locale to render; repeat for several (defaults to fr, then en)
    #[arg(short, long = "locale", help_heading = "Locales")]
    locales: Vec<String>,
    /// Print the parsed configuration as JSON and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(short, long, default_value_t = false, help_heading = "Logging/UX")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(CONFIG_FILE_NAME));
    let cfg = OverlayConfig::load(&config_path)
        .with_context(|| format!("load config {}", config_path.display()))?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    let font = pick_font(BOLD_FONT_CANDIDATES, cfg.text.title_size);
    match font.source() {
        FontSource::File(path) => info!(?path, size = font.size(), "title font"),
        FontSource::Builtin => info!(size = font.size(), "title font: built-in fallback"),
    }

    let out_dir = cli
        .out_dir
        .clone()
        .unwrap_or_else(|| cli.root.join(EXPORT_DIR_NAME));
    let renderer = Renderer::new(&cli.root, cfg, font).with_out_root(out_dir);

    let locales: Vec<String> = if cli.locales.is_empty() {
        DEFAULT_LOCALES.iter().map(|s| s.to_string()).collect()
    } else {
        cli.locales.clone()
    };

    for locale in &locales {
        renderer
            .render_locale(locale, |ev| println!("{ev}"))
            .with_context(|| format!("render locale {locale}"))?;
    }
    Ok(())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
