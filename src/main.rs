//! dday - A D-Day countdown widget editor.
//!
//! This is the main binary. With no subcommand it launches the editor TUI;
//! `embed` renders a widget from a shared link and `link` builds one from
//! the command line.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use dday_config::Config;
use dday_config::sections::{MAX_PIXEL_RATIO, MIN_PIXEL_RATIO};
use dday_protocol::date::try_parse_manual_date;
use dday_protocol::{ImageSource, ThemeColor, WidgetConfig, WidgetStyle, embed_link};
use dday_render::AssetLoader;
use dday_tui::{App, EmbedHost, terminal};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// dday - D-Day countdown widgets with shareable embed links
#[derive(Parser, Debug)]
#[command(name = "dday", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (searched for if not specified)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the widget editor (default)
    Edit,

    /// Render a widget from an embed link
    Embed {
        /// The embed link, or just its query string
        link: String,

        /// Write the widget to a .png or .svg file instead of the terminal
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scale for PNG output (defaults to the configured export scale)
        #[arg(long, value_parser = clap::value_parser!(u32)
            .range(i64::from(MIN_PIXEL_RATIO)..=i64::from(MAX_PIXEL_RATIO)))]
        pixel_ratio: Option<u32>,
    },

    /// Print an embed link for a widget
    Link {
        /// Target date as YYYY-MM-DD (defaults to today)
        #[arg(short, long, value_parser = try_parse_manual_date)]
        date: Option<NaiveDate>,

        /// Font style: flat, 3d or pixel
        #[arg(short, long)]
        style: Option<WidgetStyle>,

        /// Theme color: a palette name or a #RRGGBB code
        #[arg(short, long)]
        theme: Option<ThemeColor>,

        /// Image URL (http or https)
        #[arg(short, long, value_parser = ImageSource::network)]
        image: Option<ImageSource>,
    },

    /// Write a starter configuration file with the default settings
    Init {
        /// Where to write (defaults to the user config directory)
        path: Option<PathBuf>,

        /// Replace an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Returns the editor's log file, which keeps logs off the TUI screen.
fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("dday").join("dday.log"))
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> anyhow::Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

async fn run_editor(config: Config) -> anyhow::Result<()> {
    // Config problems should surface before the screen is taken over.
    let mut app = App::new(config, Local::now().date_naive())?;

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();
    let mut terminal = terminal::setup_terminal()?;

    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    result
}

async fn run_embed(
    config: Config,
    link: &str,
    output: Option<&Path>,
    pixel_ratio: Option<u32>,
) -> anyhow::Result<()> {
    let now = Local::now();
    let host = EmbedHost::from_link(link, &now);
    let loader = AssetLoader::new(config.images.timeout(), config.images.max_bytes)?;

    match output {
        Some(path) => {
            let ratio = pixel_ratio.unwrap_or(config.export.pixel_ratio);
            let written = host
                .write_file(path, now.naive_local(), &loader, ratio)
                .await?;
            println!("{}", written.display());
        }
        None => {
            let image = host.load_image(&loader).await;
            host.draw_inline(now.naive_local(), image.as_ref())?;
        }
    }
    Ok(())
}

fn print_link(
    config: &Config,
    date: Option<NaiveDate>,
    style: Option<WidgetStyle>,
    theme: Option<ThemeColor>,
    image: Option<ImageSource>,
) -> anyhow::Result<()> {
    let base = config.embed.url()?;
    let mut widget = WidgetConfig::without_image(
        date.unwrap_or_else(|| Local::now().date_naive()),
        style.unwrap_or(config.defaults.style),
        theme.unwrap_or(config.defaults.theme),
    );
    widget.set_image(image);

    let link = embed_link(&base, &widget);
    debug!(url = %link.url, "Built embed link");
    println!("{}", link.url);
    Ok(())
}

async fn write_starter_config(path: Option<PathBuf>, force: bool) -> anyhow::Result<PathBuf> {
    let path = match path {
        Some(path) => path,
        None => dday_config::persistence::init_config_path()?,
    };
    Config::default().write_to(&path, force).await?;
    info!(path = %path.display(), "Wrote starter config");
    Ok(path)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Edit);

    let log_file = match command {
        Command::Edit => log_file_path(),
        _ => None,
    };
    init_logging(cli.verbose, log_file.as_deref())?;

    // A broken config file must not stop `init` from replacing it.
    if let Command::Init { path, force } = &command {
        let written = write_starter_config(path.clone(), *force).await?;
        println!("{}", written.display());
        return Ok(());
    }

    let config = Config::resolve(cli.config.as_deref()).await?;
    info!(command = ?command, "Starting dday");

    match command {
        Command::Edit => run_editor(config).await,
        Command::Embed {
            link,
            output,
            pixel_ratio,
        } => run_embed(config, &link, output.as_deref(), pixel_ratio).await,
        Command::Link {
            date,
            style,
            theme,
            image,
        } => print_link(&config, date, style, theme, image),
        // Written above, before the config file is parsed.
        Command::Init { .. } => Ok(()),
    }
}
