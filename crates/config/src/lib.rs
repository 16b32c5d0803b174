//! Configuration management for the dday application.
//!
//! This crate handles loading, validating, and persisting application
//! settings from multiple sources (files, environment variables, defaults).
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`sections`]: Embed, export, widget default and image settings
//! - [`env`]: Environment variable overrides
//! - [`persistence`]: Config file reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! Configuration is loaded from multiple sources with the following priority
//! (highest to lowest):
//!
//! 1. Environment variables (`DDAY_EMBED_BASE_URL`, `DDAY_EXPORT_DIR`,
//!    `DDAY_PIXEL_RATIO`)
//! 2. An explicit `--config` file, or local config (`./dday.json5` or
//!    `./dday.json`)
//! 3. User config (`~/.config/dday/config.json5` or `~/.config/dday/config.json`)
//! 4. Built-in defaults
//!
//! # File Format
//!
//! ```json5
//! {
//!   embed: { base_url: "https://dday.example/embed" },
//!   export: { directory: ".", file_name: "my-dday-widget.png", pixel_ratio: 3 },
//!   defaults: { style: "3d", theme: "#C4E4FF" },
//!   images: { timeout_secs: 10, max_bytes: 10485760 },
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use dday_config::Config;
//!
//! # async fn example() -> dday_config::Result<()> {
//! let config = Config::load().await?;
//! println!("Links point at {}", config.embed.base_url);
//! println!("Exports go to {}", config.export.output_path().display());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod env;
pub mod error;
pub mod persistence;
pub mod sections;

// Re-export primary types at crate root for convenience
pub use config::Config;
pub use error::{ConfigError, Result};
pub use sections::{EmbedConfig, ExportConfig, ImagesConfig, WidgetDefaults};
