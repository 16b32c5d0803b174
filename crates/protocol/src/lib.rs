//! Shared protocol types for the dday application.
//!
//! This crate defines the widget configuration model and the embed link
//! codec shared by the editor, the embed host and the renderer.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`widget`]: The [`WidgetConfig`] struct
//! - [`style`]: Style variants (`flat`, `3d`, `pixel`)
//! - [`color`]: The theme palette and custom colors
//! - [`image`]: Network and session-local image references
//! - [`date`]: Manual `YYYY-MM-DD` date entry
//! - [`link`]: Embed link encoding and tolerant decoding
//! - [`message`]: Editor event messages
//! - [`error`]: Error types for strict parsing
//!
//! # Examples
//!
//! Encoding a configuration and decoding it back:
//!
//! ```
//! use chrono::{FixedOffset, NaiveDate, TimeZone};
//! use dday_protocol::{ImageSource, ThemeColor, WidgetConfig, WidgetStyle};
//! use dday_protocol::link::{decode_query_in, encode_query_in};
//!
//! let tz = FixedOffset::east_opt(9 * 3600).unwrap();
//! let config = WidgetConfig {
//!     target_date: NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
//!     style: WidgetStyle::Pixel,
//!     theme: ThemeColor::default(),
//!     image: ImageSource::network("https://example.com/tree.png").ok(),
//! };
//!
//! let query = encode_query_in(&config, &tz);
//! let now = tz.with_ymd_and_hms(2024, 12, 1, 9, 0, 0).unwrap();
//! assert_eq!(decode_query_in(&query, &now), config);
//! ```

pub mod color;
pub mod date;
pub mod error;
pub mod image;
pub mod link;
pub mod message;
pub mod style;
pub mod widget;

// Re-export primary types at crate root for convenience
pub use color::{Palette, Rgb, ThemeColor};
pub use error::{ProtocolError, Result};
pub use image::{ImageSource, LocalImage, NetworkImage};
pub use link::{EmbedLink, decode_query, decode_query_in, embed_link, encode_query};
pub use message::Message;
pub use style::WidgetStyle;
pub use widget::WidgetConfig;
