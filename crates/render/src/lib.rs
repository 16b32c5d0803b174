//! Widget rendering for dday.
//!
//! [`render`] turns a [`dday_protocol::WidgetConfig`] and the current local
//! time into a [`WidgetRender`]: the D-Day label, the caption and the
//! static style treatment. Painters consume that value:
//!
//! - [`svg::paint`] produces a standalone SVG document
//! - [`raster::rasterize_png`] turns that document into PNG bytes
//! - [`thumbnail::thumbnail`] samples the avatar image for terminal display
//!
//! Images are loaded separately through [`asset::AssetLoader`]; a missing
//! or failed image never fails a render.

pub mod asset;
pub mod countdown;
pub mod error;
pub mod raster;
pub mod svg;
pub mod thumbnail;
pub mod treatment;
pub mod widget;

pub use asset::{AssetLoader, AssetState, ImageAsset, LoadedImage};
pub use error::{AssetError, RenderError, Result};
pub use treatment::StyleTreatment;
pub use widget::{Avatar, WidgetRender, render};
