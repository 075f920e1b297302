//! Single-row texture atlas builder for per-face model materials.
//!
//! - Registry: images are registered with a material key in discovery order
//! - Packer: `generate` sorts tallest first, lays images out left to right and
//!   records a UV offset/scale transform per key
//! - Consumers rewrite each face UV `(u, v)` as `(u_offset + u * u_scale, v_offset + v * v_scale)`
//!
//! Quick example:
//! ```ignore
//! use image::ImageReader;
//! use row_atlas_core::{AtlasBuilder, ParseSession, Uv};
//! # fn main() -> anyhow::Result<()> {
//! let mut session = ParseSession::new();
//! let mut builder = AtlasBuilder::new();
//! builder.add_image("brick", ImageReader::open("brick.png")?.decode()?)?;
//! builder.add_image("wood", ImageReader::open("wood.png")?.decode()?)?;
//! builder.generate()?;
//! let uv = builder.remap_uv("wood", Uv::new(0.5, 0.5));
//! builder.atlas().map(|a| a.save("atlas.png")).transpose()?;
//! builder.cleanup(&mut session);
//! # Ok(()) }
//! ```

pub mod builder;
pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
mod registry;
pub mod session;

pub use builder::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use layout::*;
pub use model::*;
pub use session::*;

/// Convenience prelude for common types and functions.
/// Importing `row_atlas_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::builder::AtlasBuilder;
    pub use crate::config::{AtlasConfig, AtlasConfigBuilder};
    pub use crate::error::{AtlasError, Result};
    pub use crate::layout::{layout_row, pack_layout};
    pub use crate::model::{AssetEntry, AtlasStats, RowLayout, Slot, Uv, UvTransform};
    pub use crate::session::ParseSession;
}
