use image::{DynamicImage, Rgba, RgbaImage};
use tracing::{debug, info, instrument};

use crate::compositing::{blit_rgba, check_compatible};
use crate::config::AtlasConfig;
use crate::error::{AtlasError, Result};
use crate::layout::layout_row;
use crate::model::{AssetEntry, AtlasStats, RowLayout, Uv, UvTransform};
use crate::registry::AssetRegistry;
use crate::session::ParseSession;

/// Collects per-material images and packs them into one single-row RGBA atlas.
///
/// Usage is phased: register every image with [`add`](Self::add), call
/// [`generate`](Self::generate) once, then query transforms by key. Calling
/// [`cleanup`](Self::cleanup) returns the builder to its initial state.
#[derive(Debug)]
pub struct AtlasBuilder {
    config: AtlasConfig,
    registry: AssetRegistry,
    atlas: Option<RgbaImage>,
    layout: Option<RowLayout>,
}

impl Default for AtlasBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AtlasBuilder {
    pub fn new() -> Self {
        Self {
            config: AtlasConfig::default(),
            registry: AssetRegistry::new(),
            atlas: None,
            layout: None,
        }
    }

    /// Create a builder with a custom configuration; the configuration is validated.
    pub fn with_config(config: AtlasConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// Registers an entry. Keys are not checked for uniqueness.
    ///
    /// Fails with [`AtlasError::AlreadyGenerated`] once the atlas exists, since a
    /// late entry would have no slot; call [`cleanup`](Self::cleanup) first.
    pub fn add(&mut self, entry: AssetEntry) -> Result<()> {
        if self.layout.is_some() {
            return Err(AtlasError::AlreadyGenerated);
        }
        self.registry.add(entry);
        Ok(())
    }

    pub fn add_image(&mut self, key: impl Into<String>, image: DynamicImage) -> Result<()> {
        self.add(AssetEntry::new(key, image))
    }

    pub fn has_entries(&self) -> bool {
        !self.registry.is_empty()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Entries in their current order: registration order before `generate`,
    /// placed (tallest-first) order after.
    pub fn entries(&self) -> impl Iterator<Item = &AssetEntry> {
        self.registry.iter()
    }

    /// True once `generate` has produced an atlas (even if it was since taken).
    pub fn is_generated(&self) -> bool {
        self.layout.is_some()
    }

    #[instrument(skip_all, fields(entries = self.registry.len()))]
    /// Packs all registered images into the atlas and computes their UV transforms.
    ///
    /// Notes:
    /// - With no entries this is a no-op and the atlas stays absent.
    /// - Every entry is validated before anything is modified; on error the
    ///   builder is left exactly as it was.
    /// - Source pixels are released as soon as they are copied.
    /// - A second call fails with [`AtlasError::AlreadyGenerated`].
    pub fn generate(&mut self) -> Result<()> {
        if self.layout.is_some() {
            return Err(AtlasError::AlreadyGenerated);
        }
        if self.registry.is_empty() {
            debug!("no entries registered; skipping atlas generation");
            return Ok(());
        }

        for entry in self.registry.iter() {
            match entry.bitmap() {
                Some(img) => check_compatible(entry.key(), img)?,
                None => {
                    return Err(AtlasError::IncompatibleImage {
                        key: entry.key().to_string(),
                        reason: "pixel data already released".into(),
                    });
                }
            }
        }

        let sizes: Vec<(u32, u32)> = self
            .registry
            .iter()
            .map(|e| (e.width(), e.height()))
            .collect();
        let Some(layout) = layout_row(&sizes)? else {
            return Ok(());
        };
        if layout.width > self.config.max_width || layout.height > self.config.max_height {
            return Err(AtlasError::AtlasTooLarge {
                width: layout.width,
                height: layout.height,
                max_width: self.config.max_width,
                max_height: self.config.max_height,
            });
        }

        let mut canvas = RgbaImage::from_pixel(
            layout.width,
            layout.height,
            Rgba(self.config.background_color),
        );
        self.registry.apply_order(&layout.order);
        for (entry, slot) in self.registry.iter_mut().zip(&layout.slots) {
            if let Some(bitmap) = entry.take_bitmap() {
                let rgba = bitmap.into_rgba8();
                blit_rgba(&rgba, &mut canvas, slot.x, 0);
            }
            entry.transform = slot.uv_transform(layout.width, layout.height);
            debug!(
                key = entry.key(),
                x = slot.x,
                w = slot.width,
                h = slot.height,
                "placed"
            );
        }

        let stats = AtlasStats::from_layout(&layout);
        info!(
            width = layout.width,
            height = layout.height,
            entries = stats.num_entries,
            occupancy = format!("{:.2}%", stats.occupancy * 100.0),
            "atlas generated"
        );
        self.atlas = Some(canvas);
        self.layout = Some(layout);
        Ok(())
    }

    /// The generated atlas, or `None` before `generate`.
    pub fn atlas(&self) -> Option<&RgbaImage> {
        self.atlas.as_ref()
    }

    /// Moves the atlas out (e.g. for upload). Transforms remain queryable.
    pub fn take_atlas(&mut self) -> Option<RgbaImage> {
        self.atlas.take()
    }

    /// Placement computed by `generate`, in the same order as [`entries`](Self::entries).
    pub fn layout(&self) -> Option<&RowLayout> {
        self.layout.as_ref()
    }

    /// First entry registered under `key`.
    pub fn get_by_key(&self, key: &str) -> Option<&AssetEntry> {
        self.registry.find_by_key(key)
    }

    /// Transform for `key`, or `None` if unknown or not yet generated.
    pub fn transform(&self, key: &str) -> Option<UvTransform> {
        self.layout.as_ref()?;
        self.get_by_key(key).map(AssetEntry::transform)
    }

    /// Maps a face UV for material `key` into atlas space.
    pub fn remap_uv(&self, key: &str, uv: Uv) -> Option<Uv> {
        self.transform(key).map(|t| t.apply(uv))
    }

    pub fn stats(&self) -> Option<AtlasStats> {
        self.layout.as_ref().map(AtlasStats::from_layout)
    }

    /// Releases the atlas and all entries, and clears the parse session's geometry.
    pub fn cleanup(&mut self, session: &mut ParseSession) {
        debug!(entries = self.registry.len(), "cleanup");
        self.atlas = None;
        self.layout = None;
        self.registry.clear();
        session.clear();
    }
}
