use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};

/// A texture coordinate pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Uv {
    pub u: f32,
    pub v: f32,
}

impl Uv {
    pub fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }
}

/// Affine remap from an image's own [0,1]x[0,1] UV space into its region of the atlas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UvTransform {
    pub u_offset: f32,
    pub v_offset: f32,
    pub u_scale: f32,
    pub v_scale: f32,
}

impl UvTransform {
    /// Maps a local UV into atlas space: `offset + uv * scale`, per axis.
    pub fn apply(&self, uv: Uv) -> Uv {
        Uv {
            u: self.u_offset + uv.u * self.u_scale,
            v: self.v_offset + uv.v * self.v_scale,
        }
    }
}

/// A registered image plus the transform computed for it by `generate`.
///
/// The transform is all zeros until the owning builder has generated its atlas.
/// After generation the pixel buffer is released; the entry keeps its key,
/// source dimensions and transform.
#[derive(Debug, Clone)]
pub struct AssetEntry {
    key: String,
    bitmap: Option<DynamicImage>,
    width: u32,
    height: u32,
    pub(crate) transform: UvTransform,
}

impl AssetEntry {
    pub fn new(key: impl Into<String>, bitmap: DynamicImage) -> Self {
        let (width, height) = bitmap.dimensions();
        Self {
            key: key.into(),
            bitmap: Some(bitmap),
            width,
            height,
            transform: UvTransform::default(),
        }
    }

    /// Material or texture identifier.
    pub fn key(&self) -> &str {
        &self.key
    }
    /// Source image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }
    /// Source image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
    /// Source pixels, or `None` once they have been copied into the atlas.
    pub fn bitmap(&self) -> Option<&DynamicImage> {
        self.bitmap.as_ref()
    }
    pub fn transform(&self) -> UvTransform {
        self.transform
    }
    pub fn u_offset(&self) -> f32 {
        self.transform.u_offset
    }
    pub fn v_offset(&self) -> f32 {
        self.transform.v_offset
    }
    pub fn u_scale(&self) -> f32 {
        self.transform.u_scale
    }
    pub fn v_scale(&self) -> f32 {
        self.transform.v_scale
    }

    pub(crate) fn take_bitmap(&mut self) -> Option<DynamicImage> {
        self.bitmap.take()
    }
}

/// Pixel placement of one entry within the single-row atlas. `y` is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub x: u32,
    pub width: u32,
    pub height: u32,
}

impl Slot {
    /// Transform of this slot relative to an atlas of `atlas_w` x `atlas_h`.
    pub fn uv_transform(&self, atlas_w: u32, atlas_h: u32) -> UvTransform {
        UvTransform {
            u_offset: self.x as f32 / atlas_w as f32,
            v_offset: 0.0,
            u_scale: self.width as f32 / atlas_w as f32,
            v_scale: self.height as f32 / atlas_h as f32,
        }
    }
}

/// Result of laying out a set of sizes in one row, tallest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowLayout {
    /// Sum of all widths.
    pub width: u32,
    /// Height of the tallest item.
    pub height: u32,
    /// `order[i]` is the input index of the i-th placed item.
    pub order: Vec<usize>,
    /// `slots[i]` is the placement of `order[i]`.
    pub slots: Vec<Slot>,
}

/// Statistics about how much of the atlas is covered by images.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtlasStats {
    pub num_entries: usize,
    pub atlas_width: u32,
    pub atlas_height: u32,
    /// `atlas_width * atlas_height`.
    pub total_area: u64,
    /// Sum of `width * height` over all entries.
    pub used_area: u64,
    /// `used_area / total_area` (0.0 to 1.0).
    pub occupancy: f64,
}

impl AtlasStats {
    pub fn from_layout(layout: &RowLayout) -> Self {
        let total_area = (layout.width as u64) * (layout.height as u64);
        let used_area: u64 = layout
            .slots
            .iter()
            .map(|s| (s.width as u64) * (s.height as u64))
            .sum();
        let occupancy = if total_area > 0 {
            used_area as f64 / total_area as f64
        } else {
            0.0
        };
        Self {
            num_entries: layout.slots.len(),
            atlas_width: layout.width,
            atlas_height: layout.height,
            total_area,
            used_area,
            occupancy,
        }
    }

    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Entries: {}, Size: {}x{}, Occupancy: {:.2}%, Total Area: {} px², Used Area: {} px²",
            self.num_entries,
            self.atlas_width,
            self.atlas_height,
            self.occupancy * 100.0,
            self.total_area,
            self.used_area,
        )
    }

    /// Returns uncovered space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.total_area.saturating_sub(self.used_area)
    }

    /// Returns uncovered space as a percentage (0.0 to 100.0).
    pub fn waste_percentage(&self) -> f64 {
        if self.total_area > 0 {
            (self.wasted_area() as f64 / self.total_area as f64) * 100.0
        } else {
            0.0
        }
    }
}
