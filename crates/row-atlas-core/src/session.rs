use std::ops::Range;

use crate::model::{Uv, UvTransform};

/// Geometry accumulated by a model parser while it discovers materials.
///
/// The buffers share their lifetime with the atlas built for the same parse,
/// which is why [`AtlasBuilder::cleanup`](crate::AtlasBuilder::cleanup) takes
/// the session and clears it together with the atlas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseSession {
    pub vertices: Vec<[f32; 3]>,
    pub tex_coords: Vec<Uv>,
    pub normals: Vec<[f32; 3]>,
}

impl ParseSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_vertex(&mut self, v: [f32; 3]) {
        self.vertices.push(v);
    }

    pub fn push_tex_coord(&mut self, uv: Uv) {
        self.tex_coords.push(uv);
    }

    pub fn push_normal(&mut self, n: [f32; 3]) {
        self.normals.push(n);
    }

    /// True if all three buffers are empty.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.tex_coords.is_empty() && self.normals.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.tex_coords.clear();
        self.normals.clear();
    }

    /// Rewrites `tex_coords[range]` in place into atlas space.
    ///
    /// The range is clamped to the buffer length.
    pub fn remap_tex_coords(&mut self, range: Range<usize>, transform: &UvTransform) {
        let len = self.tex_coords.len();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        for uv in &mut self.tex_coords[start..end] {
            *uv = transform.apply(*uv);
        }
    }
}
