use serde_json::{Value, json};

use crate::builder::AtlasBuilder;

/// Serialize a generated atlas as `{ size, entries, meta }`.
///
/// Entries are listed in placed order, each with its pixel frame and UV transform.
/// Returns `None` if the builder has not generated an atlas yet.
pub fn to_json(builder: &AtlasBuilder) -> Option<Value> {
    let layout = builder.layout()?;
    let entries: Vec<Value> = builder
        .entries()
        .zip(&layout.slots)
        .map(|(entry, slot)| {
            json!({
                "key": entry.key(),
                "frame": {"x": slot.x, "y": 0, "w": slot.width, "h": slot.height},
                "uv": entry.transform(),
            })
        })
        .collect();
    Some(json!({
        "size": {"w": layout.width, "h": layout.height},
        "entries": entries,
        "meta": {
            "app": "row-atlas",
            "version": env!("CARGO_PKG_VERSION"),
            "format": "RGBA8888",
            "layout": "single-row",
        },
    }))
}
