//! Single-row layout: items sorted tallest first, placed left to right at y = 0.

use std::cmp::Reverse;

use crate::error::{AtlasError, Result};
use crate::model::{RowLayout, Slot, UvTransform};

/// Lays out `(width, height)` sizes in one row.
///
/// Sorting is stable, so items of equal height keep their input order.
/// Returns `Ok(None)` for an empty input and [`AtlasError::WidthOverflow`] when
/// the summed width does not fit in `u32`.
pub fn layout_row(sizes: &[(u32, u32)]) -> Result<Option<RowLayout>> {
    if sizes.is_empty() {
        return Ok(None);
    }
    let mut order: Vec<usize> = (0..sizes.len()).collect();
    order.sort_by_key(|&i| Reverse(sizes[i].1));

    let height = sizes[order[0]].1;
    let mut slots = Vec::with_capacity(order.len());
    let mut cursor = 0u32;
    for &i in &order {
        let (w, h) = sizes[i];
        slots.push(Slot {
            x: cursor,
            width: w,
            height: h,
        });
        cursor = cursor.checked_add(w).ok_or_else(|| AtlasError::WidthOverflow {
            total: sizes.iter().map(|&(w, _)| w as u64).sum(),
        })?;
    }

    Ok(Some(RowLayout {
        width: cursor,
        height,
        order,
        slots,
    }))
}

/// Computes UV transforms for keyed sizes without touching pixels.
///
/// Results are returned in placed (tallest-first) order. Zero-sized items are
/// rejected since they cannot be addressed in UV space, and a summed width
/// beyond `u32` fails with [`AtlasError::WidthOverflow`].
pub fn pack_layout<K: Into<String>>(
    items: Vec<(K, u32, u32)>,
) -> Result<Vec<(String, UvTransform)>> {
    let items: Vec<(String, u32, u32)> = items
        .into_iter()
        .map(|(k, w, h)| (k.into(), w, h))
        .collect();
    for (key, w, h) in &items {
        if *w == 0 || *h == 0 {
            return Err(AtlasError::IncompatibleImage {
                key: key.clone(),
                reason: format!("zero-sized image ({}x{})", w, h),
            });
        }
    }
    let sizes: Vec<(u32, u32)> = items.iter().map(|(_, w, h)| (*w, *h)).collect();
    let Some(layout) = layout_row(&sizes)? else {
        return Ok(Vec::new());
    };
    Ok(layout
        .order
        .iter()
        .zip(&layout.slots)
        .map(|(&i, slot)| {
            (
                items[i].0.clone(),
                slot.uv_transform(layout.width, layout.height),
            )
        })
        .collect())
}
