//! Wrapping of legend entries into a grid of rows or columns.
//!
//! Everything here is a pure function of measured entry sizes, so the
//! layout can be tested without a drawing surface.

/// Fraction of an extra line above which one more line is added
const CROWDED_LINE_FRACTION: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapConfig {
    /// Largest box the legend may occupy, `[width, height]`
    pub max_box: [f32; 2],
    /// Vertical legends wrap columns of entries, horizontal legends wrap rows
    pub vertical: bool,
    pub padding: f32,
    pub item_spacing: f32,
}

/// Aggregate extents of a sequence of entries along both axes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemDimensions {
    pub total_width: f32,
    pub total_height: f32,
    pub max_width: f32,
    pub max_height: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WrapLayout {
    pub width: f32,
    pub height: f32,
    pub items_per_line: usize,
    pub line_count: usize,
    /// Grid cell size shared by every entry
    pub item_width: f32,
    pub item_height: f32,
    /// Local entry positions. `x` is the left edge of the entry and `y` the
    /// vertical center of its row.
    pub positions: Vec<[f32; 2]>,
}

impl WrapLayout {
    pub fn size(&self) -> [f32; 2] {
        [self.width, self.height]
    }
}

/// Accumulates entry sizes including the spacing that leads each entry
pub fn item_dimensions(sizes: &[[f32; 2]], config: &WrapConfig) -> ItemDimensions {
    let mut dims = ItemDimensions::default();
    for (i, [w, h]) in sizes.iter().copied().enumerate() {
        let spacing = if i == 0 {
            if config.vertical {
                config.padding + h / 2.0
            } else {
                config.padding
            }
        } else if config.vertical {
            config.item_spacing / 2.0
        } else {
            config.item_spacing
        };
        dims.total_width += w + spacing;
        dims.total_height += h + spacing;
        dims.max_width = dims.max_width.max(w);
        dims.max_height = dims.max_height.max(h);
    }
    dims
}

/// Number of lines and entries per line needed to fit `total` into `available`.
///
/// Returns `(line_count, items_per_line)`.
pub fn wrap_counts(item_count: usize, total: f32, available: f32) -> (usize, usize) {
    if item_count == 0 {
        return (0, 0);
    }
    if available.is_nan() || available <= 0.0 {
        return (item_count, 1);
    }
    if total <= available {
        return (1, item_count);
    }

    let ratio = total / available;
    let mut lines = ratio.ceil();
    if ratio.fract() > CROWDED_LINE_FRACTION {
        lines += 1.0;
    }
    let lines = (lines as usize).clamp(1, item_count);
    let per_line = item_count.div_ceil(lines);
    (item_count.div_ceil(per_line), per_line)
}

/// Measures the entries and wraps them so the legend fits `max_box`
/// along its wrap axis
pub fn measure_and_wrap(sizes: &[[f32; 2]], config: &WrapConfig) -> WrapLayout {
    let padding = config.padding;
    if sizes.is_empty() {
        return WrapLayout {
            width: 2.0 * padding,
            height: 2.0 * padding,
            ..Default::default()
        };
    }

    let dims = item_dimensions(sizes, config);
    let (total, available) = if config.vertical {
        (dims.total_height, config.max_box[1] - 2.0 * padding)
    } else {
        (dims.total_width, config.max_box[0] - 2.0 * padding)
    };
    let (line_count, items_per_line) = wrap_counts(sizes.len(), total, available);
    log::debug!(
        "wrapping {} legend entries: total {total}, available {available}, \
         {line_count} lines of {items_per_line}",
        sizes.len()
    );

    let spacing = if config.vertical {
        config.item_spacing / 2.0
    } else {
        config.item_spacing
    };
    let cell_w = dims.max_width + spacing;
    let cell_h = dims.max_height + spacing;

    let positions = (0..sizes.len())
        .map(|i| {
            let line = (i / items_per_line) as f32;
            let cursor = (i % items_per_line) as f32;
            let (column, row) = if config.vertical {
                (line, cursor)
            } else {
                (cursor, line)
            };
            [
                column * cell_w + padding,
                row * cell_h + padding + dims.max_height / 2.0,
            ]
        })
        .collect();

    let (columns, rows) = if config.vertical {
        (line_count, items_per_line)
    } else {
        (items_per_line, line_count)
    };

    WrapLayout {
        width: columns as f32 * cell_w - spacing + 2.0 * padding,
        height: rows as f32 * cell_h - spacing + 2.0 * padding,
        items_per_line,
        line_count,
        item_width: dims.max_width,
        item_height: dims.max_height,
        positions,
    }
}
