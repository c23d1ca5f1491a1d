use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::hash::{DefaultHasher, Hash, Hasher};

use rstar::AABB;
use smartlegend_text::measurement::approx::ApproxTextMeasurer;
use smartlegend_text::measurement::TextMeasurer;

use crate::attributes::GlyphAttributes;
use crate::geometry::MarkGeometryUtils;
use crate::marks::mark::SceneMark;

/// Handle to a glyph owned by a [`DrawingSurface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphId(u64);

impl GlyphId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Display for GlyphId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "glyph#{}", self.0)
    }
}

/// The 2D drawing collaborator that owns and renders glyphs.
///
/// Operations on ids that were never issued or were already destroyed must
/// be no-ops.
pub trait DrawingSurface {
    fn add_glyph(&mut self, mark: SceneMark) -> GlyphId;

    /// Applies a partial update. `animate` is a hint that the renderer may
    /// tween to the new state.
    fn set_attributes(&mut self, id: GlyphId, attrs: GlyphAttributes, animate: bool);

    fn bounding_box(&self, id: GlyphId) -> Option<AABB<[f32; 2]>>;

    fn destroy(&mut self, id: GlyphId);
}

/// In-memory surface that keeps every glyph and counts the updates it
/// receives. Used by headless hosts and tests.
pub struct RecordingSurface {
    glyphs: BTreeMap<GlyphId, SceneMark>,
    next_id: u64,
    attribute_updates: usize,
    animated_updates: usize,
    measurer: Box<dyn TextMeasurer>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::with_measurer(Box::new(ApproxTextMeasurer::default()))
    }
}

impl std::fmt::Debug for RecordingSurface {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingSurface")
            .field("glyphs", &self.glyphs.len())
            .field("attribute_updates", &self.attribute_updates)
            .finish()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_measurer(measurer: Box<dyn TextMeasurer>) -> Self {
        Self {
            glyphs: BTreeMap::new(),
            next_id: 0,
            attribute_updates: 0,
            animated_updates: 0,
            measurer,
        }
    }

    pub fn glyph(&self, id: GlyphId) -> Option<&SceneMark> {
        self.glyphs.get(&id)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn glyphs(&self) -> impl Iterator<Item = (GlyphId, &SceneMark)> {
        self.glyphs.iter().map(|(id, mark)| (*id, mark))
    }

    /// Number of `set_attributes` calls that reached a live glyph
    pub fn attribute_updates(&self) -> usize {
        self.attribute_updates
    }

    pub fn animated_updates(&self) -> usize {
        self.animated_updates
    }

    pub fn reset_counters(&mut self) {
        self.attribute_updates = 0;
        self.animated_updates = 0;
    }

    /// Glyph ids in paint order: ascending z-index, then creation order
    pub fn draw_order(&self) -> Vec<GlyphId> {
        let mut ids: Vec<_> = self.glyphs.keys().copied().collect();
        ids.sort_by_key(|id| (self.glyphs[id].zindex().unwrap_or(0), *id));
        ids
    }

    /// Hash of every glyph's current state
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for (id, mark) in &self.glyphs {
            id.hash(&mut hasher);
            mark.hash(&mut hasher);
        }
        hasher.finish()
    }
}

impl DrawingSurface for RecordingSurface {
    fn add_glyph(&mut self, mark: SceneMark) -> GlyphId {
        let id = GlyphId(self.next_id);
        self.next_id += 1;
        log::trace!("add {} {id}", mark.kind_name());
        self.glyphs.insert(id, mark);
        id
    }

    fn set_attributes(&mut self, id: GlyphId, attrs: GlyphAttributes, animate: bool) {
        let Some(mark) = self.glyphs.get_mut(&id) else {
            log::trace!("ignoring update of unknown {id}");
            return;
        };
        if let Err(err) = mark.apply(&attrs) {
            log::warn!("rejected update of {id}: {err}");
            return;
        }
        self.attribute_updates += 1;
        if animate {
            self.animated_updates += 1;
        }
    }

    fn bounding_box(&self, id: GlyphId) -> Option<AABB<[f32; 2]>> {
        self.glyphs
            .get(&id)
            .map(|mark| mark.bounding_box_with(self.measurer.as_ref()))
    }

    fn destroy(&mut self, id: GlyphId) {
        if self.glyphs.remove(&id).is_none() {
            log::trace!("ignoring destroy of unknown {id}");
        }
    }
}
