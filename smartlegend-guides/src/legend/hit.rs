use rstar::{Envelope, PointDistance, RTree, RTreeObject, AABB};

/// Hit mask of a legend entry, keyed by the entry's index
#[derive(Debug, Clone, PartialEq)]
pub struct ItemHitRegion {
    pub index: usize,
    pub envelope: AABB<[f32; 2]>,
}

impl ItemHitRegion {
    fn center_distance_2(&self, point: &[f32; 2]) -> f32 {
        let [cx, cy] = self.envelope.center();
        (cx - point[0]).powi(2) + (cy - point[1]).powi(2)
    }
}

impl RTreeObject for ItemHitRegion {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl PointDistance for ItemHitRegion {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        self.envelope.distance_2(point)
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        self.envelope.contains_point(point)
    }
}

/// Spatial index over the hit masks of the positioned entries
#[derive(Debug, Clone, Default)]
pub struct HitIndex {
    rtree: RTree<ItemHitRegion>,
}

impl HitIndex {
    pub fn new(regions: Vec<ItemHitRegion>) -> Self {
        Self {
            rtree: RTree::bulk_load(regions),
        }
    }

    pub fn size(&self) -> usize {
        self.rtree.size()
    }

    /// Index of the entry whose mask contains `point`.
    ///
    /// Masks are taller than their rows and may overlap, in which case the
    /// mask centered closest to the point wins.
    pub fn locate(&self, point: [f32; 2]) -> Option<usize> {
        self.rtree
            .locate_all_at_point(&point)
            .min_by(|a, b| {
                a.center_distance_2(&point)
                    .total_cmp(&b.center_distance_2(&point))
                    .then(a.index.cmp(&b.index))
            })
            .map(|region| region.index)
    }
}
