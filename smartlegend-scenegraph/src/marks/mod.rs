pub mod line;
pub mod mark;
pub mod rect;
pub mod symbol;
pub mod text;

use std::hash::Hash;

use ordered_float::OrderedFloat;

pub(crate) fn hash_f32s<H: std::hash::Hasher>(values: &[f32], state: &mut H) {
    values.iter().for_each(|v| OrderedFloat(*v).hash(state));
}
