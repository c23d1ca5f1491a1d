use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SmartLegendSceneGraphError {
    #[error("Attribute `{attribute}` is not supported by {mark} glyphs")]
    UnsupportedAttribute {
        mark: &'static str,
        attribute: &'static str,
    },

    #[error("Attribute `{0}` must be finite")]
    NonFiniteAttribute(&'static str),
}
