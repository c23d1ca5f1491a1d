use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SmartLegendTextError {
    #[error("Invalid font shorthand `{0}`: {1}")]
    InvalidFont(String, String),

    #[error("Invalid font size `{0}`")]
    InvalidFontSize(String),
}
