use smartlegend_common::error::CommonError;
use smartlegend_text::error::SmartLegendTextError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SmartLegendError {
    #[error("Invalid legend configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid label font: {0}")]
    InvalidFont(#[from] SmartLegendTextError),

    #[error("Invalid series style: {0}")]
    InvalidStyle(#[from] CommonError),
}
