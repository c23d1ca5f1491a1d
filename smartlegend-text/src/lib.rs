pub mod error;
pub mod font;
pub mod measurement;
pub mod types;
