pub mod color;
pub mod error;
pub mod frame;
pub mod types;
pub mod value;
