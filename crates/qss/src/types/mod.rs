//! Core value types shared by the property registry and the cascade store.

pub mod color;
pub mod named;

pub use color::{Color, ColorParseError};
