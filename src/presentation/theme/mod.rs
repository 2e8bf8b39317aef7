//! Color palettes for light and dark mode.

pub mod adapter;
mod service;

pub use service::{Theme, parse_color};
