//! Bannerkit Style Model
//!
//! Defines the data contracts for a banner composition:
//! - **Parameters:** The [`StyleParameters`] record driving every redraw
//! - **Transform:** Zoom, rotation, and flip applied to the base image
//! - **Layout:** The fixed geometry table overlays are positioned from
//! - **Color:** Parsing and formatting of banner and overlay colors
//!
//! Everything here is plain data; rasterisation lives in
//! `bannerkit-render-engine`.

pub mod color;
pub mod layout;
pub mod params;
pub mod transform;

pub use color::*;
pub use layout::*;
pub use params::*;
pub use transform::*;
