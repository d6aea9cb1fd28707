//! Bannerkit Render Engine
//!
//! Composites a base photo, an optional logo, and the overlays described by
//! a `StyleParameters` record into one flattened raster, then encodes it.
//!
//! # Pipeline Architecture
//!
//! ```text
//! photo file ──► acquire ──► RasterImage ──┐
//!                                          │
//! logo file ───► acquire ──► RasterImage ──┤
//!                                          ├── Compositor ──► Canvas ──► export
//! StyleParameters ─────────────────────────┤                              │
//!                                          │                              ▼
//! FontSet + LayoutConstants ───────────────┘                     banner_<ts>.png
//! ```

pub mod acquire;
pub mod compositor;
pub mod export;
pub mod raster;
pub mod session;
pub mod text;

pub use acquire::{decode_image, load_image};
pub use compositor::Compositor;
pub use export::*;
pub use raster::{Canvas, RasterImage};
pub use session::EditorSession;
pub use text::FontSet;
