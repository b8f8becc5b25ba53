// This module contains the definition of `BarChart`.
pub mod bar;

// This module contains the definition of `LatencyHistogram`.
pub mod histogram;

// This module contains typeface discovery for chart text.
pub mod font;

// This module contains the definition of `Renderer`.
pub mod render;

// Re-exports.
pub use bar::{Bar, BarChart};
pub use font::Typeface;
pub use histogram::LatencyHistogram;
pub use render::Renderer;
