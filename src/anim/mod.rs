pub mod color;
pub mod ease;
pub mod phrases;
pub mod timeline;
pub mod transition;

pub use color::Rgb;
pub use ease::{clamp01, ease_in_out_quart, ease_out_cubic, fhash, lerp};
