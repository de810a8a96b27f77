/// Store-to-animation and animation-to-store conversions.
pub mod draw;
