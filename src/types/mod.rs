pub mod conversions;
pub mod structures;

pub use conversions::ConversionError;
pub use structures::*;
