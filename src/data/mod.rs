//! Upstream data: fetching the raw bond list and undoing its glyph obfuscation.

pub mod eastmoney;
pub mod glyph;

pub use eastmoney::{KzzClient, read_raw};
pub use glyph::{DecodedSnapshot, decode};
