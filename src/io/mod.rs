//! Input/output helpers.
//!
//! - decoded JSON archive (`archive`)
//! - CSV report writer (`export`)
//! - dated output folder (`folder`)

pub mod archive;
pub mod export;
pub mod folder;

pub use archive::*;
pub use export::*;
pub use folder::*;
