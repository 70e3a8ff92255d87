//! Terminal rendering
//!
//! - `theme` - colors and icons
//! - `primitives` - icons and colored text
//! - `views` - per-command output

pub mod context;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
