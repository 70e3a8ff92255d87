//! Terminal input sources

mod interrupt;
mod keyboard;

pub use interrupt::InterruptRelay;
pub use keyboard::{key_to_char, KeyboardReader, LineBuffer};
