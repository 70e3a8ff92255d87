//! Domain Services
//!
//! Pure decision logic over domain entities. No I/O.

mod aggregator;
mod input_parser;

pub use aggregator::aggregate;
pub use input_parser::{parse_input, InputParser, DEFAULT_CANCEL_COMMAND, EXIT_COMMAND};
