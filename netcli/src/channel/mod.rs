//! Channel layer for prompt matching.
//!
//! Turns a raw transport into prompt-delimited chunks of output. Telnet
//! control bytes are dropped before lines are tested against the prompt
//! being waited for.

mod buffer;
mod filter;
mod reader;

pub use buffer::LineBuffer;
pub use filter::{is_control_byte, ARE_YOU_THERE, CONTROL_BYTES};
pub use reader::read_until_prompt;
