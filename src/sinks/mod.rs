//! Byte sinks a logger can write to
//!
//! Any `std::io::Write + Send` type can be handed to
//! [`Logger::set_output`](crate::core::Logger::set_output); these cover the
//! common destinations.

pub mod console;
pub mod file;
pub mod memory;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use memory::SharedBuffer;
