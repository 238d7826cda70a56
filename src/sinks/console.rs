//! Console sink implementation

use std::io::{self, Write};

/// Writes records to the process stdout or stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleSink {
    #[default]
    Stdout,
    Stderr,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        ConsoleSink::Stdout
    }

    pub fn stderr() -> Self {
        ConsoleSink::Stderr
    }
}

impl Write for ConsoleSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            ConsoleSink::Stdout => io::stdout().lock().write(buf),
            ConsoleSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        // One lock per record so lines from other writers cannot interleave
        match self {
            ConsoleSink::Stdout => io::stdout().lock().write_all(buf),
            ConsoleSink::Stderr => io::stderr().lock().write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            ConsoleSink::Stdout => io::stdout().flush(),
            ConsoleSink::Stderr => io::stderr().flush(),
        }
    }
}
