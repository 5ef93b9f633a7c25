//! The core's only I/O seam: byte-at-a-time input with a non-blocking
//! poll, and byte-at-a-time output.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

use log::warn;
use nix::sys::select::{select, FdSet};
use nix::sys::time::{TimeVal, TimeValLike};
use termios::{tcgetattr, tcsetattr, Termios, ECHO, ICANON, TCSANOW};

/// Abstract console consumed by the memory-mapped keyboard registers and
/// the TRAP routines. Implementations must not buffer lines or echo input
/// (IN is the one trap that echoes, and it does so explicitly).
pub trait ConsolePort {
    /// Non-blocking: true if at least one input byte is buffered.
    fn poll_ready(&mut self) -> bool;
    /// Blocking: returns the next input byte, or `0` on EOF.
    fn read_byte(&mut self) -> u8;
    /// Writes one byte to output.
    fn write_byte(&mut self, b: u8);
    /// Forces buffered output out.
    fn flush(&mut self);
}

/// A real terminal, switched to raw mode for the lifetime of the value and
/// restored to its original settings on drop.
pub struct TtyConsole {
    original: Termios,
}

const STDIN_FILENO: i32 = 0;

impl TtyConsole {
    pub fn new() -> io::Result<Self> {
        let original = tcgetattr(STDIN_FILENO)?;

        let mut raw = original.clone();
        raw.c_lflag &= !(ICANON | ECHO);
        tcsetattr(STDIN_FILENO, TCSANOW, &raw)?;

        Ok(Self { original })
    }
}

impl Drop for TtyConsole {
    fn drop(&mut self) {
        let _ = tcsetattr(STDIN_FILENO, TCSANOW, &self.original);
    }
}

impl ConsolePort for TtyConsole {
    fn poll_ready(&mut self) -> bool {
        let mut readfds = FdSet::new();
        readfds.insert(STDIN_FILENO);

        matches!(
            select(None, &mut readfds, None, None, &mut TimeVal::zero()),
            Ok(n) if n > 0
        )
    }

    fn read_byte(&mut self) -> u8 {
        let mut buf = [0u8; 1];
        match io::stdin().read_exact(&mut buf) {
            Ok(()) => buf[0],
            Err(_) => 0,
        }
    }

    fn write_byte(&mut self, b: u8) {
        if let Err(e) = io::stdout().write_all(&[b]) {
            warn!("failed to write output byte: {e}");
        }
    }

    fn flush(&mut self) {
        if let Err(e) = io::stdout().flush() {
            warn!("failed to flush output: {e}");
        }
    }
}

/// An in-memory console used by tests: output accumulates in a `Vec<u8>`,
/// input is drained from a `VecDeque<u8>` queued up ahead of time.
#[derive(Default)]
pub struct BufferConsole {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
}

impl BufferConsole {
    pub fn with_input(bytes: &[u8]) -> Self {
        Self {
            input: bytes.iter().copied().collect(),
            output: Vec::new(),
        }
    }

    pub fn output_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }
}

impl ConsolePort for BufferConsole {
    fn poll_ready(&mut self) -> bool {
        !self.input.is_empty()
    }

    fn read_byte(&mut self) -> u8 {
        self.input.pop_front().unwrap_or(0)
    }

    fn write_byte(&mut self, b: u8) {
        self.output.push(b);
    }

    fn flush(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_console_polls_and_reads() {
        let mut console = BufferConsole::with_input(b"hi");
        assert!(console.poll_ready());
        assert_eq!(console.read_byte(), b'h');
        assert_eq!(console.read_byte(), b'i');
        assert!(!console.poll_ready());
        assert_eq!(console.read_byte(), 0);
    }

    #[test]
    fn buffer_console_accumulates_output() {
        let mut console = BufferConsole::default();
        console.write_byte(b'H');
        console.write_byte(b'I');
        console.flush();
        assert_eq!(console.output_str(), "HI");
    }
}
