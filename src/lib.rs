//! An interpreter for LC-3 object images.
//!
//! The core — `Memory`, `Registers`, the bit utilities, the instruction
//! decoder and handlers, the trap dispatcher, the image loader, and
//! `Machine`'s run loop — only depends on two small traits,
//! [`ConsolePort`] and [`HaltNotifier`], so it can run headless under
//! test. Everything that touches a real terminal, parses `argv`, installs
//! a signal handler, or initializes logging lives in the `lc3` binary
//! (`main.rs`/`cli.rs`), not in this library.

mod bits;
mod console;
mod cpu;
mod error;
mod halt;
mod image;
mod instruction;
mod machine;
mod memory;
mod opcode;
mod registers;
mod trap;
mod trap_vector;

pub use crate::bits::{swap16, SignExtend};
pub use crate::console::{BufferConsole, ConsolePort, TtyConsole};
pub use crate::error::Lc3Error;
pub use crate::halt::{HaltNotifier, LoggingNotifier, RecordingNotifier, StopReason};
pub use crate::image::load as load_image;
pub use crate::instruction::Instruction;
pub use crate::machine::Machine;
pub use crate::memory::{Memory, KBDR, KBSR};
pub use crate::opcode::Opcode;
pub use crate::registers::{Condition, Register, Registers, PC_START};
pub use crate::trap_vector::TrapVector;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Loads each image in order (later images win on overlapping addresses)
/// and runs the machine to completion.
pub fn run<C: ConsolePort>(images: &[impl AsRef<Path>], console: C) -> Result<(), Lc3Error> {
    if images.is_empty() {
        return Err(Lc3Error::NoImages);
    }

    let mut machine = Machine::new(console);

    for path in images {
        let file = BufReader::new(File::open(path)?);
        load_image(file, &mut machine.memory)?;
    }

    let mut notifier = LoggingNotifier;
    machine.run(&mut notifier);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_image(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn minimum_program_halts_and_prints_message() {
        // origin 0x3000, TRAP HALT
        let file = write_image(&[0x30, 0x00, 0xF0, 0x25]);
        let mut machine = Machine::new(BufferConsole::default());

        let f = File::open(file.path()).unwrap();
        load_image(f, &mut machine.memory).unwrap();
        let mut notifier = LoggingNotifier;
        machine.run(&mut notifier);

        assert_eq!(machine.registers.pc, 0x3001);
        assert_eq!(machine.console.output_str(), "HALT\n");
    }

    #[test]
    fn add_immediate_then_halt() {
        // ADD R0, R0, #7; HALT
        let file = write_image(&[0x30, 0x00, 0x10, 0x27, 0xF0, 0x25]);
        let mut machine = Machine::new(BufferConsole::default());

        let f = File::open(file.path()).unwrap();
        load_image(f, &mut machine.memory).unwrap();
        let mut notifier = LoggingNotifier;
        machine.run(&mut notifier);

        assert_eq!(machine.registers.read(Register::R0), 7);
        assert_eq!(machine.registers.cond, Condition::Pos);
    }

    #[test]
    fn print_a_literal_string() {
        // LEA R0,#2; PUTS; HALT; 'H'; 'I'; 0
        let file = write_image(&[
            0x30, 0x00, 0xE0, 0x02, 0xF0, 0x22, 0xF0, 0x25, 0x00, 0x48, 0x00, 0x49, 0x00, 0x00,
        ]);
        let mut machine = Machine::new(BufferConsole::default());

        let f = File::open(file.path()).unwrap();
        load_image(f, &mut machine.memory).unwrap();
        let mut notifier = LoggingNotifier;
        machine.run(&mut notifier);

        assert_eq!(machine.console.output_str(), "HIHALT\n");
    }

    #[test]
    fn no_images_is_an_error() {
        let images: [&str; 0] = [];
        let result = run(&images, BufferConsole::default());
        assert!(matches!(result, Err(Lc3Error::NoImages)));
    }
}
