//! Reports why the run loop stopped, without the caller having to poll
//! `Machine` state after the fact.

use log::{info, warn};

/// Why `Machine::run` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `TRAP HALT` was executed.
    Halted,
    /// `RTI` or `RES` was fetched; the process is about to abort.
    IllegalOpcode(u16),
}

pub trait HaltNotifier {
    fn notify(&mut self, reason: StopReason);
}

/// The notifier wired up by the CLI binary: just logs.
#[derive(Default)]
pub struct LoggingNotifier;

impl HaltNotifier for LoggingNotifier {
    fn notify(&mut self, reason: StopReason) {
        match reason {
            StopReason::Halted => info!("machine halted"),
            StopReason::IllegalOpcode(instr) => {
                warn!("illegal opcode {:#06x}, aborting", instr)
            }
        }
    }
}

/// A notifier that remembers the last reason it was given, for assertions
/// in tests.
#[derive(Default)]
pub struct RecordingNotifier {
    pub last: Option<StopReason>,
}

impl HaltNotifier for RecordingNotifier {
    fn notify(&mut self, reason: StopReason) {
        self.last = Some(reason);
    }
}
