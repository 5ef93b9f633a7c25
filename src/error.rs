use std::io;
use thiserror::Error;

/// Errors surfaced by the library entry point and the image loader.
///
/// The instruction-set interpreter itself never returns a `Result`: an
/// illegal opcode (RTI/RES) aborts the process directly (see
/// `cpu::execute`), and everything else (unknown trap vectors, console I/O
/// failures, EOF on input traps) is defined to be silently absorbed rather
/// than reported.
#[derive(Debug, Error)]
pub enum Lc3Error {
    #[error("failed to load image: {0}")]
    Image(#[from] io::Error),

    #[error("no images given")]
    NoImages,
}
