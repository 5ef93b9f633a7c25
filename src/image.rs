//! Loads an LC-3 object image: a 2-byte big-endian origin address followed
//! by a sequence of 2-byte big-endian words, with no header, checksum, or
//! section table.

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};
use log::info;

use crate::error::Lc3Error;
use crate::memory::{Memory, MEMORY_SIZE};

/// Reads one image from `reader` into `memory`, starting at the origin
/// address found in the first two bytes. Reading fewer than two initial
/// bytes is a load failure. At most `65536 - origin` words are stored;
/// anything past the end of the address space is ignored. Loading a
/// second image after a first overwrites any addresses they share —
/// last writer wins, with no overlap detection.
pub fn load(mut reader: impl Read, memory: &mut Memory) -> Result<u16, Lc3Error> {
    let origin = reader.read_u16::<BigEndian>()?;
    let mut address = origin;
    let mut words_loaded = 0u32;

    loop {
        if (address as usize) >= MEMORY_SIZE {
            break;
        }

        match reader.read_u16::<BigEndian>() {
            Ok(word) => {
                memory.write(address, word);
                address = address.wrapping_add(1);
                words_loaded += 1;
            }
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        }
    }

    info!("loaded {words_loaded} words at origin {origin:#06x}");
    Ok(origin)
}
