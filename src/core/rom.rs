use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::consts;
use crate::error::{Chip8Error, Result};

/// Draws the sixteen font glyphs in two rows of eight, then parks in a
/// jump-to-self loop at 0x21C.
const BUILTIN_TEST_ROM: [u8; 30] = [
    0x00, 0xE0, // 200: CLS
    0x60, 0x00, // 202: V0 = 0 (digit)
    0x61, 0x00, // 204: V1 = 0 (x)
    0x62, 0x00, // 206: V2 = 0 (y)
    0xF0, 0x29, // 208: I = glyph(V0)
    0xD1, 0x25, // 20A: draw 5 rows at V1, V2
    0x70, 0x01, // 20C: V0 += 1
    0x71, 0x08, // 20E: V1 += 8
    0x41, 0x40, // 210: skip if V1 != 64
    0x61, 0x00, // 212: V1 = 0
    0x41, 0x00, // 214: skip if V1 != 0
    0x72, 0x08, // 216: V2 += 8
    0x30, 0x10, // 218: skip if V0 == 16
    0x12, 0x08, // 21A: jump 208
    0x12, 0x1C, // 21C: jump 21C
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rom {
    pub buffer: Vec<u8>,
}

impl Default for Rom {
    fn default() -> Self {
        Rom::builtin()
    }
}

impl Rom {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = File::open(path)?;
        Rom::from_reader(&mut file)
    }

    pub fn from_reader(reader: &mut impl Read) -> Result<Self> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Rom::from_bytes(buffer)
    }

    pub fn from_bytes(buffer: Vec<u8>) -> Result<Self> {
        if buffer.len() > consts::MAX_ROM_BYTES {
            return Err(Chip8Error::RomTooLarge {
                size: buffer.len(),
                max_size: consts::MAX_ROM_BYTES,
            });
        }
        Ok(Rom { buffer })
    }

    pub fn builtin() -> Self {
        Rom {
            buffer: BUILTIN_TEST_ROM.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
