use crate::consts;
use crate::error::{Chip8Error, Result};
use crate::utils;

/// Flat 4 KiB memory image. The font is resident at `FONT_OFFSET`, programs
/// are loaded at `PROG_OFFSET`.
#[derive(Debug, Clone)]
pub struct Ram {
    pub buffer: [u8; consts::RAM_BYTES],
}

impl Default for Ram {
    fn default() -> Self {
        let mut buffer = [0; consts::RAM_BYTES];
        buffer[consts::FONT_OFFSET..consts::FONT_OFFSET + consts::FONT_SET_SIZE]
            .copy_from_slice(&consts::FONT_SET);
        Ram { buffer }
    }
}

impl Ram {
    pub fn read(&self, address: usize) -> Result<u8> {
        self.buffer
            .get(address)
            .copied()
            .ok_or(Chip8Error::MemoryOutOfBounds { address })
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
        let cell = self
            .buffer
            .get_mut(address)
            .ok_or(Chip8Error::MemoryOutOfBounds { address })?;
        *cell = value;
        Ok(())
    }

    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8]> {
        self.buffer
            .get(address..address + len)
            .ok_or(Chip8Error::MemoryOutOfBounds {
                address: address + len.saturating_sub(1),
            })
    }

    pub fn slice_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8]> {
        self.buffer
            .get_mut(address..address + len)
            .ok_or(Chip8Error::MemoryOutOfBounds {
                address: address + len.saturating_sub(1),
            })
    }

    /// Copy a program image to `PROG_OFFSET`.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > consts::MAX_ROM_BYTES {
            return Err(Chip8Error::RomTooLarge {
                size: program.len(),
                max_size: consts::MAX_ROM_BYTES,
            });
        }
        self.buffer[consts::PROG_OFFSET..consts::PROG_OFFSET + program.len()]
            .copy_from_slice(program);
        Ok(())
    }
}

/// 64x32 monochrome frame, indexed `[y][x]`. Pixels are 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBuffer {
    pub buffer: [[u8; consts::CHIP8_WIDTH]; consts::CHIP8_HEIGHT],
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        DisplayBuffer {
            buffer: [[0; consts::CHIP8_WIDTH]; consts::CHIP8_HEIGHT],
        }
    }
}

impl DisplayBuffer {
    pub fn clear(&mut self) {
        self.buffer
            .iter_mut()
            .for_each(|row| *row = [0; consts::CHIP8_WIDTH]);
    }

    /// XOR the pixel at a wrapped coordinate. Returns true when a lit pixel
    /// was switched off.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let x = utils::wrap(x, consts::CHIP8_WIDTH);
        let y = utils::wrap(y, consts::CHIP8_HEIGHT);
        let pixel = &mut self.buffer[y][x];
        let collided = *pixel == 1;
        *pixel ^= 1;
        collided
    }

    pub fn lit_count(&self) -> usize {
        self.buffer
            .iter()
            .map(|row| row.iter().filter(|&&p| p == 1).count())
            .sum()
    }
}

/// Pressed state of the 16 keypad keys.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct KeyboardBuffer {
    pub buffer: [bool; consts::KEYBOARD_SIZE],
}

impl KeyboardBuffer {
    pub fn set(&mut self, key: u8, pressed: bool) {
        if let Some(k) = self.buffer.get_mut(key as usize) {
            *k = pressed;
        }
    }

    /// Keys outside 0x0..=0xF are never down.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.buffer.get(key as usize).copied().unwrap_or(false)
    }

    /// Lowest-indexed key that is currently down.
    pub fn any_pressed(&self) -> Option<u8> {
        self.buffer.iter().position(|&k| k).map(|i| i as u8)
    }

    pub fn release_all(&mut self) {
        self.buffer = [false; consts::KEYBOARD_SIZE];
    }
}
