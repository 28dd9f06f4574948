use crate::consts;

pub fn nibble_split(bytes: &[u8]) -> (u8, u8, u8, u8) {
    assert!(bytes.len() == consts::OP_CODE_BYTES);
    (
        (bytes[0] & 0xF0) >> 4,
        bytes[0] & 0x0F,
        (bytes[1] & 0xF0) >> 4,
        bytes[1] & 0x0F,
    )
}

/// `_NNN`: a 12-bit address or constant.
pub fn decode_nnn(word: u16) -> u16 {
    word & 0x0FFF
}

/// `_XNN`: register index and immediate byte.
pub fn decode_xnn(word: u16) -> (u8, u8) {
    (((word & 0x0F00) >> 8) as u8, (word & 0x00FF) as u8)
}

/// `_XYN`: two register indices and a 4-bit immediate.
pub fn decode_xyn(word: u16) -> (u8, u8, u8) {
    (
        ((word & 0x0F00) >> 8) as u8,
        ((word & 0x00F0) >> 4) as u8,
        (word & 0x000F) as u8,
    )
}

/// Wrap a sprite coordinate onto the display.
pub fn wrap(coord: usize, size: usize) -> usize {
    coord % size
}
