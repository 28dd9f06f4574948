use crate::consts;
use crate::utils;

/// A decoded instruction word. Register operands are 4-bit indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 0NNN, accepted and ignored
    MachineRoutine(u16),
    /// 1NNN
    Jump(u16),
    /// 2NNN
    Call(u16),
    /// 3XNN
    SkipEqImm(u8, u8),
    /// 4XNN
    SkipNeImm(u8, u8),
    /// 5XY0
    SkipEqReg(u8, u8),
    /// 6XNN
    LoadImm(u8, u8),
    /// 7XNN
    AddImm(u8, u8),
    /// 8XY0
    Move(u8, u8),
    /// 8XY1
    Or(u8, u8),
    /// 8XY2
    And(u8, u8),
    /// 8XY3
    Xor(u8, u8),
    /// 8XY4
    AddReg(u8, u8),
    /// 8XY5
    SubReg(u8, u8),
    /// 8XY6
    ShiftRight(u8, u8),
    /// 8XY7
    SubNeg(u8, u8),
    /// 8XYE
    ShiftLeft(u8, u8),
    /// 9XY0
    SkipNeReg(u8, u8),
    /// ANNN
    LoadIndex(u16),
    /// BNNN
    JumpOffset(u16),
    /// CXNN
    Random(u8, u8),
    /// DXYN
    Draw(u8, u8, u8),
    /// EX9E
    SkipKeyDown(u8),
    /// EXA1
    SkipKeyUp(u8),
    /// FX07
    ReadDelay(u8),
    /// FX0A
    WaitKey(u8),
    /// FX15
    SetDelay(u8),
    /// FX18
    SetSound(u8),
    /// FX1E
    AddIndex(u8),
    /// FX29
    Glyph(u8),
    /// FX33
    Bcd(u8),
    /// FX55
    Store(u8),
    /// FX65
    Load(u8),
    /// Anything else inside a known class.
    Unknown(u16),
}

impl Instruction {
    pub fn decode(word: u16) -> Self {
        let bytes = word.to_be_bytes();
        let nibbles = utils::nibble_split(&bytes[..consts::OP_CODE_BYTES]);
        let nnn = utils::decode_nnn(word);
        let (x, nn) = utils::decode_xnn(word);
        let (_, y, _) = utils::decode_xyn(word);

        match nibbles {
            (0x0, 0x0, 0xE, 0x0) => Instruction::ClearScreen,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x0, _, _, _) => Instruction::MachineRoutine(nnn),
            (0x1, _, _, _) => Instruction::Jump(nnn),
            (0x2, _, _, _) => Instruction::Call(nnn),
            (0x3, _, _, _) => Instruction::SkipEqImm(x, nn),
            (0x4, _, _, _) => Instruction::SkipNeImm(x, nn),
            (0x5, _, _, 0x0) => Instruction::SkipEqReg(x, y),
            (0x6, _, _, _) => Instruction::LoadImm(x, nn),
            (0x7, _, _, _) => Instruction::AddImm(x, nn),
            (0x8, _, _, 0x0) => Instruction::Move(x, y),
            (0x8, _, _, 0x1) => Instruction::Or(x, y),
            (0x8, _, _, 0x2) => Instruction::And(x, y),
            (0x8, _, _, 0x3) => Instruction::Xor(x, y),
            (0x8, _, _, 0x4) => Instruction::AddReg(x, y),
            (0x8, _, _, 0x5) => Instruction::SubReg(x, y),
            (0x8, _, _, 0x6) => Instruction::ShiftRight(x, y),
            (0x8, _, _, 0x7) => Instruction::SubNeg(x, y),
            (0x8, _, _, 0xE) => Instruction::ShiftLeft(x, y),
            (0x9, _, _, 0x0) => Instruction::SkipNeReg(x, y),
            (0xA, _, _, _) => Instruction::LoadIndex(nnn),
            (0xB, _, _, _) => Instruction::JumpOffset(nnn),
            (0xC, _, _, _) => Instruction::Random(x, nn),
            (0xD, _, _, n) => Instruction::Draw(x, y, n),
            (0xE, _, 0x9, 0xE) => Instruction::SkipKeyDown(x),
            (0xE, _, 0xA, 0x1) => Instruction::SkipKeyUp(x),
            (0xF, _, 0x0, 0x7) => Instruction::ReadDelay(x),
            (0xF, _, 0x0, 0xA) => Instruction::WaitKey(x),
            (0xF, _, 0x1, 0x5) => Instruction::SetDelay(x),
            (0xF, _, 0x1, 0x8) => Instruction::SetSound(x),
            (0xF, _, 0x1, 0xE) => Instruction::AddIndex(x),
            (0xF, _, 0x2, 0x9) => Instruction::Glyph(x),
            (0xF, _, 0x3, 0x3) => Instruction::Bcd(x),
            (0xF, _, 0x5, 0x5) => Instruction::Store(x),
            (0xF, _, 0x6, 0x5) => Instruction::Load(x),
            _ => Instruction::Unknown(word),
        }
    }
}
