use crate::config::MachineConfig;
use crate::consts;
use crate::core::instruction::Instruction;
use crate::core::ram::{DisplayBuffer, KeyboardBuffer, Ram};
use crate::core::rom::Rom;
use crate::core::stack::CallStack;
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

const PC_STEP: u16 = consts::OP_CODE_BYTES as u16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    RedrawScreen,
    Continue,
    Waiting,
}

/// The CPU together with the machine state it owns.
#[derive(Debug)]
pub struct Processor {
    pub stack: CallStack,
    pub registers: [u8; consts::REG_COUNT],
    pub idx_register: u16,
    pub pc: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    /// Blocked in FX0A; fetch leaves the PC alone while set.
    pub paused: bool,
    pub ram: Ram,
    pub display_buffer: DisplayBuffer,
    pub keyboard_buffer: KeyboardBuffer,
    config: MachineConfig,
    rng: StdRng,
}

impl Default for Processor {
    fn default() -> Self {
        Processor::new(MachineConfig::default())
    }
}

impl Processor {
    pub fn new(config: MachineConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Processor {
            stack: CallStack::new(config.stack_depth),
            registers: [0; consts::REG_COUNT],
            idx_register: 0,
            pc: consts::PROG_OFFSET as u16,
            delay_timer: 0,
            sound_timer: 0,
            paused: false,
            ram: Ram::default(),
            display_buffer: DisplayBuffer::default(),
            keyboard_buffer: KeyboardBuffer::default(),
            config,
            rng,
        }
    }

    pub fn init_ram(&mut self, rom: &Rom) -> Result<()> {
        self.ram.load_program(&rom.buffer)
    }

    /// Fetch, decode and execute one instruction, then decay both timers.
    pub fn step(&mut self) -> Result<CycleStatus> {
        let pc = self.pc;
        let word = self.fetch()?;
        let instruction = Instruction::decode(word);
        trace!("executing [{:04X}] at pc {:#05X}: {:?}", word, pc, instruction);
        let status = self.execute(instruction)?;
        self.decrease_timers();
        Ok(status)
    }

    /// Read the big-endian word at PC, advancing PC unless paused.
    pub fn fetch(&mut self) -> Result<u16> {
        let bytes = self.ram.slice(self.pc as usize, consts::OP_CODE_BYTES)?;
        let word = u16::from_be_bytes([bytes[0], bytes[1]]);
        if !self.paused {
            self.pc = self.pc.wrapping_add(PC_STEP);
        }
        Ok(word)
    }

    pub fn decrease_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    pub fn execute(&mut self, instruction: Instruction) -> Result<CycleStatus> {
        match instruction {
            Instruction::ClearScreen => {
                self.display_buffer.clear();
                return Ok(CycleStatus::RedrawScreen);
            }
            Instruction::Return => {
                self.pc = self.stack.pop()?;
            }
            Instruction::MachineRoutine(nnn) => {
                debug!("ignoring machine routine call 0{:03X}", nnn);
            }
            Instruction::Jump(nnn) => {
                self.pc = nnn;
            }
            Instruction::Call(nnn) => {
                self.stack.push(self.pc)?;
                self.pc = nnn;
            }

            // Conditional skips
            Instruction::SkipEqImm(x, nn) => self.skip_if(self.reg(x) == nn),
            Instruction::SkipNeImm(x, nn) => self.skip_if(self.reg(x) != nn),
            Instruction::SkipEqReg(x, y) => self.skip_if(self.reg(x) == self.reg(y)),
            Instruction::SkipNeReg(x, y) => self.skip_if(self.reg(x) != self.reg(y)),

            // Set register
            Instruction::LoadImm(x, nn) => self.set_reg(x, nn),
            Instruction::Move(x, y) => self.set_reg(x, self.reg(y)),

            // Arithmetic; the result lands before the flag so VF as a target
            // ends up holding the flag.
            Instruction::AddImm(x, nn) => self.set_reg(x, self.reg(x).wrapping_add(nn)),
            Instruction::AddReg(x, y) => {
                let (sum, carry) = self.reg(x).overflowing_add(self.reg(y));
                self.set_reg(x, sum);
                self.set_flag(carry as u8);
            }
            Instruction::SubReg(x, y) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_reg(x, vx.wrapping_sub(vy));
                self.set_flag((vx > vy) as u8);
            }
            Instruction::SubNeg(x, y) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_reg(x, vy.wrapping_sub(vx));
                self.set_flag((vy > vx) as u8);
            }

            // Logical instructions
            Instruction::Or(x, y) => self.set_reg(x, self.reg(x) | self.reg(y)),
            Instruction::And(x, y) => self.set_reg(x, self.reg(x) & self.reg(y)),
            Instruction::Xor(x, y) => self.set_reg(x, self.reg(x) ^ self.reg(y)),

            // Shifting instructions
            Instruction::ShiftRight(x, y) => {
                let source = self.shift_source(x, y);
                self.set_reg(x, source >> 1);
                self.set_flag(source & 0x1);
            }
            Instruction::ShiftLeft(x, y) => {
                let source = self.shift_source(x, y);
                self.set_reg(x, source << 1);
                self.set_flag(self.config.shift_left_flag.flag(source));
            }

            // Index register and jumps
            Instruction::LoadIndex(nnn) => {
                self.idx_register = nnn;
            }
            Instruction::JumpOffset(nnn) => {
                self.pc = u16::from(self.reg(0)) + nnn;
            }
            Instruction::AddIndex(x) => {
                self.idx_register = self.idx_register.wrapping_add(u16::from(self.reg(x)));
            }
            Instruction::Glyph(x) => {
                self.idx_register = u16::from(self.reg(x)) * consts::FONT_GLYPH_BYTES as u16
                    + consts::FONT_OFFSET as u16;
            }

            // Generate randomness
            Instruction::Random(x, nn) => {
                let rand_val: u8 = self.rng.gen();
                self.set_reg(x, rand_val & nn);
            }

            Instruction::Draw(x, y, n) => {
                self.draw(x, y, n)?;
                return Ok(CycleStatus::RedrawScreen);
            }

            // Skip on keypress
            Instruction::SkipKeyDown(x) => {
                self.skip_if(self.keyboard_buffer.is_pressed(self.reg(x)))
            }
            Instruction::SkipKeyUp(x) => {
                self.skip_if(!self.keyboard_buffer.is_pressed(self.reg(x)))
            }
            Instruction::WaitKey(x) => return Ok(self.wait_key(x)),

            // Timers
            Instruction::ReadDelay(x) => self.set_reg(x, self.delay_timer),
            Instruction::SetDelay(x) => self.delay_timer = self.reg(x),
            Instruction::SetSound(x) => self.sound_timer = self.reg(x),

            // Binary byte to decimal digits
            Instruction::Bcd(x) => {
                let num = self.reg(x);
                let digits = [num / 100, (num % 100) / 10, num % 10];
                self.ram
                    .slice_mut(self.idx_register as usize, digits.len())?
                    .copy_from_slice(&digits);
            }

            // Store and load memory
            Instruction::Store(x) => {
                let count = x as usize + 1;
                self.ram
                    .slice_mut(self.idx_register as usize, count)?
                    .copy_from_slice(&self.registers[..count]);
            }
            Instruction::Load(x) => {
                let count = x as usize + 1;
                let values = self.ram.slice(self.idx_register as usize, count)?;
                self.registers[..count].copy_from_slice(values);
            }

            Instruction::Unknown(word) => {
                warn!("ignoring unrecognised opcode {:04X}", word);
            }
        }
        Ok(CycleStatus::Continue)
    }

    /// XOR an N-row sprite from memory at I onto the display, wrapping both
    /// axes. VF is 1 if any lit pixel was switched off.
    fn draw(&mut self, x: u8, y: u8, n: u8) -> Result<()> {
        let origin_x = self.reg(x) as usize;
        let origin_y = self.reg(y) as usize;
        self.set_flag(0);

        let sprite = self.ram.slice(self.idx_register as usize, n as usize)?;
        let mut collided = false;
        for (row, &bits) in sprite.iter().enumerate() {
            for shift_pos in 0..8 {
                if bits & (0x80 >> shift_pos) != 0 {
                    collided |= self
                        .display_buffer
                        .toggle(origin_x + shift_pos, origin_y + row);
                }
            }
        }
        self.registers[consts::FLAG_REGISTER] = collided as u8;
        Ok(())
    }

    fn wait_key(&mut self, x: u8) -> CycleStatus {
        match self.keyboard_buffer.any_pressed() {
            Some(key) => {
                if self.paused {
                    debug!("key {:X} released the wait", key);
                    self.pc = self.pc.wrapping_add(PC_STEP);
                    self.paused = false;
                }
                self.set_reg(x, key);
                CycleStatus::Continue
            }
            None => {
                if !self.paused {
                    debug!("waiting for a key into V{:X}", x);
                    // Point back at FX0A so it runs again next step.
                    self.pc = self.pc.wrapping_sub(PC_STEP);
                    self.paused = true;
                }
                CycleStatus::Waiting
            }
        }
    }

    fn shift_source(&self, x: u8, y: u8) -> u8 {
        if self.config.legacy_shift_source {
            self.reg(y)
        } else {
            self.reg(x)
        }
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc = self.pc.wrapping_add(PC_STEP);
        }
    }

    pub fn reg(&self, index: u8) -> u8 {
        self.registers[index as usize]
    }

    fn set_reg(&mut self, index: u8, value: u8) {
        self.registers[index as usize] = value;
    }

    fn set_flag(&mut self, value: u8) {
        self.registers[consts::FLAG_REGISTER] = value;
    }
}
