use crate::error::{Chip8Error, Result};

/// Bounded LIFO of subroutine return addresses.
#[derive(Debug, Clone)]
pub struct CallStack {
    entries: Vec<u16>,
    depth: usize,
}

impl CallStack {
    pub fn new(depth: usize) -> Self {
        CallStack {
            entries: Vec::with_capacity(depth),
            depth,
        }
    }

    pub fn push(&mut self, address: u16) -> Result<()> {
        if self.entries.len() == self.depth {
            return Err(Chip8Error::StackOverflow { depth: self.depth });
        }
        self.entries.push(address);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        self.entries.pop().ok_or(Chip8Error::StackUnderflow)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn peek(&self) -> Option<u16> {
        self.entries.last().copied()
    }
}
