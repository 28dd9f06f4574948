//! A CHIP-8 interpreter: a 16-bit instruction virtual CPU with 4 KiB of
//! memory, a 64x32 monochrome display, a 16-key keypad and two countdown
//! timers.
//!
//! [`core`] holds the machine itself and never touches the host. [`external`]
//! is the boundary: a [`external::Driver`] pumps an input source into the
//! keypad, steps the processor and hands the frame to a renderer, once per
//! tick.
pub mod config;
pub mod consts;
pub mod core;
pub mod error;
pub mod external;
pub mod utils;

pub use crate::config::{MachineConfig, ShiftLeftFlag};
pub use crate::core::processor::{CycleStatus, Processor};
pub use crate::core::rom::Rom;
pub use crate::error::{Chip8Error, Result};
