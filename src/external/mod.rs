use crate::core::ram::{DisplayBuffer, KeyboardBuffer};
use crate::error::Result;

pub mod driver;
pub mod headless;
#[cfg(feature = "sdl")]
pub mod input;
#[cfg(feature = "sdl")]
pub mod keymap;
#[cfg(feature = "sdl")]
pub mod output;

pub use driver::{Driver, TickOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputStatus {
    Continue,
    Quit,
}

/// Presents a frame. Read-only with respect to the machine.
pub trait Renderer {
    fn present(&mut self, frame: &DisplayBuffer) -> Result<()>;
}

/// Applies this tick's key events to the keypad. Called before the
/// processor steps, never during.
pub trait InputSource {
    fn poll(&mut self, keys: &mut KeyboardBuffer) -> Result<InputStatus>;
}
