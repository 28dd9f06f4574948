use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;

use crate::core::ram::KeyboardBuffer;
use crate::error::{Chip8Error, Result};
use crate::external::keymap::keymap;
use crate::external::{InputSource, InputStatus};

pub struct KeyboardDriver {
    events: sdl2::EventPump,
}

impl KeyboardDriver {
    pub fn new(context: &sdl2::Sdl) -> Result<Self> {
        Ok(KeyboardDriver {
            events: context.event_pump().map_err(Chip8Error::Frontend)?,
        })
    }
}

impl InputSource for KeyboardDriver {
    fn poll(&mut self, keys: &mut KeyboardBuffer) -> Result<InputStatus> {
        for event in self.events.poll_iter() {
            match event {
                Event::Quit { .. } => return Ok(InputStatus::Quit),
                Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => return Ok(InputStatus::Quit),
                Event::Window {
                    win_event: WindowEvent::FocusLost,
                    ..
                } => keys.release_all(),
                Event::KeyDown {
                    scancode: Some(key),
                    ..
                } => {
                    if let Some(index) = keymap(key) {
                        keys.set(index, true);
                    }
                }
                Event::KeyUp {
                    scancode: Some(key),
                    ..
                } => {
                    if let Some(index) = keymap(key) {
                        keys.set(index, false);
                    }
                }
                _ => continue,
            }
        }
        Ok(InputStatus::Continue)
    }
}
