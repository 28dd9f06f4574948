use std::collections::BTreeMap;

use crate::consts;
use crate::core::ram::{DisplayBuffer, KeyboardBuffer};
use crate::error::Result;
use crate::external::{InputSource, InputStatus, Renderer};

/// Counts frames and discards them.
#[derive(Default, Debug)]
pub struct NullRenderer {
    pub presented: u64,
}

impl Renderer for NullRenderer {
    fn present(&mut self, _frame: &DisplayBuffer) -> Result<()> {
        self.presented += 1;
        Ok(())
    }
}

/// Keeps the most recent frame as text, `#` for lit pixels and `.` otherwise.
#[derive(Default, Debug)]
pub struct TextRenderer {
    pub last_frame: String,
}

impl TextRenderer {
    pub fn render(frame: &DisplayBuffer) -> String {
        let mut out = String::with_capacity((consts::CHIP8_WIDTH + 1) * consts::CHIP8_HEIGHT);
        for row in frame.buffer.iter() {
            out.extend(row.iter().map(|&p| if p == 1 { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

impl Renderer for TextRenderer {
    fn present(&mut self, frame: &DisplayBuffer) -> Result<()> {
        self.last_frame = TextRenderer::render(frame);
        Ok(())
    }
}

/// Replays `(tick, key, pressed)` events. Ticks count polls from zero.
#[derive(Default, Debug)]
pub struct ScriptedInput {
    events: BTreeMap<u64, Vec<(u8, bool)>>,
    quit_at: Option<u64>,
    tick: u64,
}

impl ScriptedInput {
    pub fn new(events: Vec<(u64, u8, bool)>) -> Self {
        let mut by_tick: BTreeMap<u64, Vec<(u8, bool)>> = BTreeMap::new();
        for (tick, key, pressed) in events {
            by_tick.entry(tick).or_default().push((key, pressed));
        }
        ScriptedInput {
            events: by_tick,
            quit_at: None,
            tick: 0,
        }
    }

    pub fn quit_at(mut self, tick: u64) -> Self {
        self.quit_at = Some(tick);
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, keys: &mut KeyboardBuffer) -> Result<InputStatus> {
        let tick = self.tick;
        self.tick += 1;
        if self.quit_at == Some(tick) {
            return Ok(InputStatus::Quit);
        }
        if let Some(events) = self.events.remove(&tick) {
            for (key, pressed) in events {
                keys.set(key, pressed);
            }
        }
        Ok(InputStatus::Continue)
    }
}
