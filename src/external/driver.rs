use std::thread;
use std::time::Duration;

use tracing::info;

use crate::core::processor::{CycleStatus, Processor};
use crate::error::Result;
use crate::external::{InputSource, InputStatus, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Stepped(CycleStatus),
    Quit,
}

/// Owns the processor and both boundary collaborators.
pub struct Driver<R: Renderer, I: InputSource> {
    processor: Processor,
    renderer: R,
    input: I,
    ticks: u64,
}

impl<R: Renderer, I: InputSource> Driver<R, I> {
    pub fn new(processor: Processor, renderer: R, input: I) -> Self {
        Driver {
            processor,
            renderer,
            input,
            ticks: 0,
        }
    }

    /// Input first, then one processor step, then present the frame.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        if self.input.poll(&mut self.processor.keyboard_buffer)? == InputStatus::Quit {
            return Ok(TickOutcome::Quit);
        }
        let status = self.processor.step()?;
        self.renderer.present(&self.processor.display_buffer)?;
        self.ticks += 1;
        Ok(TickOutcome::Stepped(status))
    }

    /// Tick until the input source asks to quit or `max_ticks` is reached.
    /// Returns the number of ticks executed.
    pub fn run(&mut self, max_ticks: Option<u64>, tick_delay: Duration) -> Result<u64> {
        info!("run loop starting at pc {:#05X}", self.processor.pc);
        let start = self.ticks;
        loop {
            if max_ticks.is_some_and(|max| self.ticks - start >= max) {
                info!("tick limit reached");
                break;
            }
            if self.tick()? == TickOutcome::Quit {
                info!("quit requested");
                break;
            }
            if !tick_delay.is_zero() {
                thread::sleep(tick_delay);
            }
        }
        let executed = self.ticks - start;
        info!("run loop stopped after {} ticks", executed);
        Ok(executed)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn processor(&self) -> &Processor {
        &self.processor
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
