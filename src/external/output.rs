use crate::consts;
use crate::core::ram::DisplayBuffer;
use crate::error::{Chip8Error, Result};
use crate::external::Renderer;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const OFF: Color = Color {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
};
const ON: Color = Color {
    r: 255,
    g: 255,
    b: 255,
    a: 200,
};

/// Paints each lit pixel as a `scale` x `scale` square.
pub struct DisplayDriver {
    pub screen: Canvas<Window>,
    scale: u32,
}

impl DisplayDriver {
    pub fn new(context: &sdl2::Sdl, scale: u32) -> Result<Self> {
        let video_subsystem = context.video().map_err(Chip8Error::Frontend)?;
        let window = video_subsystem
            .window(
                "CHIP-8",
                consts::CHIP8_WIDTH as u32 * scale,
                consts::CHIP8_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(|e| Chip8Error::Frontend(e.to_string()))?;
        let mut canvas: Canvas<Window> = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| Chip8Error::Frontend(e.to_string()))?;

        canvas.set_draw_color(OFF);
        canvas.clear();
        canvas.present();

        Ok(DisplayDriver {
            screen: canvas,
            scale,
        })
    }
}

impl Renderer for DisplayDriver {
    fn present(&mut self, frame: &DisplayBuffer) -> Result<()> {
        self.screen.set_draw_color(OFF);
        self.screen.clear();
        self.screen.set_draw_color(ON);
        for (y, row) in frame.buffer.iter().enumerate() {
            for (x, &col) in row.iter().enumerate() {
                if col != 1 {
                    continue;
                }
                let i = (x as u32) * self.scale;
                let j = (y as u32) * self.scale;
                self.screen
                    .fill_rect(Rect::new(i as i32, j as i32, self.scale, self.scale))
                    .map_err(Chip8Error::Frontend)?;
            }
        }
        self.screen.present();
        Ok(())
    }
}
