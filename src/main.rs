use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use chip8_vm::consts;
use chip8_vm::external::headless::{NullRenderer, ScriptedInput, TextRenderer};
use chip8_vm::external::Driver;
use chip8_vm::{MachineConfig, Processor, Rom, ShiftLeftFlag};

const HEADLESS_DEFAULT_TICKS: u64 = 1_000;

#[derive(Parser, Debug)]
#[command(name = "chip8-vm", about = "Run a CHIP-8 program image.")]
struct Args {
    /// Display scale factor.
    #[arg(long, default_value_t = consts::DEFAULT_SCALE)]
    scale: u32,

    /// Program image to load; the built-in test program when omitted.
    #[arg(long, value_name = "PATH")]
    rom: Option<PathBuf>,

    /// 8XY6/8XYE shift Vx in place instead of shifting Vy into Vx.
    #[arg(long, action = ArgAction::SetTrue)]
    in_place_shift: bool,

    /// 8XYE stores bit 7 in VF instead of Vx & 0x8.
    #[arg(long, action = ArgAction::SetTrue)]
    conventional_shl_flag: bool,

    /// Seed for CXNN.
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between ticks, in milliseconds.
    #[arg(long, default_value_t = consts::DEFAULT_TICK_DELAY_MS)]
    tick_delay_ms: u64,

    /// Run without a window and print the final frame.
    #[arg(long, action = ArgAction::SetTrue)]
    headless: bool,

    /// Stop after this many ticks.
    #[arg(long)]
    max_ticks: Option<u64>,
}

impl Args {
    fn machine_config(&self) -> MachineConfig {
        MachineConfig {
            legacy_shift_source: !self.in_place_shift,
            shift_left_flag: if self.conventional_shl_flag {
                ShiftLeftFlag::Carry
            } else {
                ShiftLeftFlag::Masked
            },
            rng_seed: self.seed,
            ..Default::default()
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let rom = match &args.rom {
        Some(path) => Rom::new(path).with_context(|| format!("loading {}", path.display()))?,
        None => Rom::builtin(),
    };

    let mut processor = Processor::new(args.machine_config());
    processor.init_ram(&rom).context("placing program in memory")?;
    info!("loaded {} byte program", rom.len());

    let tick_delay = Duration::from_millis(args.tick_delay_ms);
    if args.headless {
        let mut driver = Driver::new(processor, NullRenderer::default(), ScriptedInput::default());
        driver.run(Some(args.max_ticks.unwrap_or(HEADLESS_DEFAULT_TICKS)), tick_delay)?;
        print!("{}", TextRenderer::render(&driver.processor().display_buffer));
        return Ok(());
    }

    run_windowed(processor, &args, tick_delay)
}

#[cfg(feature = "sdl")]
fn run_windowed(processor: Processor, args: &Args, tick_delay: Duration) -> Result<()> {
    use anyhow::anyhow;
    use chip8_vm::external::input::KeyboardDriver;
    use chip8_vm::external::output::DisplayDriver;

    let context = sdl2::init().map_err(|e| anyhow!(e)).context("initialising SDL")?;
    let display = DisplayDriver::new(&context, args.scale)?;
    let keyboard = KeyboardDriver::new(&context)?;
    let mut driver = Driver::new(processor, display, keyboard);
    driver.run(args.max_ticks, tick_delay)?;
    Ok(())
}

#[cfg(not(feature = "sdl"))]
fn run_windowed(_processor: Processor, args: &Args, _tick_delay: Duration) -> Result<()> {
    anyhow::bail!(
        "cannot open a {}x window: built without the `sdl` feature; rerun with --headless",
        args.scale
    )
}
