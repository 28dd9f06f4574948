use std::time::Duration;

use chip8_vm::external::headless::{NullRenderer, ScriptedInput, TextRenderer};
use chip8_vm::external::{Driver, TickOutcome};
use chip8_vm::{Chip8Error, CycleStatus, MachineConfig, Processor, Result, Rom};

fn load(program: &[u8]) -> Result<Processor> {
    let mut processor = Processor::new(MachineConfig {
        rng_seed: Some(7),
        ..Default::default()
    });
    processor.init_ram(&Rom::from_bytes(program.to_vec())?)?;
    Ok(processor)
}

#[test]
fn load_and_add() -> Result<()> {
    let mut processor = load(&[0x61, 0x05, 0x71, 0x03])?;
    processor.step()?;
    processor.step()?;
    assert_eq!(processor.reg(1), 8);
    assert_eq!(processor.pc, 0x204);
    assert_eq!(processor.reg(0xF), 0);
    Ok(())
}

#[test]
fn clear_then_draw_glyph_zero() -> Result<()> {
    let mut processor = load(&[0x00, 0xE0, 0xA0, 0x50, 0xD0, 0x05])?;
    assert_eq!(processor.step()?, CycleStatus::RedrawScreen);
    assert_eq!(processor.step()?, CycleStatus::Continue);
    assert_eq!(processor.step()?, CycleStatus::RedrawScreen);

    let text = TextRenderer::render(&processor.display_buffer);
    let rows: Vec<&str> = text.lines().take(6).collect();
    assert_eq!(&rows[0][..8], "####....");
    assert_eq!(&rows[1][..8], "#..#....");
    assert_eq!(&rows[2][..8], "#..#....");
    assert_eq!(&rows[3][..8], "#..#....");
    assert_eq!(&rows[4][..8], "####....");
    assert!(!rows[5].contains('#'));
    assert_eq!(processor.display_buffer.lit_count(), 14);
    assert_eq!(processor.reg(0xF), 0);
    Ok(())
}

#[test]
fn delay_timer_runs_down_and_stays() -> Result<()> {
    // 200: V0 = 5; 202: DT = V0; 204: jump 204
    let mut processor = load(&[0x60, 0x05, 0xF0, 0x15, 0x12, 0x04])?;
    processor.step()?;
    processor.step()?;
    // FX15 counts as the first decay
    assert_eq!(processor.delay_timer, 4);
    for _ in 0..4 {
        processor.step()?;
    }
    assert_eq!(processor.delay_timer, 0);
    processor.step()?;
    assert_eq!(processor.delay_timer, 0);
    Ok(())
}

#[test]
fn delay_timer_from_five_reaches_zero_after_five_steps() -> Result<()> {
    // 200: jump 200
    let mut processor = load(&[0x12, 0x00])?;
    processor.delay_timer = 5;
    for _ in 0..5 {
        processor.step()?;
    }
    assert_eq!(processor.delay_timer, 0);
    for _ in 0..3 {
        processor.step()?;
    }
    assert_eq!(processor.delay_timer, 0);
    Ok(())
}

#[test]
fn subroutine_round_trip() -> Result<()> {
    // 200: call 206; 202: V2 = 1; 204: jump 204; 206: V1 = 9; 208: return
    let mut processor = load(&[
        0x22, 0x06, 0x62, 0x01, 0x12, 0x04, 0x61, 0x09, 0x00, 0xEE,
    ])?;
    for _ in 0..4 {
        processor.step()?;
    }
    assert_eq!(processor.reg(1), 9);
    assert_eq!(processor.reg(2), 1);
    assert!(processor.stack.is_empty());
    assert_eq!(processor.pc, 0x204);
    Ok(())
}

#[test]
fn runaway_recursion_overflows_the_stack() -> Result<()> {
    // 200: call 200
    let mut processor = load(&[0x22, 0x00])?;
    for _ in 0..16 {
        processor.step()?;
    }
    assert!(matches!(
        processor.step(),
        Err(Chip8Error::StackOverflow { depth: 16 })
    ));
    Ok(())
}

#[test]
fn builtin_program_draws_every_glyph() -> Result<()> {
    let mut processor = Processor::new(MachineConfig::default());
    processor.init_ram(&Rom::builtin())?;
    let mut driver = Driver::new(processor, NullRenderer::default(), ScriptedInput::default());
    driver.run(Some(400), Duration::ZERO)?;

    let processor = driver.processor();
    assert_eq!(processor.pc, 0x21C);
    assert_eq!(processor.reg(0), 16);

    // Glyph 0 at (0, 0) and glyph 8 at (0, 8)
    let text = TextRenderer::render(&processor.display_buffer);
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(&rows[0][..4], "####");
    assert_eq!(&rows[1][..4], "#..#");
    assert_eq!(&rows[8][..4], "####");
    assert_eq!(&rows[9][..4], "#..#");
    assert_eq!(&rows[10][..4], "####");
    // Glyph 1 at (8, 0)
    assert_eq!(&rows[0][8..12], "..#.");
    Ok(())
}

#[test]
fn key_wait_blocks_until_a_key_arrives() -> Result<()> {
    // 200: V4 = key; 202: V5 = 1; 204: jump 204
    let processor = load(&[0xF4, 0x0A, 0x65, 0x01, 0x12, 0x04])?;
    let input = ScriptedInput::new(vec![(5, 0xE, true), (5, 0x7, true)]);
    let mut driver = Driver::new(processor, NullRenderer::default(), input);

    for _ in 0..5 {
        assert_eq!(driver.tick()?, TickOutcome::Stepped(CycleStatus::Waiting));
        assert_eq!(driver.processor().pc, 0x200);
        assert_eq!(driver.processor().reg(5), 0);
    }
    assert_eq!(driver.tick()?, TickOutcome::Stepped(CycleStatus::Continue));
    assert_eq!(driver.processor().reg(4), 0x7);
    driver.tick()?;
    assert_eq!(driver.processor().reg(5), 1);
    Ok(())
}

#[test]
fn jump_with_offset_past_memory_is_fatal() -> Result<()> {
    // 200: V0 = FF; 202: jump FFF + V0
    let mut processor = load(&[0x60, 0xFF, 0xBF, 0xFF])?;
    processor.step()?;
    processor.step()?;
    assert_eq!(processor.pc, 0x10FE);
    assert!(matches!(
        processor.step(),
        Err(Chip8Error::MemoryOutOfBounds { address: 0x10FF })
    ));
    Ok(())
}
