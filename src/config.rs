use crate::consts;

/// How 8XYE fills the flag register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftLeftFlag {
    /// VF = Vx & 0x8, so the flag reads 0 or 8.
    #[default]
    Masked,
    /// VF = bit 7 of Vx, so the flag reads 0 or 1.
    Carry,
}

impl ShiftLeftFlag {
    pub fn flag(self, value: u8) -> u8 {
        match self {
            ShiftLeftFlag::Masked => value & 0x8,
            ShiftLeftFlag::Carry => (value & 0x80) >> 7,
        }
    }
}

/// Options resolved once when the processor is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    /// 8XY6 / 8XYE copy Vy into Vx before shifting. On by default; off
    /// shifts Vx in place.
    pub legacy_shift_source: bool,
    pub shift_left_flag: ShiftLeftFlag,
    pub stack_depth: usize,
    /// `None` seeds the random source from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            legacy_shift_source: true,
            shift_left_flag: ShiftLeftFlag::default(),
            stack_depth: consts::STACK_SIZE,
            rng_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shifts_from_vy_with_masked_flag() {
        let config = MachineConfig::default();
        assert!(config.legacy_shift_source);
        assert_eq!(config.shift_left_flag, ShiftLeftFlag::Masked);
        assert_eq!(config.stack_depth, consts::STACK_SIZE);
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn test_masked_flag_keeps_bit_three() {
        assert_eq!(ShiftLeftFlag::Masked.flag(0xFF), 0x8);
        assert_eq!(ShiftLeftFlag::Masked.flag(0x80), 0x0);
        assert_eq!(ShiftLeftFlag::Masked.flag(0x08), 0x8);
    }

    #[test]
    fn test_carry_flag_takes_high_bit() {
        assert_eq!(ShiftLeftFlag::Carry.flag(0x80), 1);
        assert_eq!(ShiftLeftFlag::Carry.flag(0x7F), 0);
    }
}
