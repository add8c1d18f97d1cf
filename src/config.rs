//! Static device configuration

use crate::{constants::*, register::FeedbackSelect};


/// Output power setting, 0..=3 for -4, -1, +2, +5 dBm.
/// Values above 3 saturate.
#[derive(Debug,Copy,Clone,Default,PartialEq,Eq,PartialOrd,Ord)]
pub struct PowerLevel(u8);

impl PowerLevel {
    pub const MIN: PowerLevel = PowerLevel(0);
    pub const MAX: PowerLevel = PowerLevel(POWER_LEVEL_MAX);

    #[inline]
    pub fn new(level: u8) -> Self {
        PowerLevel(level.min(POWER_LEVEL_MAX))
    }

    #[inline]
    pub fn level(self) -> u8 {
        self.0
    }
}

impl From<u8> for PowerLevel {
    #[inline]
    fn from(level: u8) -> Self {
        PowerLevel::new(level)
    }
}


/// Everything written to the device that doesn't follow from the output frequency.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Config {
    /// VCO feedback to the N counter
    pub feedback: FeedbackSelect,
    /// Software power-down (R2)
    pub power_down: bool,
    pub aux_output_enabled: bool,
    pub rf_output_enabled: bool,
    pub aux_power: PowerLevel,
    pub rf_power: PowerLevel,
    /// Phase word (R1)
    pub phase: u16,
}

impl Default for Config {
    /// Powered up, RF out enabled at -4 dBm, aux out off, fundamental feedback.
    fn default() -> Self {
        Config {
            feedback: FeedbackSelect::Fundamental,
            power_down: false,
            aux_output_enabled: false,
            rf_output_enabled: true,
            aux_power: PowerLevel::MIN,
            rf_power: PowerLevel::MIN,
            phase: PHASE_DEFAULT,
        }
    }
}
