//! Constants

/// Default reference clock, MHz
pub const REF_CLK_DEFAULT_MHZ: u32 = 10;

/// Output channel spacing, MHz.
/// MOD = REF CLK / channel spacing
pub const CHANNEL_SPACING_MHZ: f64 = 0.01;

/// Settle time after power-up before the first register write, ms
pub const POWER_UP_SETTLE_MS: u8 = 10;

/// Output divider brackets, ascending.
/// A target below the threshold selects the paired divider exponent,
/// anything at or above the last threshold runs the VCO undivided.
pub const DIVIDER_BRACKETS_MHZ: [(f64, u8); 6] = [
    (68.75, 6),
    (137.5, 5),
    (275.0, 4),
    (550.0, 3),
    (1100.0, 2),
    (2200.0, 1),
];

/// Fundamental VCO mode (before dividers), min frequency
pub const VCO_FREQ_MIN_MHZ: f64 = 2200.0;

/// Fundamental VCO mode (before dividers), max frequency
pub const VCO_FREQ_MAX_MHZ: f64 = 4400.0;

/// Minimum output frequency the chip is specified for
/// 2200 MHz fundamental output and divide-by-16 selected
pub const OUT_FREQ_MIN_MHZ: f64 = 137.5;

/// VCO output, no divider
pub const OUT_FREQ_MAX_MHZ: f64 = VCO_FREQ_MAX_MHZ;

/// Phase word written to R1
pub const PHASE_DEFAULT: u16 = 1;

/// R counter (reference division factor)
pub const R_COUNTER: u16 = 1;

/// Charge pump current setting, 2.50 mA with 5.1 kOhm R SET
pub const CHARGE_PUMP_CURRENT: u8 = 0b1110;

/// 12-bit clock divider value written to R3
pub const CLOCK_DIVIDER_VALUE: u16 = 150;

/// Band select clock divider written to R4
pub const BAND_SELECT_CLOCK_DIV: u8 = 200;

/// Highest output power setting, +5 dBm
pub const POWER_LEVEL_MAX: u8 = 3;
