//! Frequency calculations
//!
//! RF OUT = [INT + (FRAC/MOD)] × (REF CLK / RF Divider)
//!
//! The VCO has to run between 2.2 and 4.4 GHz, lower output frequencies
//! are reached through the RF output divider.

use num_traits::float::FloatCore;

use crate::{constants::*, register::RfDividerSelect};


/// RF output divider, as the power of two the VCO frequency is divided by (0..=6).
#[derive(Debug,Copy,Clone,PartialEq,Eq,PartialOrd,Ord)]
pub struct OutputDivider(u8);

impl OutputDivider {

    /// Selects the divider keeping the VCO in range for the target frequency.
    /// Brackets are checked in ascending order, the first match wins,
    /// anything from 2200 MHz up is not divided. Never fails.
    pub fn for_frequency(target_mhz: f64) -> Self {
        DIVIDER_BRACKETS_MHZ.iter()
            .find(|(upper, _)| target_mhz < *upper)
            .map(|(_, div)| OutputDivider(*div))
            .unwrap_or(OutputDivider(0))
    }

    /// Divider exponent, as written to R4
    #[inline]
    pub fn exponent(self) -> u8 {
        self.0
    }

    /// Divide ratio (1, 2, 4 .. 64)
    #[inline]
    pub fn ratio(self) -> u32 {
        1 << self.0
    }
}

impl From<OutputDivider> for RfDividerSelect {
    #[inline]
    fn from(d: OutputDivider) -> Self {
        RfDividerSelect(d.0)
    }
}


/// Fractional-N feedback settings for one output frequency.
///
/// INT, FRAC and MOD only make sense together, a plan is always
/// computed and replaced as a whole.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct FrequencyPlan {
    pub divider: OutputDivider,
    /// Integer part of the feedback division factor
    pub int: u32,
    /// Fractional numerator
    pub frac: u32,
    /// Fractional modulus
    pub modulus: u32,
}

impl FrequencyPlan {

    /// Plans the feedback for `target_mhz` from a `ref_clk_mhz` reference.
    ///
    /// INT is the truncated feedback ratio while FRAC is rounded to the
    /// nearest step, both from the same ratio.
    pub fn new(target_mhz: f64, ref_clk_mhz: f64) -> Self {
        let divider = OutputDivider::for_frequency(target_mhz);
        let modulus = (ref_clk_mhz / CHANNEL_SPACING_MHZ).round();

        let vco = target_mhz * f64::from(divider.ratio());
        let ratio = vco / ref_clk_mhz;
        let int = ratio.trunc();
        let frac = ((ratio - int) * modulus).round();

        FrequencyPlan {
            divider,
            int: int as u32,
            frac: frac as u32,
            modulus: modulus as u32,
        }
    }

    /// VCO frequency the plan runs at
    pub fn vco_mhz(&self, ref_clk_mhz: f64) -> f64 {
        self.feedback_ratio() * ref_clk_mhz
    }

    /// INT + FRAC/MOD
    pub fn feedback_ratio(&self) -> f64 {
        if self.modulus == 0 {
            return f64::from(self.int);
        }
        f64::from(self.int) + f64::from(self.frac) / f64::from(self.modulus)
    }

    /// Actual output frequency, limited by the channel spacing.
    pub fn f_out_mhz(&self, ref_clk_mhz: f64) -> f64 {
        self.vco_mhz(ref_clk_mhz) / f64::from(self.divider.ratio())
    }

    /// True when the chip is specified to produce this frequency.
    /// The planner itself accepts anything.
    pub fn is_within_chip_range(target_mhz: f64) -> bool {
        (OUT_FREQ_MIN_MHZ..=OUT_FREQ_MAX_MHZ).contains(&target_mhz)
    }
}
