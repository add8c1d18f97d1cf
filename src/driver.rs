//! Synthesizer front end: kHz in, six registers out.
//!
//! Every setter rebuilds the whole register image and writes all six
//! registers, use [`Synthesizer::batch`] to apply several changes with
//! a single write.

use embedded_hal::{
    blocking::{delay::DelayMs, spi::Write},
    digital::v2::OutputPin,
};
use log::{debug, warn};
use num_traits::float::FloatCore;

use crate::{
    config::{Config, PowerLevel},
    constants::*,
    device::Adf4350,
    errors::*,
    frequency::FrequencyPlan,
    register::{FeedbackSelect, RegisterSet},
};


/// ADF4350 synthesizer with its register image
pub struct Synthesizer<SPI, CS> {
    device: Adf4350<SPI, CS>,
    ref_clk_mhz: f64,
    freq_mhz: f64,
    plan: FrequencyPlan,
    config: Config,
    registers: RegisterSet,
}


impl<SPI, CS> Synthesizer<SPI, CS>
where SPI: Write<u8>,
      CS: OutputPin,
{
    /// Takes the bus and chip select, idles chip select.
    /// Nothing is written before [`initialize`](Self::initialize).
    pub fn new(spi: SPI, pin_cs: CS) -> Result<Self, Error> {
        let device = Adf4350::new(spi, pin_cs)?;
        let ref_clk_mhz = f64::from(REF_CLK_DEFAULT_MHZ);
        let plan = FrequencyPlan::new(0.0, ref_clk_mhz);
        let config = Config::default();
        Ok(Synthesizer {
            device,
            ref_clk_mhz,
            freq_mhz: 0.0,
            plan,
            config,
            registers: RegisterSet::encode(&plan, &config),
        })
    }

    /// Waits for the chip to settle, resets the configuration to its
    /// defaults and tunes to `frequency_khz` from a `ref_clk_mhz` reference.
    pub fn initialize<D>(
        &mut self,
        delay: &mut D,
        frequency_khz: u32,
        ref_clk_mhz: u32,
    ) -> Result<(), Error>
    where D: DelayMs<u8>,
    {
        delay.delay_ms(POWER_UP_SETTLE_MS);

        self.ref_clk_mhz = f64::from(ref_clk_mhz);
        self.config = Config::default();
        debug!("init: REF CLK {} MHz", ref_clk_mhz);

        self.set_frequency(frequency_khz)
    }

    /// [`initialize`](Self::initialize) with the default 10 MHz reference
    pub fn initialize_default_ref<D>(&mut self, delay: &mut D, frequency_khz: u32) -> Result<(), Error>
    where D: DelayMs<u8>,
    {
        self.initialize(delay, frequency_khz, REF_CLK_DEFAULT_MHZ)
    }

    /// Tunes to `frequency_khz`.
    /// Frequencies outside the chip's range are programmed anyway.
    pub fn set_frequency(&mut self, frequency_khz: u32) -> Result<(), Error> {
        self.freq_mhz = khz_to_mhz(frequency_khz);
        self.update()
    }

    /// Last requested frequency, kHz
    pub fn frequency(&self) -> u32 {
        mhz_to_khz(self.freq_mhz)
    }

    /// Software power-down, registers are kept
    pub fn set_power_down(&mut self, power_down: bool) -> Result<(), Error> {
        self.config.power_down = power_down;
        self.update()
    }

    pub fn set_rf_output_enabled(&mut self, enabled: bool) -> Result<(), Error> {
        self.config.rf_output_enabled = enabled;
        self.update()
    }

    pub fn set_aux_output_enabled(&mut self, enabled: bool) -> Result<(), Error> {
        self.config.aux_output_enabled = enabled;
        self.update()
    }

    /// 0..=3 for -4, -1, +2, +5 dBm, larger values saturate at 3
    pub fn set_rf_power_level(&mut self, level: u8) -> Result<(), Error> {
        self.config.rf_power = PowerLevel::from(level);
        self.update()
    }

    /// 0..=3 for -4, -1, +2, +5 dBm, larger values saturate at 3
    pub fn set_aux_power_level(&mut self, level: u8) -> Result<(), Error> {
        self.config.aux_power = PowerLevel::from(level);
        self.update()
    }

    /// `true` / [`FeedbackSelect::Fundamental`] feeds the N counter from the VCO directly
    pub fn set_feedback_type<F>(&mut self, feedback: F) -> Result<(), Error>
    where F: Into<FeedbackSelect>,
    {
        self.config.feedback = feedback.into();
        self.update()
    }

    /// Starts a set of changes written out together on [`Batch::commit`].
    pub fn batch(&mut self) -> Batch<'_, SPI, CS> {
        Batch {
            freq_mhz: self.freq_mhz,
            config: self.config,
            synth: self,
        }
    }

    /// Replans, rebuilds all six registers and writes them, R5 first.
    pub fn update(&mut self) -> Result<(), Error> {
        if !FrequencyPlan::is_within_chip_range(self.freq_mhz) {
            warn!("{} MHz is outside the ADF4350 output range", self.freq_mhz);
        }

        self.plan = FrequencyPlan::new(self.freq_mhz, self.ref_clk_mhz);
        self.registers = RegisterSet::encode(&self.plan, &self.config);

        debug!(
            "{} MHz: div {} INT {} FRAC {} MOD {}",
            self.freq_mhz,
            self.plan.divider.ratio(),
            self.plan.int,
            self.plan.frac,
            self.plan.modulus,
        );

        self.device.write_register_set(&self.registers)
    }

    /// Feedback settings of the last update
    pub fn plan(&self) -> &FrequencyPlan {
        &self.plan
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Register image last written to the device
    pub fn registers(&self) -> &RegisterSet {
        &self.registers
    }

    pub fn ref_clk_mhz(&self) -> f64 {
        self.ref_clk_mhz
    }

    /// Frequency actually synthesized, after FRAC rounding
    pub fn actual_frequency_mhz(&self) -> f64 {
        self.plan.f_out_mhz(self.ref_clk_mhz)
    }

    /// Gives the bus and chip select back
    pub fn release(self) -> (SPI, CS) {
        self.device.release()
    }
}


/// Pending changes, see [`Synthesizer::batch`].
/// Dropping a batch without committing discards it.
#[must_use = "a batch is only written by `commit`"]
pub struct Batch<'a, SPI, CS> {
    synth: &'a mut Synthesizer<SPI, CS>,
    freq_mhz: f64,
    config: Config,
}

impl<'a, SPI, CS> Batch<'a, SPI, CS>
where SPI: Write<u8>,
      CS: OutputPin,
{
    pub fn frequency(mut self, frequency_khz: u32) -> Self {
        self.freq_mhz = khz_to_mhz(frequency_khz);
        self
    }

    pub fn power_down(mut self, power_down: bool) -> Self {
        self.config.power_down = power_down;
        self
    }

    pub fn rf_output_enabled(mut self, enabled: bool) -> Self {
        self.config.rf_output_enabled = enabled;
        self
    }

    pub fn aux_output_enabled(mut self, enabled: bool) -> Self {
        self.config.aux_output_enabled = enabled;
        self
    }

    pub fn rf_power_level(mut self, level: u8) -> Self {
        self.config.rf_power = PowerLevel::from(level);
        self
    }

    pub fn aux_power_level(mut self, level: u8) -> Self {
        self.config.aux_power = PowerLevel::from(level);
        self
    }

    pub fn feedback_type<F>(mut self, feedback: F) -> Self
    where F: Into<FeedbackSelect>,
    {
        self.config.feedback = feedback.into();
        self
    }

    /// Applies the changes and writes all six registers once.
    pub fn commit(self) -> Result<(), Error> {
        self.synth.freq_mhz = self.freq_mhz;
        self.synth.config = self.config;
        self.synth.update()
    }
}


#[inline]
fn khz_to_mhz(khz: u32) -> f64 {
    f64::from(khz) / 1000.0
}

#[inline]
fn mhz_to_khz(mhz: f64) -> u32 {
    (mhz * 1000.0).round() as u32
}
