//! Register image from a frequency plan and the static configuration

use crate::{config::Config, constants::*, frequency::FrequencyPlan, register::*};


impl RegisterSet {

    /// Builds all six registers from scratch.
    /// Nothing carries over from a previous image.
    pub fn encode(plan: &FrequencyPlan, config: &Config) -> Self {
        RegisterSet {
            r0: r0(plan),
            r1: r1(plan, config),
            r2: r2(config),
            r3: r3(),
            r4: r4(plan, config),
            r5: r5(),
        }
    }
}


/// Frequency control: INT and FRAC
pub fn r0(plan: &FrequencyPlan) -> Reg<R0> {
    Reg::<R0>::default()
        .set(Int(plan.int as u16))
        .set(Frac(plan.frac as u16))
}

/// Prescaler, phase and modulus
pub fn r1(plan: &FrequencyPlan, config: &Config) -> Reg<R1> {
    Reg::<R1>::default()
        .set(Pr1Prescaler::Pr89)
        .set(Phase(config.phase))
        .set(Mod(plan.modulus as u16))
}

/// Reference, charge pump and power-down
pub fn r2(config: &Config) -> Reg<R2> {
    Reg::<R2>::default()
        .set(NoiseMode::LowSpur)
        .set(Muxout::Dlock)
        .set(R(R_COUNTER))
        .set(ChargePumpCurrent(CHARGE_PUMP_CURRENT))
        .set(PhaseDetectorPolarity::Positive)
        .set(PowerDown::from(config.power_down))
}

/// Clock divider, everything else off
pub fn r3() -> Reg<R3> {
    Reg::<R3>::default()
        .set(ClockDividerValue(CLOCK_DIVIDER_VALUE))
}

/// Output stage
pub fn r4(plan: &FrequencyPlan, config: &Config) -> Reg<R4> {
    Reg::<R4>::default()
        .set(config.feedback)
        .set(RfDividerSelect::from(plan.divider))
        .set(BandSelectClockDiv(BAND_SELECT_CLOCK_DIV))
        .set(AuxOutputEnable::from(config.aux_output_enabled))
        .set(AuxOutputPower(config.aux_power.level()))
        .set(RfOutputEnable::from(config.rf_output_enabled))
        .set(OutputPower(config.rf_power.level()))
}

/// Lock detect pin, reserved bits
pub fn r5() -> Reg<R5> {
    Reg::<R5>::default()
        .set(LockDetectPin::DigitalLockDetect)
        .set(Reserved19(0b11))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PowerLevel;

    fn encode_2000() -> RegisterSet {
        RegisterSet::encode(&FrequencyPlan::new(2000.0, 10.0), &Config::default())
    }

    #[test]
    fn words_for_2000_mhz() {
        let w = encode_2000().to_words();
        assert_eq!(w[0], 400 << 15);
        assert_eq!(w[1], (1 << 27) + (1 << 15) + (1000 << 3) + 1);
        assert_eq!(w[2], (0b11 << 29) + (0b110 << 26) + (1 << 14) + (0b1110 << 9) + (1 << 6) + 2);
        assert_eq!(w[3], 0x0000_04B3);
        assert_eq!(w[4], (1 << 23) + (1 << 20) + (200 << 12) + (1 << 5) + 4);
        assert_eq!(w[5], 0x0058_0005);
    }

    #[test]
    fn every_word_is_tagged_with_its_address() {
        for (i, w) in encode_2000().to_words().iter().enumerate() {
            assert_eq!(address(*w) as usize, i);
        }
    }

    #[test]
    fn fractional_plan_lands_in_r0_and_r4() {
        let rs = RegisterSet::encode(&FrequencyPlan::new(433.92, 10.0), &Config::default());
        assert_eq!(rs.r0.w, (347 << 15) + (136 << 3));
        assert_eq!(rs.get::<RfDividerSelect, _>(), RfDividerSelect(3));
        assert_eq!(rs.get::<Mod, _>(), Mod(1000));
    }

    #[test]
    fn static_config_fields() {
        let config = Config {
            feedback: FeedbackSelect::Divided,
            power_down: true,
            aux_output_enabled: true,
            rf_output_enabled: false,
            aux_power: PowerLevel::from(5),
            rf_power: PowerLevel::from(2),
            phase: 1,
        };
        let rs = RegisterSet::encode(&FrequencyPlan::new(2000.0, 10.0), &config);

        assert_eq!(rs.get::<PowerDown, _>(), PowerDown::Enabled);
        assert_eq!(rs.r2.w & (1 << 5), 1 << 5);

        assert_eq!(rs.get::<FeedbackSelect, _>(), FeedbackSelect::Divided);
        assert_eq!((rs.r4.w >> 6) & 0b11, 0b11);
        assert_eq!((rs.r4.w >> 3) & 0b11, 0b10);
        assert_eq!(rs.r4.w, (1 << 20) + (200 << 12) + (1 << 8) + (3 << 6) + (2 << 3) + 4);
    }

    #[test]
    fn rebuild_is_pure() {
        let plan = FrequencyPlan::new(2000.0, 10.0);
        let on = Config { power_down: true, ..Config::default() };
        let off = Config::default();
        let a = RegisterSet::encode(&plan, &on);
        let b = RegisterSet::encode(&plan, &off);
        assert_ne!(a, b);
        assert_eq!(b, RegisterSet::encode(&plan, &off));
        assert_eq!(b, encode_2000());
    }
}
