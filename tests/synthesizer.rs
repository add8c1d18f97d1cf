use std::{cell::RefCell, convert::Infallible, rc::Rc};

use adf4350::{register::address, Synthesizer};
use embedded_hal::{
    blocking::{delay::DelayMs, spi::Write},
    digital::v2::OutputPin,
};

/// Words seen on the bus, and whether chip select was low for each of them
#[derive(Default)]
struct Bus {
    cs_low: bool,
    words: Vec<u32>,
    framing_ok: bool,
}

type Shared = Rc<RefCell<Bus>>;

struct Spi(Shared);

impl Write<u8> for Spi {
    type Error = Infallible;
    fn write(&mut self, bytes: &[u8]) -> Result<(), Infallible> {
        let mut bus = self.0.borrow_mut();
        assert!(bus.cs_low, "SPI write with chip select high");
        assert_eq!(bytes.len(), 4);
        let w = bytes.iter().fold(0u32, |w, b| (w << 8) | u32::from(*b));
        bus.words.push(w);
        Ok(())
    }
}

struct Cs(Shared);

impl OutputPin for Cs {
    type Error = Infallible;
    fn set_low(&mut self) -> Result<(), Infallible> {
        let mut bus = self.0.borrow_mut();
        let already_low = bus.cs_low;
        bus.framing_ok &= !already_low;
        bus.cs_low = true;
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().cs_low = false;
        Ok(())
    }
}

struct NoDelay;

impl DelayMs<u8> for NoDelay {
    fn delay_ms(&mut self, _ms: u8) {}
}

fn setup(khz: u32) -> (Synthesizer<Spi, Cs>, Shared) {
    let bus = Rc::new(RefCell::new(Bus { framing_ok: true, ..Bus::default() }));
    let mut synth = Synthesizer::new(Spi(bus.clone()), Cs(bus.clone())).unwrap();
    assert!(!bus.borrow().cs_low);
    synth.initialize(&mut NoDelay, khz, 10).unwrap();
    (synth, bus)
}

#[test]
fn tune_2ghz_from_10mhz_reference() {
    let (synth, bus) = setup(2_000_000);
    let bus = bus.borrow();

    assert_eq!(
        bus.words,
        vec![
            0x0058_0005,
            (1 << 23) | (1 << 20) | (200 << 12) | (1 << 5) | 4,
            0x0000_04B3,
            (0b11 << 29) | (0b110 << 26) | (1 << 14) | (0b1110 << 9) | (1 << 6) | 2,
            (1 << 27) | (1 << 15) | (1000 << 3) | 1,
            400 << 15,
        ]
    );
    assert!(bus.framing_ok);
    assert!(!bus.cs_low);
    assert_eq!(synth.frequency(), 2_000_000);
}

#[test]
fn each_change_resends_r5_to_r0() {
    let (mut synth, bus) = setup(100_000);

    synth.set_aux_output_enabled(true).unwrap();
    synth.set_aux_power_level(5).unwrap();
    synth.set_frequency(1_500_000).unwrap();

    let bus = bus.borrow();
    assert_eq!(bus.words.len(), 4 * 6);
    for set in bus.words.chunks(6) {
        let addrs: Vec<u8> = set.iter().map(|w| address(*w)).collect();
        assert_eq!(addrs, [5, 4, 3, 2, 1, 0]);
    }

    let r4 = bus.words[bus.words.len() - 5];
    assert_eq!((r4 >> 6) & 0b11, 0b11);
    assert_eq!((r4 >> 8) & 1, 1);
    assert_eq!((r4 >> 20) & 0b111, 1);
}

#[test]
fn release_returns_the_bus() {
    let (synth, bus) = setup(2_000_000);
    let (_spi, _cs) = synth.release();
    assert_eq!(bus.borrow().words.len(), 6);
}
