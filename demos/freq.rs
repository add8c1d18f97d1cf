#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate panic_halt; // panic handler

use cortex_m;
use cortex_m_rt::entry;
use stm32f4xx_hal as hal;

use cortex_m_semihosting::hprintln;

use crate::hal::{
    prelude::*,
    stm32,
    spi::Spi,
};

use embedded_hal::spi::MODE_0;

use adf4350::{ register::*, Synthesizer };


#[entry]
fn main() -> ! {
    let dp = stm32::Peripherals::take().unwrap();
    let cp = cortex_m::peripheral::Peripherals::take().unwrap();

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(8.mhz()).sysclk(168.mhz()).pclk1(42.mhz()).pclk2(84.mhz()).freeze();

    let gpioa = dp.GPIOA.split();
    let mut led1 = gpioa.pa6.into_push_pull_output();

    let mut delay = hal::delay::Delay::new(cp.SYST, clocks);

    let gpiob = dp.GPIOB.split();
    let pin_le = gpiob.pb11.into_push_pull_output();

    let sck = gpiob.pb13.into_alternate_af5();
    let mosi = gpiob.pb15.into_alternate_af5();

    let spi = Spi::spi2(
        dp.SPI2,
        (sck, hal::spi::NoMiso , mosi),
        MODE_0,
        stm32f4xx_hal::time::KiloHertz(100).into(),
        clocks,
    );

    let mut sg = Synthesizer::new(spi, pin_le).unwrap();

    // 433.92 MHz from a 10 MHz reference
    sg.initialize(&mut delay, 433_920, 10).unwrap();

    sg.batch()
        .rf_power_level(2)
        .aux_output_enabled(true)
        .aux_power_level(1)
        .commit()
        .unwrap();

    for (i,w) in sg.registers().to_words().iter().enumerate() {
        hprintln!("R{} {:#010x} {:#034b}", i, w, w).unwrap();
    };

    let rs = sg.registers();
    let int : Int = rs.get();
    let frac : Frac = rs.get();
    let modulus : Mod = rs.get();
    let rfdiv : RfDividerSelect = rs.get();
    hprintln!("{:?} {:?} {:?} {:?}", int, frac, modulus, rfdiv).unwrap();
    hprintln!("f {:?} kHz <-> f_out {:?} MHz", sg.frequency(), sg.actual_frequency_mhz()).unwrap();

    loop {
        led1.set_high().unwrap();
        delay.delay_ms(1000_u32);
        led1.set_low().unwrap();
        delay.delay_ms(1000_u32);
    }
}
