//! Device pins and the register write protocol

use embedded_hal::{
    blocking::spi::Write,
    digital::v2::OutputPin,
};
use log::trace;

use crate::errors::*;
use crate::register::*;

/// ADF4350 device
pub struct Adf4350<SPI, CS> {
    spi: SPI,
    pin_cs: CS,
}


impl<SPI, CS> Adf4350<SPI, CS>
where SPI: Write<u8>,
      CS: OutputPin,
{
    /// Creates the device, chip select idle (high).
    ///
    /// `spi` - SPI device (`MOSI` => `DATA`, `CLK` => `CLK`, mode 0, MSB first)
    /// `pin_cs` - chip select, wired to LE, active low
    pub fn new(spi: SPI, mut pin_cs: CS) -> Result<Self, Error> {
        pin_cs.set_high().map_err(|_| Error::Pin)?;
        Ok(Adf4350 { spi, pin_cs })
    }

    /// Writes all control registers out, R5 first and R0 last.
    ///
    /// The new frequency only takes effect when R0 is latched, so every
    /// register it depends on has to be current by then.
    pub fn write_register_set(&mut self, rs: &RegisterSet) -> Result<(), Error> {
        for w in rs.to_words().iter().rev() {
            self.write_register(*w)?;
        }
        Ok(())
    }

    /// Data is clocked into the 32-bit shift register MSB first while
    /// chip select is low. When it goes back high the word is latched into
    /// the register selected by its three control bits.
    ///
    /// Chip select is released even when the SPI write fails.
    pub fn write_register(&mut self, w: u32) -> Result<(), Error> {
        trace!("R{} <- {:#010x}", address(w), w);

        self.pin_cs.set_low().map_err(|_| Error::Pin)?;
        let res = self.spi.write(&w.to_be_bytes()).map_err(|_| Error::Spi);
        self.pin_cs.set_high().map_err(|_| Error::Pin)?;
        res
    }

    /// Gives the bus and pin back
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.pin_cs)
    }
}
