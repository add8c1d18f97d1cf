//! Errors

/// Driver errors.
///
/// Frequency planning and register encoding never fail, only the
/// transport to the device can.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// SPI write failed
    Spi,
    /// Chip select pin could not be driven
    Pin,
}
