#![cfg_attr(not(test), no_std)]

//! [ADF4350](https://www.analog.com/en/products/adf4350.html) driver.
//!
//! The [`driver::Synthesizer`] takes an output frequency in kHz, plans the
//! fractional-N feedback ([`frequency`]), encodes the six control registers
//! ([`encoder`]) and writes them R5 to R0 over SPI ([`device`]).

pub mod constants;
pub mod register;
pub mod errors;
pub mod config;
pub mod frequency;
pub mod encoder;
pub mod device;
pub mod driver;

pub use config::{Config, PowerLevel};
pub use driver::{Batch, Synthesizer};
pub use errors::Error;
pub use frequency::{FrequencyPlan, OutputDivider};
