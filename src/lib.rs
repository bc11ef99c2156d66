#![cfg_attr(not(test), no_std)]

//! This is an `embedded-hal` crate for the [ADF4350](https://www.analog.com/en/products/adf4350.html)
//! wideband synthesizer with integrated VCO, run in integer-N mode.
//!
//! The driver keeps a [`Config`] describing the output (frequency, feedback path, output
//! stages). Every change re-encodes all six control registers and shifts them out R5 first,
//! R0 last, each word framed by chip select. The chip is write-only, so nothing is read back.
//!
//! # Not yet implemented
//! * Fractional-N operation. The PFD runs at the reference clock and N is an integer, so the
//!   output resolution is one reference clock step
//! * Reference doubler and divider
//! * Cycle slip reduction
mod api;
pub mod config;
mod error;
#[cfg(test)]
mod mock;
pub mod registers;
mod spi;

pub use config::{Band, Config, FeedbackMode, InvalidPowerLevel, OutputPower};
pub use config::DEFAULT_REFERENCE_CLOCK_MHZ;
pub use error::Error;
pub use registers::{RegisterAddr, RegisterSet};

use embedded_hal::digital::v2::OutputPin;

/// One ADF4350, bound to its SPI bus and chip select line
pub struct Adf4350<SPI, CS> {
    spi: SPI,
    cs: CS,
    config: Config,
}

impl<SPI, CS> Adf4350<SPI, CS>
where
    CS: OutputPin,
{
    /// Takes ownership of the bus and select line and deselects the chip.
    /// Nothing is written until [`Adf4350::initialize`].
    ///
    /// The bus must already be set up for MSB-first, mode 0 transfers.
    pub fn new(spi: SPI, mut cs: CS) -> Result<Self, CS::Error> {
        cs.set_high()?;
        Ok(Adf4350 {
            spi,
            cs,
            config: Config::default(),
        })
    }
}

impl<SPI, CS> Adf4350<SPI, CS> {
    /// Gives back the bus and select line
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}
