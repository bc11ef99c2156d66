use core::fmt;
use embedded_hal::{blocking::spi, digital::v2::OutputPin};

/// Error type throwable by synthesizer operations
pub enum Error<SPI, CS>
where
    SPI: spi::Transfer<u8>,
    CS: OutputPin,
{
    /// Error during SPI Transfer
    Transfer(<SPI as spi::Transfer<u8>>::Error),
    /// Error driving the chip select line
    ChipSelect(<CS as OutputPin>::Error),
}

impl<SPI, CS> fmt::Debug for Error<SPI, CS>
where
    SPI: spi::Transfer<u8>,
    SPI::Error: fmt::Debug,
    CS: OutputPin,
    <CS as OutputPin>::Error: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Transfer(error) => write!(f, "Transfer({:?})", error),
            Error::ChipSelect(error) => write!(f, "ChipSelect({:?})", error),
        }
    }
}
