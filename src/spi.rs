use crate::error::Error;
use crate::registers::{RegisterAddr, RegisterSet};
use crate::Adf4350;
use embedded_hal as hal;
use hal::blocking::spi::Transfer;
use hal::digital::v2::OutputPin;

impl<SPI, CS> Adf4350<SPI, CS>
where
    SPI: Transfer<u8>,
    CS: OutputPin,
{
    /// Shifts one word out MSB first, framed by chip select
    pub(crate) fn write(&mut self, addr: RegisterAddr, word: u32) -> Result<(), Error<SPI, CS>> {
        debug_assert_eq!(RegisterAddr::of_word(word), Some(addr));
        #[cfg(feature = "defmt")]
        defmt::debug!("Setting ADF4350 {} to 0x{:08x}", addr, word);
        let mut buf = word.to_be_bytes();
        self.cs.set_low().map_err(Error::ChipSelect)?;
        let transferred = self.spi.transfer(&mut buf).map(|_| ());
        // Release the chip even if the bus failed
        self.cs.set_high().map_err(Error::ChipSelect)?;
        transferred.map_err(Error::Transfer)
    }

    /// Sends all six words, R5 first and R0 last
    pub(crate) fn write_all(&mut self, regs: &RegisterSet) -> Result<(), Error<SPI, CS>> {
        for (addr, word) in regs.in_write_order() {
            self.write(addr, word)?;
        }
        Ok(())
    }
}

// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use embedded_hal_mock as mock;
    use mock::pin::{Mock as PinMock, State as PinState, Transaction as PinTransaction};
    use mock::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    fn spi_tester(mosi: Vec<u8>) -> Adf4350<SpiMock, PinMock> {
        let spi_expectations = [SpiTransaction::transfer(mosi, vec![0, 0, 0, 0])];

        let pin_expectations = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];

        let spi = SpiMock::new(&spi_expectations);
        let cs = PinMock::new(&pin_expectations);

        Adf4350 {
            spi,
            cs,
            config: Config::default(),
        }
    }

    fn finish(synth: Adf4350<SpiMock, PinMock>) {
        let (mut spi, mut cs) = synth.release();
        spi.done();
        cs.done();
    }

    #[test]
    fn write_r3() {
        let mut synth = spi_tester(vec![0x00, 0x00, 0x00, 0x03]);
        synth.write(RegisterAddr::R3, 3).unwrap();
        finish(synth);
    }

    #[test]
    fn write_r2() {
        let mut synth = spi_tester(vec![0x18, 0x00, 0x4F, 0x62]);
        synth.write(RegisterAddr::R2, 0x1800_4F62).unwrap();
        finish(synth);
    }

    #[test]
    fn write_all_descending() {
        let mut config = Config::default();
        config.set_frequency(1000);
        let regs = RegisterSet::from(&config);

        let spi_expectations: Vec<SpiTransaction> = RegisterAddr::WRITE_ORDER
            .iter()
            .map(|&addr| SpiTransaction::transfer(regs.bytes(addr).to_vec(), vec![0; 4]))
            .collect();
        let pin_expectations: Vec<PinTransaction> = (0..6)
            .flat_map(|_| {
                vec![
                    PinTransaction::set(PinState::Low),
                    PinTransaction::set(PinState::High),
                ]
            })
            .collect();

        let mut synth = Adf4350 {
            spi: SpiMock::new(&spi_expectations),
            cs: PinMock::new(&pin_expectations),
            config,
        };
        synth.write_all(&regs).unwrap();
        finish(synth);
    }
}
