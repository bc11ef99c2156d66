use crate::config::{Config, FeedbackMode, OutputPower};
use crate::error::Error;
use crate::registers::RegisterSet;
use crate::Adf4350;

use embedded_hal as hal;
use hal::blocking::spi::Transfer;
use hal::digital::v2::OutputPin;

impl<SPI, CS> Adf4350<SPI, CS>
where
    SPI: Transfer<u8>,
    CS: OutputPin,
{
    /// Resets the configuration to defaults for `reference_clock_mhz` and tunes to `freq_mhz`.
    /// Defaults are fundamental feedback, powered up, both outputs enabled at +5 dBm.
    ///
    /// Use [`crate::DEFAULT_REFERENCE_CLOCK_MHZ`] for the usual 10 MHz reference.
    pub fn initialize(
        &mut self,
        freq_mhz: u32,
        reference_clock_mhz: u32,
    ) -> Result<(), Error<SPI, CS>> {
        self.config = Config::new(reference_clock_mhz);
        self.set_frequency(freq_mhz)
    }

    /// Sets the output frequency in MHz.
    /// The output divider comes from the band containing `freq_mhz`. Frequencies between
    /// bands (271-279, 541-549, 1091-1099 MHz) or above 2190 MHz run undivided.
    pub fn set_frequency(&mut self, freq_mhz: u32) -> Result<(), Error<SPI, CS>> {
        self.modify(|config| config.set_frequency(freq_mhz))
    }

    /// Powers down the synthesizer, or powers it back up
    pub fn power_down(&mut self, power_down: bool) -> Result<(), Error<SPI, CS>> {
        self.modify(|config| config.set_power_down(power_down))
    }

    pub fn rf_output_enable(&mut self, enabled: bool) -> Result<(), Error<SPI, CS>> {
        self.modify(|config| config.set_rf_output_enabled(enabled))
    }

    pub fn aux_output_enable(&mut self, enabled: bool) -> Result<(), Error<SPI, CS>> {
        self.modify(|config| config.set_aux_output_enabled(enabled))
    }

    pub fn set_rf_power_level(&mut self, power: OutputPower) -> Result<(), Error<SPI, CS>> {
        self.modify(|config| config.set_rf_power(power))
    }

    pub fn set_aux_power_level(&mut self, power: OutputPower) -> Result<(), Error<SPI, CS>> {
        self.modify(|config| config.set_aux_power(power))
    }

    /// Applies any number of changes to the configuration, then commits once
    pub fn modify<F>(&mut self, f: F) -> Result<(), Error<SPI, CS>>
    where
        F: FnOnce(&mut Config),
    {
        f(&mut self.config);
        self.commit()
    }

    /// Re-encodes the current configuration and writes all six registers
    pub fn commit(&mut self) -> Result<(), Error<SPI, CS>> {
        let regs = self.registers();
        self.write_all(&regs)
    }
}

impl<SPI, CS> Adf4350<SPI, CS> {
    /// Gets the target output frequency in MHz
    pub fn get_frequency(&self) -> u32 {
        self.config.frequency_mhz()
    }

    /// Selects the feedback path. Nothing is written until the next commit,
    /// typically `set_frequency`.
    pub fn set_feedback_mode(&mut self, mode: FeedbackMode) {
        self.config.set_feedback_mode(mode);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The words the next commit would send
    pub fn registers(&self) -> RegisterSet {
        RegisterSet::from(&self.config)
    }
}
