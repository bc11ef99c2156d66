//! Logical synthesizer configuration, independent of any hardware

/// Reference clock assumed when the caller has no other preference, in MHz
pub const DEFAULT_REFERENCE_CLOCK_MHZ: u32 = 10;

/// Phase value programmed into R1. Fixed in integer-N operation.
pub const PHASE: u32 = 1;

/// Which signal the N-counter divides, and therefore how N is computed
#[repr(u32)]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedbackMode {
    /// N = f / f_ref
    Fundamental = 0,
    /// N = f * multiplier / f_ref
    Divided = 1,
}

/// Output stage power, shared by the RF and AUX outputs
#[repr(u32)]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputPower {
    /// -4 dBm
    Minus4Dbm = 0,
    /// -1 dBm
    Minus1Dbm = 1,
    /// +3 dBm
    Plus3Dbm = 2,
    /// +5 dBm
    Plus5Dbm = 3,
}

impl OutputPower {
    /// Output power in dBm
    pub fn dbm(self) -> i8 {
        match self {
            OutputPower::Minus4Dbm => -4,
            OutputPower::Minus1Dbm => -1,
            OutputPower::Plus3Dbm => 3,
            OutputPower::Plus5Dbm => 5,
        }
    }
}

/// Returned when a raw power index is not in 0..=3
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidPowerLevel(pub u8);

impl TryFrom<u8> for OutputPower {
    type Error = InvalidPowerLevel;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(OutputPower::Minus4Dbm),
            1 => Ok(OutputPower::Minus1Dbm),
            2 => Ok(OutputPower::Plus3Dbm),
            3 => Ok(OutputPower::Plus5Dbm),
            _ => Err(InvalidPowerLevel(index)),
        }
    }
}

/// A contiguous frequency range sharing one output divider and multiplier
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Band {
    /// Lowest frequency in the band, MHz, inclusive
    pub min_mhz: u32,
    /// Highest frequency in the band, MHz, inclusive
    pub max_mhz: u32,
    /// Output divide ratio is 2^divider_power
    pub divider_power: u32,
    /// Multiplier applied to N in `FeedbackMode::Divided`
    pub multiplier: u32,
}

// 271-279, 541-549 and 1091-1099 MHz belong to no band and take the fallback
// setting, same as anything above 2190 MHz.
const BANDS: [Band; 4] = [
    Band {
        min_mhz: 140,
        max_mhz: 270,
        divider_power: 4,
        multiplier: 16,
    },
    Band {
        min_mhz: 280,
        max_mhz: 540,
        divider_power: 3,
        multiplier: 8,
    },
    Band {
        min_mhz: 550,
        max_mhz: 1090,
        divider_power: 2,
        multiplier: 4,
    },
    Band {
        min_mhz: 1100,
        max_mhz: 2190,
        divider_power: 1,
        multiplier: 2,
    },
];

const FALLBACK_DIVIDER_POWER: u32 = 0;
const FALLBACK_MULTIPLIER: u32 = 1;

impl Band {
    /// The band containing `freq_mhz`, if any
    pub fn for_frequency(freq_mhz: u32) -> Option<Band> {
        BANDS
            .iter()
            .find(|band| (band.min_mhz..=band.max_mhz).contains(&freq_mhz))
            .copied()
    }

    /// All defined bands, lowest first
    pub fn all() -> &'static [Band] {
        &BANDS
    }
}

/// Divider power and multiplier for a frequency, including the fallback row
fn select_band(freq_mhz: u32) -> (u32, u32) {
    match Band::for_frequency(freq_mhz) {
        Some(band) => (band.divider_power, band.multiplier),
        None => {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "{} MHz is outside every band, using divider power 0",
                freq_mhz
            );
            (FALLBACK_DIVIDER_POWER, FALLBACK_MULTIPLIER)
        }
    }
}

/// Everything the register encoder needs to know about the synthesizer
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    reference_clock_mhz: u32,
    frequency_mhz: u32,
    divider_power: u32,
    multiplier: u32,
    feedback_count: u32,
    feedback_mode: FeedbackMode,
    phase: u32,
    power_down: bool,
    aux_output_enabled: bool,
    rf_output_enabled: bool,
    aux_power: OutputPower,
    rf_power: OutputPower,
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_REFERENCE_CLOCK_MHZ)
    }
}

impl Config {
    /// Power-on defaults for the given reference clock. Frequency starts at 0
    /// until `set_frequency` is called.
    pub fn new(reference_clock_mhz: u32) -> Self {
        assert!(
            reference_clock_mhz > 0,
            "Reference clock must be at least 1 MHz"
        );
        Config {
            reference_clock_mhz,
            frequency_mhz: 0,
            divider_power: FALLBACK_DIVIDER_POWER,
            multiplier: FALLBACK_MULTIPLIER,
            feedback_count: 0,
            feedback_mode: FeedbackMode::Fundamental,
            phase: PHASE,
            power_down: false,
            aux_output_enabled: true,
            rf_output_enabled: true,
            aux_power: OutputPower::Plus5Dbm,
            rf_power: OutputPower::Plus5Dbm,
        }
    }

    /// Stores the target frequency and derives divider power, multiplier and N
    pub fn set_frequency(&mut self, freq_mhz: u32) {
        self.frequency_mhz = freq_mhz;
        let (divider_power, multiplier) = select_band(freq_mhz);
        self.divider_power = divider_power;
        self.multiplier = multiplier;
        self.recompute_feedback_count();
    }

    /// Selects the feedback path. N is re-derived from the stored frequency,
    /// which gives the same result as re-applying that frequency.
    pub fn set_feedback_mode(&mut self, mode: FeedbackMode) {
        self.feedback_mode = mode;
        self.recompute_feedback_count();
    }

    fn recompute_feedback_count(&mut self) {
        self.feedback_count = match self.feedback_mode {
            FeedbackMode::Fundamental => self.frequency_mhz / self.reference_clock_mhz,
            FeedbackMode::Divided => {
                self.frequency_mhz.saturating_mul(self.multiplier) / self.reference_clock_mhz
            }
        };
    }

    pub fn set_power_down(&mut self, power_down: bool) {
        self.power_down = power_down;
    }

    pub fn set_rf_output_enabled(&mut self, enabled: bool) {
        self.rf_output_enabled = enabled;
    }

    pub fn set_aux_output_enabled(&mut self, enabled: bool) {
        self.aux_output_enabled = enabled;
    }

    pub fn set_rf_power(&mut self, power: OutputPower) {
        self.rf_power = power;
    }

    pub fn set_aux_power(&mut self, power: OutputPower) {
        self.aux_power = power;
    }

    /// Target output frequency in MHz
    pub fn frequency_mhz(&self) -> u32 {
        self.frequency_mhz
    }

    pub fn reference_clock_mhz(&self) -> u32 {
        self.reference_clock_mhz
    }

    /// Output divide ratio is 2^divider_power
    pub fn divider_power(&self) -> u32 {
        self.divider_power
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// The N value loaded into the N-counter
    pub fn feedback_count(&self) -> u32 {
        self.feedback_count
    }

    pub fn feedback_mode(&self) -> FeedbackMode {
        self.feedback_mode
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }

    pub fn power_down(&self) -> bool {
        self.power_down
    }

    pub fn rf_output_enabled(&self) -> bool {
        self.rf_output_enabled
    }

    pub fn aux_output_enabled(&self) -> bool {
        self.aux_output_enabled
    }

    pub fn rf_power(&self) -> OutputPower {
        self.rf_power
    }

    pub fn aux_power(&self) -> OutputPower {
        self.aux_power
    }

    /// The frequency the programmed N actually produces. Differs from the
    /// target when it isn't a multiple of the reference clock step.
    pub fn synthesized_frequency_mhz(&self) -> u32 {
        let f = self.feedback_count * self.reference_clock_mhz;
        match self.feedback_mode {
            FeedbackMode::Fundamental => f,
            FeedbackMode::Divided => f / self.multiplier,
        }
    }
}
