//! Control register layouts and the encoder from [`Config`] to wire words
use crate::config::{Config, FeedbackMode};

/// Muxout shows digital lock detect
pub const MUXOUT_DIGITAL_LOCK_DETECT: u32 = 6;
/// Reference counter, f_PFD = f_ref / R
pub const R_COUNTER: u32 = 1;
/// Charge pump setting 7, 2.50 mA with a 5.1 kOhm R_SET
pub const CHARGE_PUMP_CURRENT: u32 = 7;
/// Band select clock divider, keeps the band select clock at or below 125 kHz
/// for a 10 MHz PFD
pub const BAND_SELECT_CLOCK_DIVIDER: u32 = 80;
/// Modulus for integer-N operation with FRAC = 0
pub const MODULUS: u32 = 2;
/// LD pin follows digital lock detect
pub const LD_PIN_DIGITAL_LOCK_DETECT: u32 = 1;
/// R5 bits 20:19 must be written as ones
pub const R5_RESERVED: u32 = 0b11;

#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterAddr {
    // INT and FRAC values
    R0,
    // Prescaler, phase, modulus
    R1,
    // Muxout, reference path, charge pump, lock detect, power down
    R2,
    // Clock divider, cycle slip reduction
    R3,
    // Feedback select, output divider, band select clock, output stages
    R4,
    // Lock detect pin mode
    R5,
}

impl RegisterAddr {
    /// Order the chip must receive words in. Writing R0 double-buffers the
    /// rest, so it goes last.
    pub const WRITE_ORDER: [RegisterAddr; 6] = [
        RegisterAddr::R5,
        RegisterAddr::R4,
        RegisterAddr::R3,
        RegisterAddr::R2,
        RegisterAddr::R1,
        RegisterAddr::R0,
    ];

    /// The register a word is addressed to, from its control bits
    pub fn of_word(word: u32) -> Option<RegisterAddr> {
        match word & ADDR_MASK {
            0 => Some(RegisterAddr::R0),
            1 => Some(RegisterAddr::R1),
            2 => Some(RegisterAddr::R2),
            3 => Some(RegisterAddr::R3),
            4 => Some(RegisterAddr::R4),
            5 => Some(RegisterAddr::R5),
            _ => None,
        }
    }
}

const ADDR_MASK: u32 = 0b111;

pub trait Register {
    fn addr() -> RegisterAddr;
}

// Utilities

fn field_mask(size: u8) -> u32 {
    if size >= 32 {
        u32::MAX
    } else {
        (1u32 << size) - 1
    }
}

fn shift_flag_forward(flag: bool, bit: u8) -> u32 {
    (flag as u32) << bit
}

// Oversized values are truncated to the field width rather than spilling into
// their neighbours
fn shift_num_forward(num: u32, start: u8, size: u8) -> u32 {
    (num & field_mask(size)) << start
}

fn shift_flag_back(payload: u32, bit: u8) -> bool {
    (payload >> bit) & 1 == 1
}

fn shift_num_back(payload: u32, start: u8, size: u8) -> u32 {
    (payload >> start) & field_mask(size)
}

macro_rules! register {
    ($(#[$meta:meta])*
     $name:ident,
     numbers:
     {
         $($num:ident : ($size:literal, $start:literal),)*
     },
     flags:
     {
        $($flag:ident: $pos:literal,)*
     }) => {
        $(#[$meta])*
        #[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name {
            $(pub $num: u32,)*
            $(pub $flag: bool,)*
        }
        impl Register for $name {
            fn addr() -> RegisterAddr {
                RegisterAddr::$name
            }
        }
        impl From<&$name> for u32 {
            #[allow(unused_mut)]
            fn from(register: &$name) -> Self {
                let mut payload = RegisterAddr::$name as u32;
                $(payload |= shift_num_forward(register.$num, $start, $size);)*
                $(payload |= shift_flag_forward(register.$flag, $pos);)*
                payload
            }
        }
        impl From<u32> for $name {
            #[allow(unused_variables)]
            fn from(payload: u32) -> Self {
                $(let $num = shift_num_back(payload, $start, $size);)*
                $(let $flag = shift_flag_back(payload, $pos);)*
                Self {
                    $($num,)*
                    $($flag,)*
                }
            }
        }
    };
}

register!(
    /// Integer and fractional division values
    R0,
    numbers:
    {
        int: (16, 15),
        frac: (12, 3),
    },
    flags:
    {
    }
);

register!(
    /// Prescaler, phase and modulus
    R1,
    numbers:
    {
        phase: (12, 15),
        modulus: (12, 3),
    },
    flags:
    {
        prescaler_8_9: 27,
    }
);

register!(
    /// Reference path, charge pump and lock detect
    R2,
    numbers:
    {
        noise_mode: (2, 29),
        muxout: (3, 26),
        r_counter: (10, 14),
        cp_current: (4, 9),
    },
    flags:
    {
        ref_doubler: 25,
        ref_div2: 24,
        double_buffer: 13,
        ldf_int_n: 8,
        ldp_6ns: 7,
        pd_polarity_positive: 6,
        power_down: 5,
        cp_three_state: 4,
        counter_reset: 3,
    }
);

register!(
    /// Clock divider and cycle slip reduction, unused in integer-N operation
    R3,
    numbers:
    {
        clk_div_mode: (2, 15),
        clock_divider: (12, 3),
    },
    flags:
    {
        csr: 18,
    }
);

register!(
    /// Feedback path, output divider and both output stages
    R4,
    numbers:
    {
        divider_select: (3, 20),
        band_select_clock_div: (8, 12),
        aux_output_power: (2, 6),
        rf_output_power: (2, 3),
    },
    flags:
    {
        feedback_select: 23,
        vco_power_down: 11,
        mtld: 10,
        aux_output_select: 9,
        aux_output_enable: 8,
        rf_output_enable: 5,
    }
);

register!(
    /// Lock detect pin mode
    R5,
    numbers:
    {
        ld_pin_mode: (2, 22),
        reserved: (2, 19),
    },
    flags:
    {
    }
);

// Encoder

impl From<&Config> for R0 {
    fn from(config: &Config) -> Self {
        R0 {
            int: config.feedback_count(),
            frac: 0,
        }
    }
}

impl From<&Config> for R1 {
    fn from(config: &Config) -> Self {
        R1 {
            phase: config.phase(),
            modulus: MODULUS,
            prescaler_8_9: false,
        }
    }
}

impl From<&Config> for R2 {
    fn from(config: &Config) -> Self {
        R2 {
            muxout: MUXOUT_DIGITAL_LOCK_DETECT,
            r_counter: R_COUNTER,
            cp_current: CHARGE_PUMP_CURRENT,
            ldf_int_n: true,
            pd_polarity_positive: true,
            power_down: config.power_down(),
            ..R2::default()
        }
    }
}

impl From<&Config> for R3 {
    fn from(_config: &Config) -> Self {
        R3::default()
    }
}

impl From<&Config> for R4 {
    fn from(config: &Config) -> Self {
        R4 {
            feedback_select: config.feedback_mode() == FeedbackMode::Divided,
            divider_select: config.divider_power(),
            band_select_clock_div: BAND_SELECT_CLOCK_DIVIDER,
            aux_output_enable: config.aux_output_enabled(),
            aux_output_power: config.aux_power() as u32,
            rf_output_enable: config.rf_output_enabled(),
            rf_output_power: config.rf_power() as u32,
            ..R4::default()
        }
    }
}

impl From<&Config> for R5 {
    fn from(_config: &Config) -> Self {
        R5 {
            ld_pin_mode: LD_PIN_DIGITAL_LOCK_DETECT,
            reserved: R5_RESERVED,
        }
    }
}

fn encode<'a, R>(config: &'a Config) -> u32
where
    R: Register + From<&'a Config>,
    for<'r> &'r R: Into<u32>,
{
    (&R::from(config)).into()
}

/// All six control words for one configuration, indexed by address
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterSet {
    words: [u32; 6],
}

impl From<&Config> for RegisterSet {
    fn from(config: &Config) -> Self {
        RegisterSet {
            words: [
                encode::<R0>(config),
                encode::<R1>(config),
                encode::<R2>(config),
                encode::<R3>(config),
                encode::<R4>(config),
                encode::<R5>(config),
            ],
        }
    }
}

impl RegisterSet {
    pub fn word(&self, addr: RegisterAddr) -> u32 {
        self.words[addr as usize]
    }

    /// The word for `addr` as sent on the wire, MSB first
    pub fn bytes(&self, addr: RegisterAddr) -> [u8; 4] {
        self.word(addr).to_be_bytes()
    }

    /// Decodes one register back into its fields
    pub fn get<R>(&self) -> R
    where
        R: Register + From<u32>,
    {
        self.word(R::addr()).into()
    }

    /// Words in the order they must be transmitted
    pub fn in_write_order(&self) -> impl Iterator<Item = (RegisterAddr, u32)> + '_ {
        RegisterAddr::WRITE_ORDER
            .iter()
            .map(move |&addr| (addr, self.word(addr)))
    }
}

// Tests
