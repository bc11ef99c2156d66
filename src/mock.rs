//! A mock ADF4350 that shifts in bytes while selected and latches the word on deselect
use embedded_hal::blocking::spi::Transfer;
use embedded_hal::digital::v2::OutputPin;
use std::cell::RefCell;
use std::rc::Rc;

use crate::registers::RegisterAddr;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BusEvent {
    Select,
    Byte(u8),
    Deselect,
}

#[derive(Debug, PartialEq)]
pub enum MockError {
    BusFault,
    PinFault,
}

#[derive(Default)]
struct Bus {
    selected: bool,
    shift: u32,
    events: Vec<BusEvent>,
    registers: [Option<u32>; 6],
    latched: Vec<u32>,
    fail_transfer: bool,
    fail_select: bool,
}

impl Bus {
    fn latch(&mut self) {
        let word = self.shift;
        if let Some(addr) = RegisterAddr::of_word(word) {
            self.registers[addr as usize] = Some(word);
        }
        self.latched.push(word);
        self.shift = 0;
    }
}

/// Shared handle to the chip. Hand out `spi()` and `cs()` to the driver and
/// inspect the bus from here.
#[derive(Clone, Default)]
pub struct MockAdf4350 {
    bus: Rc<RefCell<Bus>>,
}

pub struct MockAdf4350Spi {
    bus: Rc<RefCell<Bus>>,
}

pub struct MockAdf4350Cs {
    bus: Rc<RefCell<Bus>>,
}

impl MockAdf4350 {
    pub fn spi(&self) -> MockAdf4350Spi {
        MockAdf4350Spi {
            bus: self.bus.clone(),
        }
    }

    pub fn cs(&self) -> MockAdf4350Cs {
        MockAdf4350Cs {
            bus: self.bus.clone(),
        }
    }

    pub fn events(&self) -> Vec<BusEvent> {
        self.bus.borrow().events.clone()
    }

    /// Every word latched so far, oldest first
    pub fn latched(&self) -> Vec<u32> {
        self.bus.borrow().latched.clone()
    }

    pub fn read(&self, addr: RegisterAddr) -> Option<u32> {
        self.bus.borrow().registers[addr as usize]
    }

    pub fn is_selected(&self) -> bool {
        self.bus.borrow().selected
    }

    pub fn clear_log(&self) {
        let mut bus = self.bus.borrow_mut();
        bus.events.clear();
        bus.latched.clear();
    }

    pub fn fail_transfers(&self) {
        self.bus.borrow_mut().fail_transfer = true;
    }

    pub fn fail_select(&self) {
        self.bus.borrow_mut().fail_select = true;
    }
}

impl Transfer<u8> for MockAdf4350Spi {
    type Error = MockError;

    fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], Self::Error> {
        let mut bus = self.bus.borrow_mut();
        if bus.fail_transfer {
            return Err(MockError::BusFault);
        }
        for &byte in words.iter() {
            bus.events.push(BusEvent::Byte(byte));
            if bus.selected {
                bus.shift = (bus.shift << 8) | byte as u32;
            }
        }
        // Write-only part, nothing comes back on MISO
        for byte in words.iter_mut() {
            *byte = 0;
        }
        Ok(words)
    }
}

impl OutputPin for MockAdf4350Cs {
    type Error = MockError;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut bus = self.bus.borrow_mut();
        if bus.fail_select {
            return Err(MockError::PinFault);
        }
        bus.selected = true;
        bus.events.push(BusEvent::Select);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut bus = self.bus.borrow_mut();
        if bus.selected {
            bus.latch();
        }
        bus.selected = false;
        bus.events.push(BusEvent::Deselect);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock() {
        let chip = MockAdf4350::default();
        let mut spi = chip.spi();
        let mut cs = chip.cs();

        // Ignored while deselected
        spi.transfer(&mut [0xFF, 0xFF, 0xFF, 0xFD]).unwrap();
        cs.set_low().unwrap();
        spi.transfer(&mut [0x00, 0x58, 0x00, 0x05]).unwrap();
        cs.set_high().unwrap();

        assert_eq!(chip.read(RegisterAddr::R5), Some(0x0058_0005));
        assert_eq!(chip.read(RegisterAddr::R0), None);
        assert_eq!(chip.latched(), vec![0x0058_0005]);
        assert!(!chip.is_selected());
    }

    #[test]
    fn miso_is_quiet() {
        let chip = MockAdf4350::default();
        let mut read = [0xAA, 0xBB, 0xCC, 0xDD];
        chip.spi().transfer(&mut read).unwrap();
        assert_eq!(read, [0, 0, 0, 0]);
    }
}
