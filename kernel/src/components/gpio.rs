//! BCM2711 GPIO controller (Raspberry Pi)
//!
//! Alternate output sink for boards without a text buffer: a single GPIO
//! line (usually an LED) driven high once the kernel is up.
//!
//! Register map (32-bit words from the controller base):
//! - GPFSEL0..5 (0..=5): function select, 3 bits per pin, 10 pins per word
//! - GPSET0..1 (7..=8): write 1 to drive a pin high
//! - GPCLR0..1 (10..=11): write 1 to drive a pin low

use thiserror::Error;

use super::StatusIndicator;
use crate::hal::RegisterBlock;

/// Physical base of the GPIO controller (BCM2711 low-peripheral mode)
pub const GPIO_BASE: usize = 0xFE20_0000;

/// Words covered by the controller's register window
pub const GPIO_REGISTER_COUNT: usize = 0x100 / 4;

/// Number of GPIO lines
pub const PIN_COUNT: u8 = 58;

const GPFSEL0: usize = 0;
const GPSET0: usize = 7;
const GPCLR0: usize = 10;

const FSEL_BITS: u32 = 3;
const FSEL_MASK: u32 = 0b111;
const PINS_PER_FSEL: u8 = 10;
const PINS_PER_BANK: u8 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GpioError {
    #[error("GPIO pin {0} does not exist (0..58)")]
    InvalidPin(u8),
}

/// A validated GPIO pin number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin(u8);

impl Pin {
    pub const fn new(number: u8) -> Result<Self, GpioError> {
        if number < PIN_COUNT {
            Ok(Self(number))
        } else {
            Err(GpioError::InvalidPin(number))
        }
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// Function select register and bit shift for this pin
    const fn fsel_slot(self) -> (usize, u32) {
        (
            GPFSEL0 + (self.0 / PINS_PER_FSEL) as usize,
            (self.0 % PINS_PER_FSEL) as u32 * FSEL_BITS,
        )
    }

    /// Bank offset and bit for the set/clear registers
    const fn bank_slot(self) -> (usize, u32) {
        ((self.0 / PINS_PER_BANK) as usize, 1 << (self.0 % PINS_PER_BANK))
    }
}

/// Pin function select encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Function {
    Input = 0b000,
    Output = 0b001,
    Alt0 = 0b100,
    Alt1 = 0b101,
    Alt2 = 0b110,
    Alt3 = 0b111,
    Alt4 = 0b011,
    Alt5 = 0b010,
}

impl Function {
    const fn from_bits(bits: u32) -> Self {
        match bits & FSEL_MASK {
            0b000 => Function::Input,
            0b001 => Function::Output,
            0b100 => Function::Alt0,
            0b101 => Function::Alt1,
            0b110 => Function::Alt2,
            0b111 => Function::Alt3,
            0b011 => Function::Alt4,
            _ => Function::Alt5,
        }
    }
}

/// GPIO controller over a 32-bit register block
pub struct GpioController<R: RegisterBlock<u32>> {
    regs: R,
}

impl<R: RegisterBlock<u32>> GpioController<R> {
    pub const fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Select `function` for `pin`, leaving the other pins in the register alone
    pub fn set_function(&mut self, pin: Pin, function: Function) {
        let (index, shift) = pin.fsel_slot();
        self.regs
            .set_bits(index, FSEL_MASK << shift, (function as u32) << shift);
    }

    /// Current function of `pin`
    pub fn function(&self, pin: Pin) -> Function {
        let (index, shift) = pin.fsel_slot();
        Function::from_bits(self.regs.read(index) >> shift)
    }

    pub fn configure_pin_as_output(&mut self, pin: Pin) {
        self.set_function(pin, Function::Output);
    }

    /// Drive `pin` high (single write, other pins unaffected)
    pub fn set_pin_high(&mut self, pin: Pin) {
        let (bank, bit) = pin.bank_slot();
        self.regs.write(GPSET0 + bank, bit);
    }

    /// Drive `pin` low (single write, other pins unaffected)
    pub fn set_pin_low(&mut self, pin: Pin) {
        let (bank, bit) = pin.bank_slot();
        self.regs.write(GPCLR0 + bank, bit);
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }
}

/// A GPIO line used as the "kernel is up" indicator
pub struct GpioLed<R: RegisterBlock<u32>> {
    gpio: GpioController<R>,
    pin: Pin,
}

impl<R: RegisterBlock<u32>> GpioLed<R> {
    pub const fn new(gpio: GpioController<R>, pin: Pin) -> Self {
        Self { gpio, pin }
    }

    pub fn controller(&self) -> &GpioController<R> {
        &self.gpio
    }
}

impl<R: RegisterBlock<u32>> StatusIndicator for GpioLed<R> {
    fn signal_ready(&mut self) {
        self.gpio.configure_pin_as_output(self.pin);
        self.gpio.set_pin_high(self.pin);
        log::debug!("GPIO {} driven high", self.pin.number());
    }
}
