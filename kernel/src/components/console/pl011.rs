//! PL011 UART console component (minimal)
//!
//! Serial console for the Raspberry Pi, where there is no text buffer. Also
//! the sink for kernel log output. TX only, no interrupts, assumes the
//! firmware already configured baud rate and line control.

use super::Console;
use crate::hal::RegisterBlock;

/// Register indices (32-bit words)
const UARTDR: usize = 0x00 / 4; // Data register
const UARTFR: usize = 0x18 / 4; // Flag register
const UARTCR: usize = 0x30 / 4; // Control register

/// Registers up to and including UARTCR
pub const PL011_REGISTER_COUNT: usize = UARTCR + 1;

/// Flag register: transmit FIFO full
const FR_TXFF: u32 = 1 << 5;

/// Control register: UART enable, transmit enable
const CR_UARTEN: u32 = 1 << 0;
const CR_TXE: u32 = 1 << 8;

/// PL011 console
pub struct Pl011Console<R: RegisterBlock<u32>> {
    regs: R,
}

impl<R: RegisterBlock<u32>> Pl011Console<R> {
    pub const fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Make sure the UART and its transmitter are enabled
    ///
    /// Leaves every other control bit as the firmware set it.
    pub fn init(&mut self) {
        self.regs.set_bits(UARTCR, CR_UARTEN | CR_TXE, CR_UARTEN | CR_TXE);
    }

    #[inline]
    fn tx_full(&self) -> bool {
        self.regs.read(UARTFR) & FR_TXFF != 0
    }

    fn putc(&mut self, c: u8) {
        // Wait until TX FIFO not full
        while self.tx_full() {
            core::hint::spin_loop();
        }
        self.regs.write(UARTDR, c as u32);
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }
}

impl<R: RegisterBlock<u32>> Console for Pl011Console<R> {
    fn print_char(&mut self, c: u8) {
        if c == b'\n' {
            self.putc(b'\r'); // CRLF for terminals
        }
        self.putc(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::SimBlock;
    use std::vec::Vec;

    /// UART model that records data register writes
    #[derive(Default)]
    struct FakeUart {
        regs: SimBlock<u32, PL011_REGISTER_COUNT>,
        sent: Vec<u8>,
    }

    impl RegisterBlock<u32> for FakeUart {
        fn len(&self) -> usize {
            self.regs.len()
        }

        fn read(&self, index: usize) -> u32 {
            self.regs.read(index)
        }

        fn write(&mut self, index: usize, value: u32) {
            if index == UARTDR {
                self.sent.push(value as u8);
            }
            self.regs.write(index, value);
        }
    }

    #[test]
    fn test_register_layout() {
        assert_eq!(UARTDR, 0);
        assert_eq!(UARTFR, 6);
        assert_eq!(UARTCR, 12);
    }

    #[test]
    fn test_newline_becomes_crlf() {
        let mut console = Pl011Console::new(FakeUart::default());
        console.print_str("ok\n");
        assert_eq!(console.registers().sent, b"ok\r\n");
    }

    #[test]
    fn test_init_enables_transmitter_and_keeps_other_bits() {
        let mut uart = FakeUart::default();
        uart.regs.write(UARTCR, 1 << 9); // RXE left on by firmware
        let mut console = Pl011Console::new(uart);

        console.init();

        assert_eq!(
            console.registers().read(UARTCR),
            (1 << 9) | CR_UARTEN | CR_TXE
        );
    }
}
