//! Kernel components
//!
//! Minimal output components built into the kernel. These are NOT
//! full-featured drivers: no interrupts, no buffering, no input.
//!
//! - **console**: text output (VGA text buffer, PL011 UART, null)
//! - **gpio**: GPIO controller, used as a status LED on boards without a
//!   text buffer
//!
//! # Component Composition (Compile-Time)
//!
//! Components are selected with cargo features in `config.rs`:
//!
//! ```ignore
//! #[cfg(feature = "console-vga")]
//! pub type BootConsole = VgaConsole<MmioBlock<u8>>;
//!
//! #[cfg(feature = "status-led")]
//! pub type BootIndicator = GpioLed<MmioBlock<u32>>;
//! ```

pub mod console;
pub mod gpio;

/// Something that can tell the outside world the kernel came up
pub trait StatusIndicator {
    fn signal_ready(&mut self);
}

/// Indicator for platforms with nothing to signal on
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIndicator;

impl StatusIndicator for NoIndicator {
    fn signal_ready(&mut self) {}
}
