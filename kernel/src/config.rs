//! Kernel configuration and component composition
//!
//! Platform constants plus compile-time selection of the boot console, the
//! debug sink and the status indicator through cargo features:
//! - `console-vga` (default): VGA text buffer; takes precedence
//! - `console-pl011`: PL011 UART as the boot console
//! - `console-null`: no boot console output
//! - `debug-uart`: log output on the PL011 UART, otherwise discarded
//! - `status-led`: GPIO LED driven high once the console is up

#[cfg(all(feature = "console-vga", target_arch = "aarch64", target_os = "none"))]
compile_error!(
    "the Raspberry Pi has no VGA text buffer; build with \
     --no-default-features --features bare-metal,console-pl011,status-led,log-info"
);

use crate::components::console::ConsoleError;
use crate::hal::MmioBlock;

#[cfg(any(feature = "debug-uart", all(feature = "console-pl011", not(feature = "console-vga"))))]
use crate::components::console::pl011::{Pl011Console, PL011_REGISTER_COUNT};

/// VGA text buffer (x86_64)
pub const VGA_BUFFER_BASE: usize = crate::components::console::vga::VGA_BUFFER_ADDR;

/// GPIO controller (Raspberry Pi 5)
pub const GPIO_BASE: usize = crate::components::gpio::GPIO_BASE;

/// PL011 UART (Raspberry Pi 5)
pub const PL011_BASE: usize = 0xFE20_1000;

/// Status LED pin
pub const STATUS_LED_PIN: u8 = 6;

/// Boot stack size reserved by the linker scripts
pub const BOOT_STACK_SIZE: usize = 64 * 1024;

/// Load address of the kernel image
#[cfg(target_arch = "aarch64")]
pub const KERNEL_LOAD_ADDR: usize = 0x8_0000;
#[cfg(not(target_arch = "aarch64"))]
pub const KERNEL_LOAD_ADDR: usize = 0x10_0000;

// Boot console

#[cfg(feature = "console-vga")]
pub type BootConsole = crate::components::console::vga::VgaConsole<MmioBlock<u8>>;

#[cfg(all(feature = "console-pl011", not(feature = "console-vga")))]
pub type BootConsole = Pl011Console<MmioBlock<u32>>;

#[cfg(not(any(feature = "console-vga", feature = "console-pl011")))]
pub type BootConsole = crate::components::console::null::NullConsole;

/// Construct the boot console
///
/// # Safety
/// The selected device must be mapped at its platform address and not
/// already owned by another console.
#[cfg(feature = "console-vga")]
pub unsafe fn boot_console() -> Result<BootConsole, ConsoleError> {
    use crate::components::console::vga::{VgaConsole, VGA_BUFFER_SIZE};

    VgaConsole::new(MmioBlock::new(VGA_BUFFER_BASE, VGA_BUFFER_SIZE))
}

/// Construct the boot console
///
/// # Safety
/// The PL011 must be mapped at [`PL011_BASE`].
#[cfg(all(feature = "console-pl011", not(feature = "console-vga")))]
pub unsafe fn boot_console() -> Result<BootConsole, ConsoleError> {
    let mut uart = Pl011Console::new(MmioBlock::new(PL011_BASE, PL011_REGISTER_COUNT));
    uart.init();
    Ok(uart)
}

/// Construct the boot console
///
/// # Safety
/// Always safe; `unsafe` only to match the other configurations.
#[cfg(not(any(feature = "console-vga", feature = "console-pl011")))]
pub unsafe fn boot_console() -> Result<BootConsole, ConsoleError> {
    Ok(crate::components::console::null::NullConsole::new())
}

// Debug sink

#[cfg(feature = "debug-uart")]
pub type DebugConsole = Pl011Console<MmioBlock<u32>>;

#[cfg(not(feature = "debug-uart"))]
pub type DebugConsole = crate::components::console::null::NullConsole;

/// Construct the debug console
///
/// # Safety
/// The PL011 must be mapped at [`PL011_BASE`].
#[cfg(feature = "debug-uart")]
pub unsafe fn debug_console() -> DebugConsole {
    let mut uart = Pl011Console::new(MmioBlock::new(PL011_BASE, PL011_REGISTER_COUNT));
    uart.init();
    uart
}

/// Construct the debug console
///
/// # Safety
/// Always safe; `unsafe` only to match the other configurations.
#[cfg(not(feature = "debug-uart"))]
pub unsafe fn debug_console() -> DebugConsole {
    crate::components::console::null::NullConsole::new()
}

// Status indicator

#[cfg(feature = "status-led")]
pub type BootIndicator = crate::components::gpio::GpioLed<MmioBlock<u32>>;

#[cfg(not(feature = "status-led"))]
pub type BootIndicator = crate::components::NoIndicator;

/// Construct the status indicator
///
/// # Safety
/// The GPIO controller must be mapped at [`GPIO_BASE`].
#[cfg(feature = "status-led")]
pub unsafe fn boot_indicator() -> BootIndicator {
    use crate::components::gpio::{GpioController, GpioLed, Pin, GPIO_REGISTER_COUNT};

    const LED: Pin = match Pin::new(STATUS_LED_PIN) {
        Ok(pin) => pin,
        Err(_) => panic!("STATUS_LED_PIN is not a GPIO pin"),
    };

    GpioLed::new(
        GpioController::new(MmioBlock::new(GPIO_BASE, GPIO_REGISTER_COUNT)),
        LED,
    )
}

/// Construct the status indicator
///
/// # Safety
/// Always safe; `unsafe` only to match the other configurations.
#[cfg(not(feature = "status-led"))]
pub unsafe fn boot_indicator() -> BootIndicator {
    crate::components::NoIndicator
}
