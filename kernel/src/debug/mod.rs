//! Debug output and logging
//!
//! A single global sink, [`LOGGER`], owns the debug console selected in
//! `config.rs`. It backs both the `log` facade (`log::info!` and friends) and
//! the `kprint!`/`kprintln!` macros. Until [`init`] attaches a console, all
//! output is dropped.

use core::fmt::{self, Write};

use log::{LevelFilter, Log, Metadata, Record};
use spin::{Mutex, Once};

use crate::components::console::{Console, ConsoleWriter};
use crate::config::DebugConsole;

/// `log::Log` implementation writing `[LEVEL] target: message` lines
pub struct KernelLogger<C: Console + Send> {
    sink: Mutex<Option<C>>,
}

impl<C: Console + Send> KernelLogger<C> {
    pub const fn new() -> Self {
        Self {
            sink: Mutex::new(None),
        }
    }

    /// Route output to `console`, returning the previous one
    pub fn attach(&self, console: C) -> Option<C> {
        self.sink.lock().replace(console)
    }

    pub fn detach(&self) -> Option<C> {
        self.sink.lock().take()
    }

    /// Write preformatted output to the sink, if any
    pub fn write_fmt(&self, args: fmt::Arguments<'_>) {
        if let Some(console) = self.sink.lock().as_mut() {
            let _ = ConsoleWriter::new(console).write_fmt(args);
        }
    }

    /// Like `write_fmt`, but drops the output instead of waiting for a held
    /// sink; returns whether it was written
    ///
    /// With a single execution context a held lock means we re-entered
    /// from inside a write (a panic raised by the console itself), and
    /// waiting would never end.
    pub fn try_write_fmt(&self, args: fmt::Arguments<'_>) -> bool {
        match self.sink.try_lock() {
            Some(mut sink) => match sink.as_mut() {
                Some(console) => {
                    let _ = ConsoleWriter::new(console).write_fmt(args);
                    true
                }
                None => false,
            },
            None => false,
        }
    }
}

impl<C: Console + Send> Default for KernelLogger<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Console + Send> Log for KernelLogger<C> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(console) = self.sink.lock().as_mut() {
            let _ = writeln!(
                ConsoleWriter::new(console),
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Compile-time maximum log level
pub const fn max_level() -> LevelFilter {
    if cfg!(feature = "log-trace") {
        LevelFilter::Trace
    } else if cfg!(feature = "log-debug") {
        LevelFilter::Debug
    } else if cfg!(feature = "log-info") {
        LevelFilter::Info
    } else if cfg!(feature = "log-warn") {
        LevelFilter::Warn
    } else if cfg!(feature = "log-error") {
        LevelFilter::Error
    } else {
        LevelFilter::Off
    }
}

/// Global debug sink
pub static LOGGER: KernelLogger<DebugConsole> = KernelLogger::new();

static REGISTERED: Once = Once::new();

/// Attach the debug console and install [`LOGGER`] as the `log` backend
///
/// Safe to call more than once; later calls only swap the console.
pub fn init(console: DebugConsole) {
    LOGGER.attach(console);
    REGISTERED.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(max_level());
        }
    });
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments<'_>) {
    // kprint! is what the panic handler uses, so it must not block
    LOGGER.try_write_fmt(args);
}

/// Print to the debug console
#[macro_export]
macro_rules! kprint {
    ($($arg:tt)*) => ({
        $crate::debug::_print(format_args!($($arg)*));
    });
}

/// Print to the debug console, with a newline
#[macro_export]
macro_rules! kprintln {
    () => ($crate::kprint!("\n"));
    ($($arg:tt)*) => ({
        $crate::debug::_print(format_args!("{}\n", format_args!($($arg)*)));
    });
}
