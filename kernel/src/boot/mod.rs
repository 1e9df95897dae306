//! Boot sequence
//!
//! `_start` (in `main.rs`) sets up the stack and calls [`kernel_entry`],
//! which builds the configured components and hands them to a
//! [`BootMachine`]:
//!
//! 1. `Booting`: clear the console, signal the status indicator, print the
//!    banner, usage hint and prompt
//! 2. `Initialized`: nothing left to set up; move to idle
//! 3. `Idle`: spin forever
//!
//! The machine only advances while its [`StepBudget`] allows, so tests can
//! drive it through every state without hanging.

use crate::components::console::Console;
use crate::components::StatusIndicator;
use crate::fs::Catalog;
use crate::shell;

/// Greeting printed once the console is up
pub const BANNER: &str = "Welcome to my C Kernel!\n";

/// Usage hint printed after the banner
pub const HINT: &str = "Type 'help' for a list of commands.\n\n";

/// Command prompt
pub const PROMPT: &str = "> ";

/// Boot progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootState {
    Booting,
    Initialized,
    /// Terminal state
    Idle,
}

/// Limits how many steps [`BootMachine::run`] takes
pub trait StepBudget {
    /// Consume one step; `false` once the budget is spent
    fn take(&mut self) -> bool;
}

/// Never runs out; the production budget
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl StepBudget for Unbounded {
    fn take(&mut self) -> bool {
        true
    }
}

/// Runs out after a fixed number of steps
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Clone, Copy)]
pub struct Bounded(pub usize);

#[cfg(any(test, feature = "testing"))]
impl StepBudget for Bounded {
    fn take(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        true
    }
}

/// Boot state machine owning the console, status indicator and catalog
pub struct BootMachine<'a, C: Console, I: StatusIndicator> {
    state: BootState,
    console: C,
    indicator: I,
    catalog: Catalog<'a>,
}

impl<'a, C: Console, I: StatusIndicator> BootMachine<'a, C, I> {
    pub fn new(console: C, indicator: I, catalog: Catalog<'a>) -> Self {
        Self {
            state: BootState::Booting,
            console,
            indicator,
            catalog,
        }
    }

    pub fn state(&self) -> BootState {
        self.state
    }

    /// Advance by one transition and return the new state
    pub fn step(&mut self) -> BootState {
        self.state = match self.state {
            BootState::Booting => {
                self.console.clear_screen();
                self.indicator.signal_ready();
                self.console.print_str(BANNER);
                self.console.print_str(HINT);
                self.console.print_str(PROMPT);
                log::info!("console up, {} catalog entries", self.catalog.entries().len());
                BootState::Initialized
            }
            BootState::Initialized => {
                log::debug!("entering idle");
                BootState::Idle
            }
            BootState::Idle => {
                core::hint::spin_loop();
                BootState::Idle
            }
        };
        self.state
    }

    /// Step while `budget` allows
    ///
    /// With [`Unbounded`] this never returns.
    pub fn run<B: StepBudget>(&mut self, budget: &mut B) -> BootState {
        while budget.take() {
            self.step();
        }
        self.state
    }

    /// Run one command line and print a fresh prompt
    pub fn dispatch(&mut self, line: &str) {
        shell::execute(shell::parse(line), &mut self.console, &self.catalog);
        self.console.print_str(PROMPT);
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }
}

/// Rust entry point, called by `_start` with a valid stack
pub fn kernel_entry() -> ! {
    // SAFETY: single execution context; each device is constructed once,
    // here, at its platform address.
    crate::debug::init(unsafe { crate::config::debug_console() });
    log::info!("picokern {}", env!("CARGO_PKG_VERSION"));

    let console = match unsafe { crate::config::boot_console() } {
        Ok(console) => console,
        Err(err) => {
            log::error!("boot console unavailable: {}", err);
            halt()
        }
    };
    let indicator = unsafe { crate::config::boot_indicator() };

    let mut machine = BootMachine::new(console, indicator, Catalog::builtin());
    machine.run(&mut Unbounded);
    halt()
}

/// Stop making progress
pub fn halt() -> ! {
    loop {
        core::hint::spin_loop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::console::testing::RecordingConsole;
    use crate::components::console::vga::VgaConsole;
    use crate::components::NoIndicator;
    use crate::hal::SimBlock;

    #[derive(Default)]
    struct CountingIndicator {
        signals: usize,
    }

    impl StatusIndicator for CountingIndicator {
        fn signal_ready(&mut self) {
            self.signals += 1;
        }
    }

    fn machine() -> BootMachine<'static, RecordingConsole, CountingIndicator> {
        BootMachine::new(
            RecordingConsole::default(),
            CountingIndicator::default(),
            Catalog::builtin(),
        )
    }

    #[test]
    fn test_reaches_idle() {
        let mut boot = machine();
        assert_eq!(boot.state(), BootState::Booting);
        assert_eq!(boot.run(&mut Bounded(0)), BootState::Booting);
        assert_eq!(boot.run(&mut Bounded(1)), BootState::Initialized);
        assert_eq!(boot.run(&mut Bounded(1)), BootState::Idle);
        assert_eq!(boot.run(&mut Bounded(100)), BootState::Idle);
    }

    #[test]
    fn test_indicator_signalled_once() {
        let mut boot = machine();
        boot.run(&mut Bounded(10));
        assert_eq!(boot.indicator().signals, 1);
        assert_eq!(boot.console().clears, 1);
    }

    #[test]
    fn test_greeting_order() {
        let mut boot = machine();
        boot.run(&mut Bounded(2));
        assert_eq!(
            boot.console().text(),
            "Welcome to my C Kernel!\nType 'help' for a list of commands.\n\n> "
        );
    }

    #[test]
    fn test_greeting_on_vga() {
        let console = VgaConsole::new(SimBlock::<u8, 4000>::from_array([b'#'; 4000])).unwrap();
        let mut boot = BootMachine::new(console, NoIndicator, Catalog::builtin());
        boot.run(&mut Bounded(2));

        let vga = boot.console();
        let greeting = [BANNER, HINT, PROMPT].concat();
        for (i, byte) in greeting.bytes().enumerate() {
            assert_eq!(vga.cell(i).character, byte);
            assert_eq!(vga.cell(i).attribute.bits(), 0x07);
        }
        assert_eq!(vga.cursor(), greeting.len());
        // Stale contents were cleared
        assert_eq!(vga.cell(greeting.len()).character, b' ');
        assert_eq!(vga.cell(1999).character, b' ');
    }

    #[test]
    fn test_banner_fills_first_cells() {
        let console = VgaConsole::new(SimBlock::<u8, 4000>::new()).unwrap();
        let mut boot = BootMachine::new(console, NoIndicator, Catalog::builtin());
        boot.run(&mut Bounded(2));

        let vga = boot.console();
        let shown: std::vec::Vec<u8> = (0..24).map(|i| vga.cell(i).character).collect();
        assert_eq!(shown, b"Welcome to my C Kernel!\n");
        assert!((0..24).all(|i| vga.cell(i).attribute.bits() == 0x07));
    }

    #[test]
    fn test_dispatch_reprints_prompt() {
        let mut boot = machine();
        boot.run(&mut Bounded(2));
        boot.dispatch("cat MESSAGE.TXT");

        assert!(boot
            .console()
            .text()
            .ends_with("> This is a simple test message.\r\nHello, World!\n> "));

        boot.dispatch("cat GONE.TXT");
        assert!(boot.console().text().ends_with("file not found: GONE.TXT\n> "));
    }
}
