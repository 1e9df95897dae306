//! Command dispatcher
//!
//! Turns one input line into a [`Command`] and runs it against a console and
//! the file catalog. There is no input driver yet; whatever eventually reads
//! keystrokes hands complete lines to [`BootMachine::dispatch`].
//!
//! [`BootMachine::dispatch`]: crate::boot::BootMachine::dispatch

use core::fmt::Write;

use crate::components::console::{Console, ConsoleWriter};
use crate::fs::Catalog;

/// Commands understood by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Help,
    /// Print a file from the catalog
    Cat(&'a str),
    /// List catalog entries
    Ls,
    Clear,
    /// Blank line
    Empty,
    /// A known command given without its required operand
    MissingOperand(&'a str),
    Unknown(&'a str),
}

const HELP_TEXT: &str = "Available commands:\n\
    \x20 help         show this message\n\
    \x20 cat <name>   print a file\n\
    \x20 ls           list files\n\
    \x20 clear        clear the screen\n";

/// Parse a command line
///
/// Words are separated by ASCII whitespace. Operands beyond the ones a
/// command uses are ignored.
pub fn parse(line: &str) -> Command<'_> {
    let mut words = line.split_ascii_whitespace();
    let Some(verb) = words.next() else {
        return Command::Empty;
    };

    match verb {
        "help" => Command::Help,
        "cat" => match words.next() {
            Some(name) => Command::Cat(name),
            None => Command::MissingOperand(verb),
        },
        "ls" => Command::Ls,
        "clear" => Command::Clear,
        other => Command::Unknown(other),
    }
}

/// Run `command`, writing its output to `console`
pub fn execute<C: Console + ?Sized>(command: Command<'_>, console: &mut C, catalog: &Catalog<'_>) {
    match command {
        Command::Help => console.print_str(HELP_TEXT),
        Command::Cat(name) => cat(name, console, catalog),
        Command::Ls => ls(console, catalog),
        Command::Clear => console.clear_screen(),
        Command::Empty => {}
        Command::MissingOperand(verb) => {
            let _ = writeln!(ConsoleWriter::new(console), "{verb}: missing file name");
        }
        Command::Unknown(verb) => {
            let _ = writeln!(ConsoleWriter::new(console), "unknown command: {verb}");
        }
    }
}

fn cat<C: Console + ?Sized>(name: &str, console: &mut C, catalog: &Catalog<'_>) {
    match catalog.lookup(name) {
        Ok(block) => {
            console.print_string(catalog.text(block));
            console.print_char(b'\n');
        }
        // Lookup only ever misses
        Err(_) => {
            let _ = writeln!(ConsoleWriter::new(console), "file not found: {name}");
        }
    }
}

fn ls<C: Console + ?Sized>(console: &mut C, catalog: &Catalog<'_>) {
    let mut out = ConsoleWriter::new(console);
    let _ = writeln!(out, "NAME         START  COUNT");
    for entry in catalog.entries() {
        let _ = writeln!(
            out,
            "{:<11}  {:>5}  {:>5}",
            entry.name().as_str(),
            entry.start_sector(),
            entry.sector_count()
        );
    }
}
