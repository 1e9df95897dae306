//! PicoKern
//!
//! A minimal firmware layer for x86_64 (VGA text mode) and the Raspberry Pi 5
//! (GPIO status LED, PL011 UART).
//!
//! # Architecture
//!
//! The kernel is organized into the following modules:
//! - `hal`: typed register blocks (volatile MMIO, in-memory simulation)
//! - `components`: console drivers and the GPIO controller
//! - `fs`: the static file catalog generated at build time
//! - `shell`: command parsing and dispatch
//! - `boot`: boot state machine and the Rust entry point
//! - `debug`: debug output and `log` backend
//! - `config`: compile-time component selection
//!
//! The library builds on the host so everything above is unit tested against
//! simulated register blocks; `src/main.rs` is the bare-metal binary.

#![cfg_attr(not(test), no_std)]

pub mod boot;
pub mod components;
pub mod config;
pub mod debug;
pub mod fs;
pub mod hal;
pub mod shell;
