#![no_std]

//! The identification pipeline: port traits for the card reader and the
//! operator keypad, the blocking/polling scanner, startup enrollment and
//! steady-state dispatch. The ports are injected, so the whole pipeline
//! runs against real hardware or against the `reader_emulator` crate.

mod dispatch;
#[cfg(feature = "mfrc522")]
mod mfrc522_reader;
mod ports;
mod registry;
mod scan;

pub use dispatch::*;
#[cfg(feature = "mfrc522")]
pub use mfrc522_reader::*;
pub use ports::*;
pub use registry::*;
pub use scan::*;

#[cfg(test)]
pub(crate) mod test_support;
