//! Packaging crate for the `TicketKit` mobile bindings.
//!
//! Re-exports [`ticketkit_core`] together with its `UniFFI` scaffolding so that a
//! single static/dynamic library can be linked into the iOS and Android apps.

pub use ticketkit_core::*;

ticketkit_core::uniffi_reexport_scaffolding!();
