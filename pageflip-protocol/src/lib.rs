//! SSD1306 I2C command protocol
//!
//! This crate defines the bytes exchanged with an SSD1306 controller over
//! I2C. Every transfer starts with a control byte telling the controller
//! how to interpret the rest:
//!
//! ```text
//! ┌──────────────┬──────────────────────────────────┐
//! │ CONTROL 0x00 │ OPCODE [ARG [ARG]] OPCODE ...    │   command stream
//! ├──────────────┼──────────────────────────────────┤
//! │ CONTROL 0x40 │ GDDRAM bytes (one per 8px column)│   data stream
//! └──────────────┴──────────────────────────────────┘
//! ```
//!
//! [`CommandList`] accumulates a command stream; [`sequence`] builds the
//! fixed power-on and flush-prefix streams for a panel geometry.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod command;
pub mod sequence;

pub use command::{control, opcode, CommandList};
pub use sequence::{flush_prefix, power_off_sequence, power_on_sequence, Geometry};
