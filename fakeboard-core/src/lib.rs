//! Fakeboard core: the board dispatch layer.
//!
//! A [`Board`] owns a fixed roster of devices and routes id/offset accesses
//! to them. Device errors come back to the caller unchanged.

pub mod board;
pub mod config;
pub mod roster;

pub use board::{Board, BoardState};
pub use config::{BoardConfig, IdPolicy};
pub use fakeboard_io::{Device, DeviceError, Offset, Word};
