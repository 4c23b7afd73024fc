//! Fakeboard I/O: the device layer.
//!
//! Every device on a board is a fixed-size array of words behind the
//! [`Device`] trait. Offsets are validated against the device size before
//! any access, then the device applies its own policy.

pub mod device;
pub mod error;
pub mod rom;
pub mod store;

// Re-exports for easier access by fakeboard-core
pub use device::{Device, Offset, Word};
pub use error::DeviceError;
pub use rom::RomConfig;
pub use store::Store;
