use crate::error::DeviceError;

/// Unit of access. Devices are word-addressed; there is no byte access.
pub type Word = u64;

/// Word index into a device.
pub type Offset = u32;

/// The capability contract every board device implements.
///
/// Construction must not touch storage that `initialize` is responsible
/// for. `size` is fixed for the lifetime of the device.
pub trait Device {
    /// Display name, fixed at construction.
    fn name(&self) -> &str;

    /// Capacity in words.
    fn size(&self) -> usize;

    /// Deferred setup. Called once by the owning board.
    fn initialize(&mut self) -> Result<(), DeviceError>;

    /// Reads the word at `offset`. Never mutates the device.
    fn read(&self, offset: Offset) -> Result<Word, DeviceError>;

    /// Writes `value` at `offset`. The range check comes before any
    /// device-specific rejection.
    fn write(&mut self, offset: Offset, value: Word) -> Result<(), DeviceError>;
}

/// Validates `offset` against a device of `size` words and returns it as
/// an index.
pub fn check_offset(offset: Offset, size: usize) -> Result<usize, DeviceError> {
    let index = offset as usize;
    if index >= size {
        return Err(DeviceError::OutOfRange { offset, size });
    }
    Ok(index)
}
