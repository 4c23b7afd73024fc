use log::info;

use crate::device::{check_offset, Device, Offset, Word};
use crate::error::DeviceError;

/// Capacity of the configuration ROM in words.
pub const ROM_WORDS: usize = 5;

/// Read-only configuration memory.
///
/// The image is loaded at construction: word `i` holds `i`. Every in-range
/// write is refused.
pub struct RomConfig {
    name: String,
    memory: [Word; ROM_WORDS],
}

impl RomConfig {
    pub fn new(name: &str) -> Self {
        let mut memory = [0; ROM_WORDS];
        for (i, word) in memory.iter_mut().enumerate() {
            *word = i as Word;
        }
        Self { name: name.to_string(), memory }
    }
}

impl Device for RomConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> usize {
        ROM_WORDS
    }

    fn initialize(&mut self) -> Result<(), DeviceError> {
        info!("Initializing device {}...", self.name);
        Ok(())
    }

    fn read(&self, offset: Offset) -> Result<Word, DeviceError> {
        let index = check_offset(offset, ROM_WORDS)?;
        Ok(self.memory[index])
    }

    fn write(&mut self, offset: Offset, _value: Word) -> Result<(), DeviceError> {
        check_offset(offset, ROM_WORDS)?;
        Err(DeviceError::PermissionDenied)
    }
}
