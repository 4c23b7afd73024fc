use log::{info, warn};

use crate::device::{check_offset, Device, Offset, Word};
use crate::error::DeviceError;

/// Capacity of the store in words.
pub const STORE_WORDS: usize = 10;

/// Highest store version that exists on real boards.
pub const MAX_STORE_VERSION: i32 = 3;

/// Contents of the store until `initialize` clears it.
pub const POISON: Word = 0xdead_beef_dead_beef;

/// Read/write word store.
///
/// The version is only checked in `initialize`; an unsupported store can
/// be constructed and named but never comes up.
pub struct Store {
    name: String,
    version: i32,
    memory: [Word; STORE_WORDS],
}

impl Store {
    /// Creates a store named `<base_name>.<version>`.
    pub fn new(base_name: &str, version: i32) -> Self {
        Self {
            name: format!("{}.{}", base_name, version),
            version,
            memory: [POISON; STORE_WORDS],
        }
    }

    pub fn version(&self) -> i32 {
        self.version
    }
}

impl Device for Store {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> usize {
        STORE_WORDS
    }

    fn initialize(&mut self) -> Result<(), DeviceError> {
        info!("Initializing {}...", self.name);

        if self.version > MAX_STORE_VERSION {
            warn!("{}: version {} is not supported (max {})", self.name, self.version, MAX_STORE_VERSION);
            return Err(DeviceError::DeviceNotConfigured { version: self.version });
        }

        self.memory.fill(0);
        Ok(())
    }

    fn read(&self, offset: Offset) -> Result<Word, DeviceError> {
        let index = check_offset(offset, STORE_WORDS)?;
        Ok(self.memory[index])
    }

    fn write(&mut self, offset: Offset, value: Word) -> Result<(), DeviceError> {
        let index = check_offset(offset, STORE_WORDS)?;
        self.memory[index] = value;
        Ok(())
    }
}
