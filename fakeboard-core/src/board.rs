use fakeboard_io::{Device, DeviceError, Offset, Word};
use log::{debug, info, trace, warn};

use crate::config::BoardConfig;
use crate::roster;

/// Lifecycle of a board. There is no way back to `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardState {
    Uninitialized,
    Initialized,
    InitFailed,
}

/// A board with a fixed device roster.
///
/// # Ownership
/// The board exclusively owns its devices. It is single-threaded; callers
/// that share it across threads must serialize access themselves.
///
/// # Id validation
/// Ids are checked against the device count assigned by `initialize`
/// using the configured [`crate::IdPolicy`]. An id that passes the check
/// but has no device behind it yields [`DeviceError::EmptySlot`].
pub struct Board {
    config: BoardConfig,
    state: BoardState,
    count: u32,
    devices: Vec<Box<dyn Device>>,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            state: BoardState::Uninitialized,
            count: 0,
            devices: Vec::new(),
        }
    }

    /// Board with the default id policy and the given store version.
    pub fn with_version(store_version: i32) -> Self {
        Self::new(BoardConfig::with_version(store_version))
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    /// Device count assigned by `initialize`; zero before.
    pub fn device_count(&self) -> u32 {
        self.count
    }

    /// Builds the roster and initializes each device in id order.
    ///
    /// Stops at the first device that fails and returns its error. Devices
    /// that came up before it stay up.
    ///
    /// # Errors
    /// [`DeviceError::AlreadyInitialized`] if called a second time.
    pub fn initialize(&mut self) -> Result<(), DeviceError> {
        if self.state != BoardState::Uninitialized {
            return Err(DeviceError::AlreadyInitialized);
        }

        info!("Initializing board...");

        self.count = roster::NUM_DEVICES;
        self.devices = roster::populate(self.config.store_version);

        for device in self.devices.iter_mut() {
            if let Err(err) = device.initialize() {
                warn!("{} initialization failed: {}", device.name(), err);
                self.state = BoardState::InitFailed;
                return Err(err);
            }
        }

        self.state = BoardState::Initialized;
        Ok(())
    }

    pub fn device_name(&self, id: u32) -> Result<&str, DeviceError> {
        Ok(self.device(id)?.name())
    }

    pub fn device_size(&self, id: u32) -> Result<usize, DeviceError> {
        Ok(self.device(id)?.size())
    }

    pub fn device_get(&self, id: u32, offset: Offset) -> Result<Word, DeviceError> {
        let device = self.device(id)?;
        match device.read(offset) {
            Ok(value) => {
                trace!("get {}[{}] -> {:#x}", device.name(), offset, value);
                Ok(value)
            }
            Err(err) => {
                debug!("get {}[{}] failed: {}", device.name(), offset, err);
                Err(err)
            }
        }
    }

    pub fn device_put(&mut self, id: u32, offset: Offset, value: Word) -> Result<(), DeviceError> {
        let device = self.device_mut(id)?;
        match device.write(offset, value) {
            Ok(()) => {
                trace!("put {}[{}] <- {:#x}", device.name(), offset, value);
                Ok(())
            }
            Err(err) => {
                debug!("put {}[{}] failed: {}", device.name(), offset, err);
                Err(err)
            }
        }
    }

    fn check_id(&self, id: u32) -> Result<usize, DeviceError> {
        if !self.config.id_policy.accepts(id, self.count) {
            debug!("rejecting device id {} (count {})", id, self.count);
            return Err(DeviceError::NoSuchDevice(id));
        }
        Ok(id as usize)
    }

    fn device(&self, id: u32) -> Result<&dyn Device, DeviceError> {
        let index = self.check_id(id)?;
        match self.devices.get(index) {
            Some(device) => Ok(&**device),
            None => Err(DeviceError::EmptySlot(id)),
        }
    }

    fn device_mut(&mut self, id: u32) -> Result<&mut dyn Device, DeviceError> {
        let index = self.check_id(id)?;
        match self.devices.get_mut(index) {
            Some(device) => Ok(&mut **device),
            None => Err(DeviceError::EmptySlot(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdPolicy;
    use crate::roster::{NUM_DEVICES, ROM_ID, STORE_ID};

    fn ready_board() -> Board {
        let mut board = Board::with_version(3);
        board.initialize().unwrap();
        board
    }

    #[test]
    fn test_good_init() {
        let mut board = Board::with_version(3);
        assert_eq!(board.state(), BoardState::Uninitialized);
        assert_eq!(board.device_count(), 0);
        assert_eq!(board.initialize(), Ok(()));
        assert_eq!(board.state(), BoardState::Initialized);
        assert_eq!(board.device_count(), NUM_DEVICES);
    }

    #[test]
    fn test_bad_init() {
        let mut board = Board::with_version(12);
        assert_eq!(board.initialize(), Err(DeviceError::DeviceNotConfigured { version: 12 }));
        assert_eq!(board.state(), BoardState::InitFailed);
        // The count was assigned before the failing device.
        assert_eq!(board.device_count(), NUM_DEVICES);
        // The ROM came up before the store failed.
        assert_eq!(board.device_get(ROM_ID, 3), Ok(3));
        assert_eq!(board.device_name(STORE_ID), Ok("Beta Memory.12"));
    }

    #[test]
    fn test_initialize_is_single_use() {
        let mut board = ready_board();
        board.device_put(STORE_ID, 2, 99).unwrap();
        assert_eq!(board.initialize(), Err(DeviceError::AlreadyInitialized));
        assert_eq!(board.state(), BoardState::Initialized);
        assert_eq!(board.device_get(STORE_ID, 2), Ok(99));

        let mut failed = Board::with_version(4);
        assert!(failed.initialize().is_err());
        assert_eq!(failed.initialize(), Err(DeviceError::AlreadyInitialized));
        assert_eq!(failed.state(), BoardState::InitFailed);
    }

    #[test]
    fn test_happy_paths() {
        let mut board = ready_board();
        assert_eq!(board.device_get(ROM_ID, 3), Ok(3));

        let size = board.device_size(STORE_ID).unwrap();
        assert_eq!(size, 10);
        for offset in 0..size as u32 {
            assert_eq!(board.device_get(STORE_ID, offset), Ok(0));
        }

        assert_eq!(board.device_put(STORE_ID, 7, 0x1234_5678), Ok(()));
        assert_eq!(board.device_get(STORE_ID, 7), Ok(0x1234_5678));
        assert_eq!(board.device_get(STORE_ID, 7), board.device_get(STORE_ID, 7));
    }

    #[test]
    fn test_put_readonly() {
        let mut board = ready_board();
        assert_eq!(board.device_name(ROM_ID), Ok("Acme ROM"));
        assert_eq!(board.device_put(ROM_ID, 1, 123), Err(DeviceError::PermissionDenied));

        let size = board.device_size(ROM_ID).unwrap();
        assert_eq!(
            board.device_put(ROM_ID, size as u32 + 1, 123),
            Err(DeviceError::OutOfRange { offset: size as u32 + 1, size })
        );

        assert_eq!(board.device_name(11), Err(DeviceError::NoSuchDevice(11)));
        assert_eq!(board.device_size(12), Err(DeviceError::NoSuchDevice(12)));
        assert_eq!(board.device_get(13, 1), Err(DeviceError::NoSuchDevice(13)));
        assert_eq!(board.device_put(14, 1, 456), Err(DeviceError::NoSuchDevice(14)));
    }

    #[test]
    fn test_round_trip_on_every_offset() {
        let mut board = ready_board();
        let size = board.device_size(STORE_ID).unwrap() as u32;
        for offset in 0..size {
            let value = 0xfeed_0000 + offset as Word;
            board.device_put(STORE_ID, offset, value).unwrap();
            assert_eq!(board.device_get(STORE_ID, offset), Ok(value));
        }

        let rom_size = board.device_size(ROM_ID).unwrap() as u32;
        for offset in 0..rom_size {
            assert_eq!(board.device_put(ROM_ID, offset, 7), Err(DeviceError::PermissionDenied));
            assert_eq!(board.device_get(ROM_ID, offset), Ok(offset as Word));
        }
    }

    #[test]
    fn test_mem_errors() {
        let mut board = ready_board();
        let size = board.device_size(STORE_ID).unwrap();
        let past = size as u32 + 8;

        assert_eq!(board.device_get(6, past), Err(DeviceError::NoSuchDevice(6)));
        assert_eq!(board.device_get(STORE_ID, past), Err(DeviceError::OutOfRange { offset: past, size }));
        assert_eq!(board.device_put(6, past, 0xcafe), Err(DeviceError::NoSuchDevice(6)));
        assert_eq!(board.device_put(STORE_ID, past, 0xcafe), Err(DeviceError::OutOfRange { offset: past, size }));

        // Exactly one past the end is out of range too.
        assert!(matches!(board.device_get(STORE_ID, size as u32), Err(DeviceError::OutOfRange { .. })));
        assert!(matches!(board.device_get(ROM_ID, 5), Err(DeviceError::OutOfRange { .. })));
    }

    #[test]
    fn test_id_equal_to_count_passes_check_and_hits_empty_slot() {
        let mut board = ready_board();
        let id = board.device_count();
        assert_eq!(board.device_name(id), Err(DeviceError::EmptySlot(id)));
        assert_eq!(board.device_size(id), Err(DeviceError::EmptySlot(id)));
        assert_eq!(board.device_get(id, 0), Err(DeviceError::EmptySlot(id)));
        assert_eq!(board.device_put(id, 0, 1), Err(DeviceError::EmptySlot(id)));
        assert_eq!(board.device_name(id + 1), Err(DeviceError::NoSuchDevice(id + 1)));
    }

    #[test]
    fn test_strict_policy_rejects_id_equal_to_count() {
        let mut board = Board::new(BoardConfig { store_version: 3, id_policy: IdPolicy::Strict });
        board.initialize().unwrap();
        assert_eq!(board.device_name(NUM_DEVICES), Err(DeviceError::NoSuchDevice(NUM_DEVICES)));
        assert_eq!(board.device_put(NUM_DEVICES, 0, 1), Err(DeviceError::NoSuchDevice(NUM_DEVICES)));
        assert_eq!(board.device_name(STORE_ID), Ok("Beta Memory.3"));
    }

    #[test]
    fn test_access_before_initialize() {
        let mut board = Board::with_version(3);
        // Count is zero, so id 0 passes the inclusive check but nothing is there yet.
        assert_eq!(board.device_size(0), Err(DeviceError::EmptySlot(0)));
        assert_eq!(board.device_get(1, 0), Err(DeviceError::NoSuchDevice(1)));
        assert_eq!(board.device_put(0, 0, 1), Err(DeviceError::EmptySlot(0)));
    }
}
