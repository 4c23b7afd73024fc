use thiserror::Error;

/// Failure kinds shared by devices and the board.
///
/// The board hands device errors back to its caller as-is, so one enum
/// covers both layers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    #[error("offset {offset} is outside the device ({size} words)")]
    OutOfRange { offset: u32, size: usize },
    #[error("device is read-only")]
    PermissionDenied,
    #[error("device version {version} is not supported")]
    DeviceNotConfigured { version: i32 },
    #[error("no such device: {0}")]
    NoSuchDevice(u32),
    #[error("device slot {0} is not populated")]
    EmptySlot(u32),
    #[error("board is already initialized")]
    AlreadyInitialized,
}

impl DeviceError {
    /// POSIX error number for this failure.
    pub fn errno(&self) -> i32 {
        match self {
            DeviceError::OutOfRange { .. } => libc::EINVAL,
            DeviceError::PermissionDenied => libc::EPERM,
            DeviceError::DeviceNotConfigured { .. } => libc::ENXIO,
            DeviceError::NoSuchDevice(_) => libc::ENODEV,
            DeviceError::EmptySlot(_) => libc::EFAULT,
            DeviceError::AlreadyInitialized => libc::EBUSY,
        }
    }

    /// The C library's text for [`DeviceError::errno`].
    pub fn strerror(&self) -> String {
        std::io::Error::from_raw_os_error(self.errno()).to_string()
    }
}
