//! Error types for BPF device operations.

use std::io;
use std::path::PathBuf;

use crate::sys::OsError;

/// Result type for BPF device operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while acquiring and configuring a BPF device.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The caller may not open the device node.
    #[error("permissions denied for: {}", .path.display())]
    PermissionDenied {
        /// The device node that refused the open.
        path: PathBuf,
    },

    /// Every device node within the scan bound was busy.
    #[error("no available BPF device found ({attempted} numbered devices busy)")]
    DeviceBusy {
        /// Number of numbered device nodes tried.
        attempted: usize,
    },

    /// The interface does not exist.
    #[error("no such device: {interface}")]
    NoSuchDevice {
        /// The interface name passed to bind.
        interface: String,
    },

    /// The interface exists but is down.
    #[error("interface is down: {interface}")]
    InterfaceDown {
        /// The interface name passed to bind.
        interface: String,
    },

    /// Neither 802.11 data-link type was accepted by the device.
    #[error("no supported 802.11 data-link type")]
    UnsupportedDataLink,

    /// Any other OS-level failure, with the operation that hit it.
    #[error("{operation}: {source}")]
    Device {
        /// What was being done (e.g. "opening /dev/bpf3").
        operation: String,
        /// The underlying OS error.
        source: io::Error,
    },
}

impl Error {
    /// Wrap an OS error with operation context.
    pub fn device(operation: impl Into<String>, err: OsError) -> Self {
        Error::Device {
            operation: operation.into(),
            source: err.into_io_error(),
        }
    }

    /// Check if this is a permission error.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::PermissionDenied { .. } => true,
            _ => matches!(self.errno(), Some(libc::EACCES | libc::EPERM)),
        }
    }

    /// Check if this is a "device busy" error.
    pub fn is_busy(&self) -> bool {
        match self {
            Self::DeviceBusy { .. } => true,
            _ => self.errno() == Some(libc::EBUSY),
        }
    }

    /// Check if this is a "not found" error (missing interface or device node).
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NoSuchDevice { .. } => true,
            _ => matches!(
                self.errno(),
                Some(libc::ENOENT | libc::ENXIO | libc::ENODEV)
            ),
        }
    }

    /// Get the errno value if this error wraps an OS error.
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::Io(err) | Self::Device { source: err, .. } => err.raw_os_error(),
            _ => None,
        }
    }
}
