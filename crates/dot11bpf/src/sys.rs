//! OS boundary: ioctl request codes, errno classification and the
//! control-operation primitive shared by binding and data-link negotiation.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::OwnedFd;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::Path;

// BPF ioctl constants (_IOW('B', ...) from net/bpf.h)
/// Attach the device to an interface (`struct ifreq`).
pub const BIOCSETIF: libc::c_ulong = 0x8020426c;
/// Set the data-link type (`u_int`).
pub const BIOCSDLT: libc::c_ulong = 0x80044278;

/// An OS error, classified once at the boundary.
///
/// Only the codes this crate reacts to get their own variant; everything
/// else is carried verbatim in `Other`. Each named variant corresponds to
/// exactly one errno, so the raw code is always recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsError {
    /// `ENXIO`: the named device or interface does not exist.
    NotFound,
    /// `EACCES`.
    PermissionDenied,
    /// `EBUSY`: every capture slot on the node is in use.
    Busy,
    /// `ENETDOWN`.
    Down,
    /// Any other errno.
    Other(i32),
}

impl OsError {
    /// Classify a raw errno value.
    pub fn from_raw_os_error(errno: i32) -> Self {
        match errno {
            libc::ENXIO => OsError::NotFound,
            libc::EACCES => OsError::PermissionDenied,
            libc::EBUSY => OsError::Busy,
            libc::ENETDOWN => OsError::Down,
            other => OsError::Other(other),
        }
    }

    /// Classify the calling thread's last OS error.
    pub fn last() -> Self {
        Self::from(&io::Error::last_os_error())
    }

    /// The errno this value was built from.
    pub fn raw_os_error(&self) -> i32 {
        match *self {
            OsError::NotFound => libc::ENXIO,
            OsError::PermissionDenied => libc::EACCES,
            OsError::Busy => libc::EBUSY,
            OsError::Down => libc::ENETDOWN,
            OsError::Other(errno) => errno,
        }
    }

    /// Convert back into an `io::Error` carrying the same errno.
    pub fn into_io_error(self) -> io::Error {
        io::Error::from_raw_os_error(self.raw_os_error())
    }
}

impl From<&io::Error> for OsError {
    fn from(err: &io::Error) -> Self {
        // Errors raised before reaching the kernel (e.g. a path with an
        // interior NUL) have no errno.
        OsError::from_raw_os_error(err.raw_os_error().unwrap_or(libc::EINVAL))
    }
}

impl From<OsError> for io::Error {
    fn from(err: OsError) -> Self {
        err.into_io_error()
    }
}

impl fmt::Display for OsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.into_io_error())
    }
}

impl std::error::Error for OsError {}

/// A descriptor that accepts device-control requests.
///
/// `payload` is a caller-owned, fixed-size buffer borrowed for the duration
/// of the single call; implementations must not retain it.
pub trait ControlDevice {
    /// Issue `request` with `payload` as its argument.
    fn control(&self, request: libc::c_ulong, payload: &mut [u8]) -> Result<(), OsError>;
}

impl ControlDevice for File {
    fn control(&self, request: libc::c_ulong, payload: &mut [u8]) -> Result<(), OsError> {
        ioctl_with_data(self.as_raw_fd(), request, payload)
    }
}

impl ControlDevice for OwnedFd {
    fn control(&self, request: libc::c_ulong, payload: &mut [u8]) -> Result<(), OsError> {
        ioctl_with_data(self.as_raw_fd(), request, payload)
    }
}

impl<D: ControlDevice + ?Sized> ControlDevice for &D {
    fn control(&self, request: libc::c_ulong, payload: &mut [u8]) -> Result<(), OsError> {
        (**self).control(request, payload)
    }
}

fn ioctl_with_data(fd: RawFd, request: libc::c_ulong, payload: &mut [u8]) -> Result<(), OsError> {
    tracing::trace!(fd, request = format_args!("{request:#x}"), len = payload.len(), "ioctl");
    let ret = unsafe { libc::ioctl(fd, request as _, payload.as_mut_ptr()) };
    if ret < 0 {
        return Err(OsError::last());
    }
    Ok(())
}

/// Opens device nodes on behalf of the acquirer.
pub trait DeviceOpener {
    /// The descriptor type produced by a successful open.
    type Device: ControlDevice;

    /// Open `path` for reading and writing.
    fn open(&self, path: &Path) -> Result<Self::Device, OsError>;
}

/// Opens device nodes with `open(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl DeviceOpener for SystemOpener {
    type Device = File;

    fn open(&self, path: &Path) -> Result<File, OsError> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| OsError::from(&e))
    }
}
