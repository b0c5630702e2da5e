//! The configured BPF device handle.

use std::fs::File;
use std::os::fd::{AsFd, BorrowedFd};
use std::os::unix::io::{AsRawFd, IntoRawFd, RawFd};
use std::path::{Path, PathBuf};

use zerocopy::IntoBytes;

use crate::device::Acquirer;
use crate::dlt::{DataLinkType, DltRequest};
use crate::error::{Error, Result};
use crate::sys::{BIOCSDLT, BIOCSETIF, ControlDevice, OsError};

/// Size of the zero-initialized buffer handed to `BIOCSETIF`.
///
/// Larger than `struct ifreq`; the kernel reads only the leading name
/// field and the rest is padding.
pub const IFREQ_LEN: usize = 100;

/// Longest interface name copied into the request, leaving room for NUL.
pub const MAX_INTERFACE_NAME_LEN: usize = IFREQ_LEN - 1;

/// Build the `BIOCSETIF` payload for `name`.
///
/// Names longer than [`MAX_INTERFACE_NAME_LEN`] bytes are truncated so the
/// buffer always ends with a NUL byte.
pub fn interface_request(name: &str) -> [u8; IFREQ_LEN] {
    let mut buf = [0u8; IFREQ_LEN];
    let bytes = name.as_bytes();
    let len = bytes.len().min(MAX_INTERFACE_NAME_LEN);
    buf[..len].copy_from_slice(&bytes[..len]);
    buf
}

/// An open BPF device.
///
/// Created by [`Acquirer::acquire`]; bound to an interface with
/// [`bind`](Self::bind) and switched to an 802.11 data-link type with
/// [`setup_data_link`](Self::setup_data_link). The descriptor is closed when
/// the handle is dropped.
#[derive(Debug)]
pub struct BpfHandle<D = File> {
    device: D,
    path: PathBuf,
    interface: Option<String>,
    data_link: Option<DataLinkType>,
}

impl BpfHandle<File> {
    /// Acquire a device with the default configuration, bind it to
    /// `interface` and negotiate an 802.11 data-link type.
    pub fn open(interface: &str) -> Result<Self> {
        let mut handle = Acquirer::new().acquire()?;
        handle.bind(interface)?;
        handle.setup_data_link()?;
        Ok(handle)
    }

    /// Take ownership of the underlying file.
    pub fn into_file(self) -> File {
        self.device
    }
}

impl<D: ControlDevice> BpfHandle<D> {
    /// Wrap an already-open device.
    pub fn from_device(device: D, path: impl Into<PathBuf>) -> Self {
        Self {
            device,
            path: path.into(),
            interface: None,
            data_link: None,
        }
    }

    /// The device node this handle was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The interface last bound successfully.
    pub fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }

    /// The negotiated data-link type, if negotiation has succeeded.
    pub fn data_link(&self) -> Option<DataLinkType> {
        self.data_link
    }

    /// Get a reference to the underlying device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Take ownership of the underlying device.
    pub fn into_inner(self) -> D {
        self.device
    }

    /// Attach the device to the interface `name`.
    ///
    /// Rebinding an already-bound handle is allowed.
    pub fn bind(&mut self, name: &str) -> Result<()> {
        let mut ifr = interface_request(name);
        match self.control("BIOCSETIF", BIOCSETIF, &mut ifr) {
            Ok(()) => {
                tracing::debug!(device = %self.path.display(), interface = name, "bound interface");
                self.interface = Some(name.to_string());
                Ok(())
            }
            Err(OsError::NotFound) => Err(Error::NoSuchDevice {
                interface: name.to_string(),
            }),
            Err(OsError::Down) => Err(Error::InterfaceDown {
                interface: name.to_string(),
            }),
            Err(err) => Err(Error::device(format!("BIOCSETIF {}", name), err)),
        }
    }

    /// Switch to a data-link type that provides raw 802.11 headers.
    ///
    /// Tries radiotap first and plain 802.11 second. Calling this again
    /// re-runs the whole negotiation; the recorded type only changes when a
    /// call succeeds.
    pub fn setup_data_link(&mut self) -> Result<DataLinkType> {
        self.setup_data_link_with(&DataLinkType::PREFERENCE)
    }

    /// Negotiate over `preference`, most preferred first.
    pub fn setup_data_link_with(&mut self, preference: &[DataLinkType]) -> Result<DataLinkType> {
        for &dlt in preference {
            let mut req = DltRequest::new(dlt);
            match self.control("BIOCSDLT", BIOCSDLT, req.as_mut_bytes()) {
                Ok(()) => {
                    tracing::debug!(device = %self.path.display(), dlt = req.dlt, "data-link type set");
                    self.data_link = Some(dlt);
                    return Ok(dlt);
                }
                // Expected when the driver lacks radiotap; try the next one.
                Err(err) => {
                    tracing::debug!(device = %self.path.display(), dlt = req.dlt, error = %err, "data-link type rejected")
                }
            }
        }
        Err(Error::UnsupportedDataLink)
    }

    fn control(
        &self,
        name: &'static str,
        request: libc::c_ulong,
        payload: &mut [u8],
    ) -> std::result::Result<(), OsError> {
        tracing::trace!(device = %self.path.display(), ioctl = name, "control");
        self.device.control(request, payload)
    }
}

impl<D: AsRawFd> AsRawFd for BpfHandle<D> {
    fn as_raw_fd(&self) -> RawFd {
        self.device.as_raw_fd()
    }
}

impl<D: AsFd> AsFd for BpfHandle<D> {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.device.as_fd()
    }
}

impl<D: IntoRawFd> IntoRawFd for BpfHandle<D> {
    fn into_raw_fd(self) -> RawFd {
        self.device.into_raw_fd()
    }
}
