//! Raw 802.11 capture setup on BSD Packet Filter devices.
//!
//! This crate opens a BPF character device, attaches it to a wireless
//! interface and switches it to a data-link type that delivers raw 802.11
//! frames, so a capture tool can read link-layer frames straight from the
//! descriptor.
//!
//! Setup happens in three steps:
//!
//! 1. [`Acquirer::acquire`] opens `/dev/bpf`, or the first free node of
//!    `/dev/bpf0`, `/dev/bpf1`, ... when the cloning device is busy or absent.
//! 2. [`BpfHandle::bind`] attaches the device to an interface (`BIOCSETIF`).
//! 3. [`BpfHandle::setup_data_link`] selects radiotap 802.11 (DLT 127), or
//!    plain 802.11 (DLT 105) when the driver has no radiotap support
//!    (`BIOCSDLT`).
//!
//! Reading frames is left to the caller; the handle exposes its descriptor
//! through [`AsRawFd`](std::os::unix::io::AsRawFd) and
//! [`AsFd`](std::os::fd::AsFd), and [`BpfHandle::data_link`] tells the
//! decoder whether frames carry a radiotap header.
//!
//! # Features
//!
//! - `serde` - `Serialize` for [`DataLinkType`]
//!
//! # Example
//!
//! ```ignore
//! use dot11bpf::{Acquirer, DataLinkType};
//!
//! let mut handle = Acquirer::new().acquire()?;
//! handle.bind("en0")?;
//!
//! match handle.setup_data_link()? {
//!     DataLinkType::Ieee80211Radio => println!("radiotap frames"),
//!     DataLinkType::Ieee80211 => println!("plain 802.11 frames"),
//! }
//! ```

pub mod device;
pub mod dlt;
pub mod error;
pub mod handle;
pub mod sys;

pub use device::{AcquireConfig, Acquirer, DEFAULT_DEVICE_PATH, DEFAULT_MAX_DEVICES, acquire};
pub use dlt::{DLT_IEEE802_11, DLT_IEEE802_11_RADIO, DataLinkType};
pub use error::{Error, Result};
pub use handle::{BpfHandle, IFREQ_LEN, MAX_INTERFACE_NAME_LEN, interface_request};
pub use sys::{BIOCSDLT, BIOCSETIF, ControlDevice, DeviceOpener, OsError, SystemOpener};
