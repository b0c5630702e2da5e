//! BPF device acquisition.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::handle::BpfHandle;
use crate::sys::{DeviceOpener, OsError, SystemOpener};

/// The cloning device node tried before the numbered family.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/bpf";

/// Default upper bound on numbered device nodes scanned.
pub const DEFAULT_MAX_DEVICES: usize = 256;

/// Where and how far to look for a free BPF device.
#[derive(Debug, Clone)]
pub struct AcquireConfig {
    default_path: PathBuf,
    numbered_prefix: String,
    max_devices: usize,
}

impl AcquireConfig {
    /// Create a config with the standard `/dev/bpf` layout.
    pub fn new() -> Self {
        Self {
            default_path: PathBuf::from(DEFAULT_DEVICE_PATH),
            numbered_prefix: DEFAULT_DEVICE_PATH.to_string(),
            max_devices: DEFAULT_MAX_DEVICES,
        }
    }

    /// Set the node tried first.
    pub fn default_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_path = path.into();
        self
    }

    /// Set the prefix of the numbered nodes (`<prefix>0`, `<prefix>1`, ...).
    pub fn numbered_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.numbered_prefix = prefix.into();
        self
    }

    /// Set how many numbered nodes are tried before giving up.
    pub fn max_devices(mut self, max: usize) -> Self {
        self.max_devices = max;
        self
    }

    /// The path of numbered node `index`.
    pub fn device_path(&self, index: usize) -> PathBuf {
        PathBuf::from(format!("{}{}", self.numbered_prefix, index))
    }

    /// Get the node tried first.
    pub fn get_default_path(&self) -> &Path {
        &self.default_path
    }

    /// Get the scan bound.
    pub fn get_max_devices(&self) -> usize {
        self.max_devices
    }
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds and opens a free BPF device.
///
/// The default node is tried first. If it is busy or missing, the numbered
/// nodes are scanned in order and the first one that opens wins. A busy
/// node moves the scan along; a permission error or any other failure ends
/// it. The scan stops after [`AcquireConfig::max_devices`] nodes.
#[derive(Debug, Clone)]
pub struct Acquirer<O = SystemOpener> {
    config: AcquireConfig,
    opener: O,
}

impl Acquirer {
    /// Create an acquirer using the default configuration.
    pub fn new() -> Self {
        Self::with_config(AcquireConfig::new())
    }

    /// Create an acquirer with a custom configuration.
    pub fn with_config(config: AcquireConfig) -> Self {
        Self::with_opener(config, SystemOpener)
    }
}

impl Default for Acquirer {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: DeviceOpener> Acquirer<O> {
    /// Create an acquirer that opens nodes through `opener`.
    pub fn with_opener(config: AcquireConfig, opener: O) -> Self {
        Self { config, opener }
    }

    /// Get the configuration.
    pub fn config(&self) -> &AcquireConfig {
        &self.config
    }

    /// Get the opener.
    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// Open the first available device.
    pub fn acquire(&self) -> Result<BpfHandle<O::Device>> {
        let default = &self.config.default_path;
        match self.opener.open(default) {
            Ok(device) => {
                tracing::debug!(device = %default.display(), "opened BPF device");
                return Ok(BpfHandle::from_device(device, default.clone()));
            }
            // Numbered nodes share the default node's permissions.
            Err(OsError::PermissionDenied) => {
                return Err(Error::PermissionDenied {
                    path: default.clone(),
                });
            }
            Err(err) => {
                tracing::debug!(device = %default.display(), error = %err, "default device unavailable, scanning");
            }
        }

        for index in 0..self.config.max_devices {
            let path = self.config.device_path(index);
            match self.opener.open(&path) {
                Ok(device) => {
                    tracing::debug!(device = %path.display(), "opened BPF device");
                    return Ok(BpfHandle::from_device(device, path));
                }
                Err(OsError::Busy) => {
                    tracing::trace!(device = %path.display(), "device busy");
                }
                Err(OsError::PermissionDenied) => return Err(Error::PermissionDenied { path }),
                Err(err) => {
                    return Err(Error::device(format!("opening {}", path.display()), err));
                }
            }
        }

        tracing::warn!(attempted = self.config.max_devices, "all BPF devices busy");
        Err(Error::DeviceBusy {
            attempted: self.config.max_devices,
        })
    }
}

/// Open the first available device with the default configuration.
pub fn acquire() -> Result<BpfHandle> {
    Acquirer::new().acquire()
}
