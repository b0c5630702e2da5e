//! 802.11 data-link types and the `BIOCSDLT` request payload.

use std::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// `DLT_IEEE802_11`: 802.11 header with no radio information.
pub const DLT_IEEE802_11: u32 = 105;
/// `DLT_IEEE802_11_RADIO`: 802.11 header preceded by a radiotap header.
pub const DLT_IEEE802_11_RADIO: u32 = 127;

/// A raw 802.11 data-link type a BPF device can be switched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DataLinkType {
    /// Radiotap-wrapped 802.11 (signal strength, channel, rate, ...).
    Ieee80211Radio,
    /// Plain 802.11 headers.
    Ieee80211,
}

impl DataLinkType {
    /// Negotiation order used by [`BpfHandle::setup_data_link`](crate::BpfHandle::setup_data_link).
    pub const PREFERENCE: [DataLinkType; 2] = [DataLinkType::Ieee80211Radio, DataLinkType::Ieee80211];

    /// The numeric DLT tag.
    pub fn as_raw(&self) -> u32 {
        match self {
            DataLinkType::Ieee80211Radio => DLT_IEEE802_11_RADIO,
            DataLinkType::Ieee80211 => DLT_IEEE802_11,
        }
    }

    /// Look up a numeric DLT tag.
    pub fn from_raw(dlt: u32) -> Option<Self> {
        match dlt {
            DLT_IEEE802_11_RADIO => Some(DataLinkType::Ieee80211Radio),
            DLT_IEEE802_11 => Some(DataLinkType::Ieee80211),
            _ => None,
        }
    }

    /// The libpcap name of this type.
    pub fn name(&self) -> &'static str {
        match self {
            DataLinkType::Ieee80211Radio => "IEEE802_11_RADIO",
            DataLinkType::Ieee80211 => "IEEE802_11",
        }
    }

    /// Whether captured frames start with a radiotap header.
    pub fn has_radiotap(&self) -> bool {
        matches!(self, DataLinkType::Ieee80211Radio)
    }
}

impl fmt::Display for DataLinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_raw())
    }
}

/// Payload for `BIOCSDLT`: the tag in the leading field of a 16-byte buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub(crate) struct DltRequest {
    pub dlt: u32,
    _reserved: [u8; 12],
}

impl DltRequest {
    pub fn new(dlt: DataLinkType) -> Self {
        Self {
            dlt: dlt.as_raw(),
            ..Default::default()
        }
    }
}
