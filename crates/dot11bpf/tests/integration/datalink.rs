//! Data-link negotiation tests.

use dot11bpf::{BIOCSDLT, DataLinkType, Error, OsError};

use crate::common::{ScriptedDevice, handle};

#[test]
fn test_radiotap_accepted() {
    let mut h = handle(ScriptedDevice::accepting());
    let dlt = h.setup_data_link().unwrap();

    assert_eq!(dlt, DataLinkType::Ieee80211Radio);
    assert_eq!(h.data_link(), Some(DataLinkType::Ieee80211Radio));

    let calls = h.device().calls();
    assert_eq!(calls.len(), 1, "105 must not be attempted");
    assert_eq!(calls[0].request, BIOCSDLT);
    assert_eq!(calls[0].leading_u32(), 127);
}

#[test]
fn test_fallback_to_plain() {
    let mut h = handle(ScriptedDevice::scripted([Err(OsError::Other(libc::EINVAL))]));
    let dlt = h.setup_data_link().unwrap();

    assert_eq!(dlt, DataLinkType::Ieee80211);
    assert_eq!(h.data_link(), Some(DataLinkType::Ieee80211));

    let tags: Vec<u32> = h.device().calls().iter().map(|c| c.leading_u32()).collect();
    assert_eq!(tags, vec![127, 105]);
}

#[test]
fn test_both_rejected() {
    let device = ScriptedDevice::scripted([
        Err(OsError::Other(libc::EINVAL)),
        Err(OsError::Other(libc::EINVAL)),
    ]);
    let mut h = handle(device);
    let err = h.setup_data_link().unwrap_err();

    assert!(matches!(err, Error::UnsupportedDataLink));
    assert_eq!(err.errno(), None);
    assert_eq!(h.data_link(), None);
}

#[test]
fn test_payload_is_sixteen_bytes() {
    let mut h = handle(ScriptedDevice::accepting());
    h.setup_data_link().unwrap();

    let payload = &h.device().calls()[0].payload;
    assert_eq!(payload.len(), 16);
    assert!(payload[4..].iter().all(|&b| b == 0));
}

#[test]
fn test_renegotiation_can_downgrade() {
    let device = ScriptedDevice::accepting();
    let mut h = handle(device);
    assert_eq!(h.setup_data_link().unwrap(), DataLinkType::Ieee80211Radio);

    h.device().push(Err(OsError::Other(libc::EINVAL)));
    assert_eq!(h.setup_data_link().unwrap(), DataLinkType::Ieee80211);
    assert_eq!(h.data_link(), Some(DataLinkType::Ieee80211));
}

#[test]
fn test_failed_renegotiation_keeps_previous() {
    let mut h = handle(ScriptedDevice::accepting());
    h.setup_data_link().unwrap();

    h.device().push(Err(OsError::Other(libc::EINVAL)));
    h.device().push(Err(OsError::Other(libc::EINVAL)));
    assert!(h.setup_data_link().is_err());
    assert_eq!(h.data_link(), Some(DataLinkType::Ieee80211Radio));
}

#[test]
fn test_full_sequence() {
    let mut h = handle(ScriptedDevice::scripted([Ok(()), Err(OsError::Other(libc::EINVAL))]));
    h.bind("en0").unwrap();
    h.setup_data_link().unwrap();

    assert_eq!(h.interface(), Some("en0"));
    assert_eq!(h.data_link(), Some(DataLinkType::Ieee80211));
    assert_eq!(h.device().calls().len(), 3);
}
