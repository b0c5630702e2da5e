//! Interface binding tests.

use dot11bpf::{BIOCSETIF, Error, IFREQ_LEN, MAX_INTERFACE_NAME_LEN, OsError};

use crate::common::{ScriptedDevice, handle};

#[test]
fn test_bind_success() {
    let mut h = handle(ScriptedDevice::accepting());
    h.bind("en0").unwrap();

    assert_eq!(h.interface(), Some("en0"));
    let calls = h.device().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].request, BIOCSETIF);
    assert_eq!(calls[0].payload.len(), IFREQ_LEN);
    assert_eq!(&calls[0].payload[..4], b"en0\0");
}

#[test]
fn test_bind_no_such_device() {
    let mut h = handle(ScriptedDevice::scripted([Err(OsError::NotFound)]));
    let err = h.bind("wlan-missing").unwrap_err();

    match err {
        Error::NoSuchDevice { ref interface } => assert_eq!(interface, "wlan-missing"),
        ref other => panic!("unexpected error: {other}"),
    }
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "no such device: wlan-missing");
    assert_eq!(h.interface(), None);
}

#[test]
fn test_bind_interface_down() {
    let mut h = handle(ScriptedDevice::scripted([Err(OsError::Down)]));
    let err = h.bind("en1").unwrap_err();

    assert!(matches!(err, Error::InterfaceDown { ref interface } if interface == "en1"));
    assert_eq!(err.to_string(), "interface is down: en1");
}

#[test]
fn test_bind_other_error_keeps_errno() {
    let mut h = handle(ScriptedDevice::scripted([Err(OsError::Other(libc::EINVAL))]));
    let err = h.bind("en0").unwrap_err();

    assert!(matches!(err, Error::Device { .. }));
    assert_eq!(err.errno(), Some(libc::EINVAL));
    assert!(err.to_string().starts_with("BIOCSETIF en0: "));
}

#[test]
fn test_bind_truncates_long_name() {
    let name = "a".repeat(MAX_INTERFACE_NAME_LEN + 20);
    let mut h = handle(ScriptedDevice::accepting());
    h.bind(&name).unwrap();

    let payload = &h.device().calls()[0].payload;
    assert_eq!(payload.len(), IFREQ_LEN);
    assert_eq!(&payload[..MAX_INTERFACE_NAME_LEN], &name.as_bytes()[..MAX_INTERFACE_NAME_LEN]);
    assert_eq!(payload[MAX_INTERFACE_NAME_LEN], 0);
}

#[test]
fn test_rebind() {
    let device = ScriptedDevice::scripted([Ok(()), Err(OsError::NotFound), Ok(())]);
    let mut h = handle(device);

    h.bind("en0").unwrap();
    assert!(h.bind("en7").is_err());
    // a failed bind leaves the previous binding in place
    assert_eq!(h.interface(), Some("en0"));

    h.bind("en1").unwrap();
    assert_eq!(h.interface(), Some("en1"));
    assert_eq!(h.device().calls().len(), 3);
}
