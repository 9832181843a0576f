#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let report = byte_entropy::analyze("fuzz", Cursor::new(data)).unwrap();

    assert_eq!(report.byte_count(), data.len() as u64);
    assert_eq!(report.table(), &byte_entropy::FrequencyTable::from(data));

    let entropy = report.entropy();
    assert!(!entropy.is_nan());
    assert!(entropy.is_sign_positive());
    assert!(entropy <= byte_entropy::MAX_ENTROPY + 1e-9);
});
