#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, &[u8])| {
    let (bins, data) = input;
    let table = byte_entropy::FrequencyTable::from(data);

    let Ok(histogram) = byte_entropy::Histogram::new(&table, bins as usize) else {
        assert_eq!(bins, 0);
        return;
    };

    assert_eq!(histogram.total(), table.total());
    assert!(histogram.bar_lengths(30).iter().all(|length| *length <= 30));
});
