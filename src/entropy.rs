use crate::table::FrequencyTable;

/// Highest possible entropy of a byte source, `log2(256)`.
pub const MAX_ENTROPY: f64 = 8.0;

/// Order-0 Shannon entropy of the table, in bits (Sh) per byte.
///
/// An empty table has an entropy of `0.0`.
pub fn shannon_entropy(table: &FrequencyTable) -> f64 {
    if table.is_empty() {
        return 0.0;
    }

    let total_count = table.total() as f64;

    let entropy: f64 = table.counts().iter()
        .filter(|count| **count > 0)
        .map(|count| {
            let p = *count as f64 / total_count;
            p * p.log2()
        })
        .sum();

    let entropy = -entropy;

    // a single symbol sums to 0.0, which negates to -0.0
    if entropy.is_sign_negative() {
        -entropy
    } else {
        entropy
    }
}
