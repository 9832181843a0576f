#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::{io::{self, Read}, path::Path};

use log::*;

pub mod entropy;
pub mod histogram;
pub mod report;
pub mod table;

pub use entropy::{shannon_entropy, MAX_ENTROPY};
pub use histogram::{Bin, Histogram, HistogramError, HistogramOptions};
pub use report::{Report, ReportError, ReportOptions};
pub use table::{scan, scan_file, ByteTable, FrequencyTable, ScanError, BYTE_TABLE_LEN, CHUNK_SIZE};

/// Scans `reader` and computes the entropy of its content.
///
/// `source` only names the input in the report.
pub fn analyze<R: Read>(source: impl Into<String>, reader: R) -> io::Result<Report> {
    info!("Computing byte table...");
    let table = table::scan(reader)?;

    Ok(report_for(source, table))
}

/// Opens the file at `path`, scans it and computes the entropy of its content.
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<Report, ScanError> {
    let path = path.as_ref();

    info!("Computing byte table...");
    let table = table::scan_file(path)?;

    Ok(report_for(path.display().to_string(), table))
}

fn report_for(source: impl Into<String>, table: FrequencyTable) -> Report {
    info!("Computing entropy...");
    let report = Report::new(source, table);

    debug!("{} bytes, entropy : {}", report.byte_count(), report.entropy());

    report
}
