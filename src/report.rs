use std::io::{self, Write};

use crate::{entropy::shannon_entropy, histogram::{Histogram, HistogramError, HistogramOptions}, table::FrequencyTable};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Histogram(#[from] HistogramError),

    #[error("Failed to write the report: {0}")]
    Io(#[from] io::Error),
}

/// What to print alongside the entropy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Print the bare entropy value and nothing else.
    pub quiet: bool,
    pub histogram: Option<HistogramOptions>,
}

#[derive(Clone, Debug)]
pub struct Report {
    source: String,
    table: FrequencyTable,
    entropy: f64,
}

impl Report {
    pub fn new(source: impl Into<String>, table: FrequencyTable) -> Self {
        let entropy = shannon_entropy(&table);

        Self {
            source: source.into(),
            table,
            entropy,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn byte_count(&self) -> u64 {
        self.table.total()
    }

    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    pub fn write_to<W: Write>(&self, writer: &mut W, options: &ReportOptions) -> Result<(), ReportError> {
        if options.quiet {
            writeln!(writer, "{}", self.entropy)?;
            return Ok(());
        }

        writeln!(writer, "Filename: {}", self.source)?;
        writeln!(writer, "Bytes: {}", self.byte_count())?;
        writeln!(writer, "Entropy: {:.6} Sh", self.entropy)?;

        if let Some(histogram_options) = &options.histogram {
            let histogram = Histogram::new(&self.table, histogram_options.bins())?;

            writeln!(writer)?;
            histogram.render(writer, histogram_options.max_bar_length())?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod test {
    use crate::{histogram::HistogramOptions, table::FrequencyTable};

    use super::{Report, ReportOptions};

    fn write_to_string(report: &Report, options: ReportOptions) -> String {
        let mut out = Vec::new();
        report.write_to(&mut out, &options).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn report_for(bytes: &[u8]) -> Report {
        Report::new("sample.bin", FrequencyTable::from(bytes))
    }

    #[test]
    fn normal_report_rounds_to_six_decimals() {
        let report = report_for(&[0x00, 0x00, 0xFF, 0xFF]);

        assert_eq!(
            write_to_string(&report, ReportOptions::default()),
            "Filename: sample.bin\nBytes: 4\nEntropy: 1.000000 Sh\n"
        );
    }

    #[test]
    fn single_byte_report() {
        let report = report_for(&[0x41]);

        assert_eq!(report.byte_count(), 1);
        assert_eq!(
            write_to_string(&report, ReportOptions::default()),
            "Filename: sample.bin\nBytes: 1\nEntropy: 0.000000 Sh\n"
        );
    }

    #[test]
    fn every_byte_once_reports_eight_bits() {
        let bytes: Vec<u8> = (0..=u8::MAX).collect();
        let report = report_for(&bytes);

        let output = write_to_string(&report, ReportOptions::default());
        assert!(output.ends_with("Bytes: 256\nEntropy: 8.000000 Sh\n"));
    }

    #[test]
    fn empty_source_reports_zero() {
        let report = report_for(&[]);

        let options = ReportOptions {
            quiet: false,
            histogram: Some(HistogramOptions::default()),
        };
        let output = write_to_string(&report, options);

        assert!(output.contains("Bytes: 0\nEntropy: 0.000000 Sh\n"));
        assert!(!output.contains("NaN"));
    }

    #[test]
    fn quiet_report_keeps_full_precision() {
        let report = report_for(b"abbccc");

        let output = write_to_string(&report, ReportOptions { quiet: true, histogram: None });

        assert_eq!(output, format!("{}\n", report.entropy()));
        assert!(output.trim().len() > "1.459148".len());
    }

    #[test]
    fn quiet_report_omits_histogram() {
        let report = report_for(&[0x00, 0x00, 0xFF, 0xFF]);

        let options = ReportOptions {
            quiet: true,
            histogram: Some(HistogramOptions::default()),
        };

        assert_eq!(write_to_string(&report, options), "1\n");
    }

    #[test]
    fn histogram_follows_the_report() {
        let report = report_for(&[0x00, 0x00, 0xFF, 0xFF]);

        let options = ReportOptions {
            quiet: false,
            histogram: Some(HistogramOptions::new(2, 30).unwrap()),
        };
        let output = write_to_string(&report, options);

        let bar = "█".repeat(30);
        let expected = format!(
            "Filename: sample.bin\nBytes: 4\nEntropy: 1.000000 Sh\n\nValues     0 Counts {:>21}\n  0 - 127: {bar}\n128 - 255: {bar}\n",
            2
        );
        assert_eq!(output, expected);
    }
}
