use std::{io::{self, Write}, ops::RangeInclusive};

use crate::table::{FrequencyTable, BYTE_TABLE_LEN};

pub const DEFAULT_BINS: usize = 10;
pub const DEFAULT_MAX_BAR_LENGTH: usize = 30;

pub const BAR_GLYPH: &str = "█";

/// Width of the `"{:3} - {:3}: "` prefix printed before each bar.
const RANGE_LABEL_WIDTH: usize = 11;
const HEADER_LABEL: &str = "Values     0 Counts";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HistogramError {
    #[error("The histogram needs at least one bin.")]
    NoBins,

    #[error("The histogram can't have more than 256 bins, got {0}.")]
    TooManyBins(usize),

    #[error("The histogram bars need a length of at least one glyph.")]
    NoBarLength,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistogramOptions {
    bins: usize,
    max_bar_length: usize,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            max_bar_length: DEFAULT_MAX_BAR_LENGTH,
        }
    }
}

impl HistogramOptions {
    pub fn new(bins: usize, max_bar_length: usize) -> Result<Self, HistogramError> {
        validate_bin_count(bins)?;
        if max_bar_length == 0 {
            return Err(HistogramError::NoBarLength);
        }

        Ok(Self { bins, max_bar_length })
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn max_bar_length(&self) -> usize {
        self.max_bar_length
    }
}

fn validate_bin_count(bins: usize) -> Result<(), HistogramError> {
    match bins {
        0 => Err(HistogramError::NoBins),
        n if n > BYTE_TABLE_LEN => Err(HistogramError::TooManyBins(n)),
        _ => Ok(()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bin {
    pub range: RangeInclusive<u8>,
    pub count: u64,
}

/// Byte values grouped into contiguous bins.
///
/// Bin `i` of `n` covers `256 * i / n .. 256 * (i + 1) / n`, so bins may differ in width by one
/// when `n` doesn't divide 256.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    bins: Vec<Bin>,
}

impl Histogram {
    pub fn new(table: &FrequencyTable, bin_count: usize) -> Result<Self, HistogramError> {
        validate_bin_count(bin_count)?;

        let counts = table.counts();
        let bins = (0..bin_count)
            .map(|i| {
                let start = BYTE_TABLE_LEN * i / bin_count;
                let end = BYTE_TABLE_LEN * (i + 1) / bin_count;

                // `start < end <= 256` holds since there are at most 256 bins
                Bin {
                    range: start as u8..=(end - 1) as u8,
                    count: counts[start..end].iter().sum(),
                }
            })
            .collect();

        Ok(Self { bins })
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Length of each bin's bar, scaled so the largest bin gets `max_bar_length` glyphs.
    ///
    /// A `max_bar_length` of 0 gives empty bars.
    pub fn bar_lengths(&self, max_bar_length: usize) -> Vec<usize> {
        let max_count = self.max_count();
        if max_count == 0 {
            return vec![0; self.bins.len()];
        }

        let multiplier = max_bar_length as f64 / max_count as f64;

        self.bins
            .iter()
            .map(|bin| (bin.count as f64 * multiplier).round() as usize)
            .collect()
    }

    pub fn render<W: Write>(&self, writer: &mut W, max_bar_length: usize) -> io::Result<()> {
        // right-align the max count with the end of a full bar, keeping at least one space
        let count_width = (RANGE_LABEL_WIDTH + max_bar_length)
            .saturating_sub(HEADER_LABEL.len() + 1);
        writeln!(writer, "{HEADER_LABEL} {:>count_width$}", self.max_count())?;

        for (bin, bar_length) in self.bins.iter().zip(self.bar_lengths(max_bar_length)) {
            writeln!(
                writer,
                "{:3} - {:3}: {}",
                bin.range.start(),
                bin.range.end(),
                BAR_GLYPH.repeat(bar_length)
            )?;
        }

        Ok(())
    }
}
