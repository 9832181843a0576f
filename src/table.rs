use std::{fs::File, io::{self, BufRead, BufReader, Read}, path::{Path, PathBuf}};

use log::debug;

pub const BYTE_TABLE_LEN: usize = u8::MAX as usize + 1;

/// Read size used when scanning a source.
pub const CHUNK_SIZE: usize = 256 * 1024;

pub type ByteTable = [u64; BYTE_TABLE_LEN];

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Can't open `{}`: {source}", path.display())]
    Open {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed while reading the source: {0}")]
    Read(#[source] io::Error),
}

/// Occurrences of every byte value in a source, together with the number of bytes scanned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: ByteTable,
    total: u64,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: [0; BYTE_TABLE_LEN],
            total: 0,
        }
    }
}

impl FrequencyTable {
    pub fn from_reader<R: BufRead>(reader: &mut R) -> io::Result<Self> {
        let mut table = Self::default();

        loop {
            let buf = match reader.fill_buf() {
                Ok(buf) => buf,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if buf.is_empty() {
                break;
            }

            table.add(buf);

            let n = buf.len();
            reader.consume(n);
        }

        Ok(table)
    }

    fn add(&mut self, buf: &[u8]) {
        for byte in buf {
            self.counts[*byte as usize] += 1;
        }
        self.total += buf.len() as u64;
    }

    pub fn counts(&self) -> &ByteTable {
        &self.counts
    }

    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of byte values seen at least once.
    pub fn distinct_values(&self) -> usize {
        self.counts.iter().filter(|count| **count > 0).count()
    }
}

impl From<&[u8]> for FrequencyTable {
    fn from(bytes: &[u8]) -> Self {
        let mut table = Self::default();
        table.add(bytes);
        table
    }
}

/// Scans `reader` to exhaustion in [`CHUNK_SIZE`] reads.
///
/// The reader is consumed and dropped once the scan ends, whether it succeeded or not.
pub fn scan<R: Read>(reader: R) -> io::Result<FrequencyTable> {
    let mut buf_reader = BufReader::with_capacity(CHUNK_SIZE, reader);
    let table = FrequencyTable::from_reader(&mut buf_reader)?;

    debug!(
        "Scanned {} bytes, {} distinct values",
        table.total(),
        table.distinct_values()
    );

    Ok(table)
}

pub fn scan_file<P: AsRef<Path>>(path: P) -> Result<FrequencyTable, ScanError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ScanError::Open {
        path: path.to_owned(),
        source,
    })?;

    scan(file).map_err(ScanError::Read)
}
