//! Utility functions for reading and writing files
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::debug;

use crate::{GoError, GoResult};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

fn cannot_open(path: &Path) -> GoError {
    GoError::CannotOpenFile(path.display().to_string())
}

/// Opens a file for buffered reading
///
/// gzip-compressed files are detected by their magic bytes and
/// decompressed transparently.
pub(crate) fn open_reader<P: AsRef<Path>>(path: P) -> GoResult<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|_| cannot_open(path))?;
    let mut reader = BufReader::new(file);
    let is_gzip = reader
        .fill_buf()
        .map_err(|_| cannot_open(path))?
        .starts_with(&GZIP_MAGIC);
    if is_gzip {
        debug!("Reading gzip-compressed file {}", path.display());
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}

/// Reads the full (decompressed) content of a file
pub(crate) fn read_bytes<P: AsRef<Path>>(path: P) -> GoResult<Vec<u8>> {
    let path = path.as_ref();
    let mut bytes = Vec::new();
    open_reader(path)?
        .read_to_end(&mut bytes)
        .map_err(|_| cannot_open(path))?;
    Ok(bytes)
}

/// Writes `bytes` to a file, optionally gzip-compressed
pub(crate) fn write_bytes<P: AsRef<Path>>(path: P, bytes: &[u8], compress: bool) -> GoResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|_| cannot_open(path))?;
    let writer = BufWriter::new(file);
    if compress {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        encoder.write_all(bytes).map_err(|_| cannot_open(path))?;
        encoder
            .finish()
            .and_then(|mut writer| writer.flush())
            .map_err(|_| cannot_open(path))
    } else {
        let mut writer = writer;
        writer.write_all(bytes).map_err(|_| cannot_open(path))?;
        writer.flush().map_err(|_| cannot_open(path))
    }
}
