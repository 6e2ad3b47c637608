//! Flat CSV store: header row, comma delimiter, fixed column order per schema.
//! Writes land on a sibling `.inprogress` file that then replaces the destination.

use crate::util::{create_with_backoff, inprogress_path, open_with_backoff, replace_file_atomic_backoff};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

const WRITE_BUF_BYTES: usize = 256 * 1024;
const READ_BUF_BYTES: usize = 256 * 1024;

/// Serialize `rows` under a `columns` header and replace `path`. Returns rows written.
///
/// `T`'s serde field order must match `columns`; the header is written
/// explicitly so an empty slice still yields a header-only file.
pub fn write_rows<T: Serialize>(path: &Path, columns: &[&str], rows: &[T]) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }

    let tmp = inprogress_path(path);
    let file = create_with_backoff(&tmp).with_context(|| format!("create {}", tmp.display()))?;
    let mut w = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::with_capacity(WRITE_BUF_BYTES, file));

    w.write_record(columns).with_context(|| format!("write header to {}", tmp.display()))?;
    for row in rows {
        w.serialize(row).with_context(|| format!("write row to {}", tmp.display()))?;
    }
    let mut inner = w.into_inner().map_err(|e| anyhow::anyhow!("flush {}: {}", tmp.display(), e.error()))?;
    inner.flush().with_context(|| format!("flush {}", tmp.display()))?;
    drop(inner);

    replace_file_atomic_backoff(&tmp, path)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "store written");
    Ok(rows.len())
}

/// Parse every data row of `path`. Columns are matched by header name, so
/// extra columns are ignored and column order does not matter.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = open_with_backoff(path).with_context(|| format!("open {}", path.display()))?;
    let mut r = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::with_capacity(READ_BUF_BYTES, file));

    let mut out = Vec::new();
    for (i, row) in r.deserialize::<T>().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let row = row.with_context(|| format!("{}: malformed row at line {}", path.display(), i + 2))?;
        out.push(row);
    }
    Ok(out)
}

/// Number of data rows in `path`, without decoding them. Row width is not checked.
pub fn count_rows(path: &Path) -> Result<usize> {
    let file = open_with_backoff(path).with_context(|| format!("open {}", path.display()))?;
    let mut r = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::with_capacity(READ_BUF_BYTES, file));

    let mut record = csv::ByteRecord::new();
    let mut n = 0;
    while r.read_byte_record(&mut record).with_context(|| format!("count rows of {}", path.display()))? {
        n += 1;
    }
    Ok(n)
}

/// Header names of an existing store file.
pub fn read_header(path: &Path) -> Result<Vec<String>> {
    let file = open_with_backoff(path).with_context(|| format!("open {}", path.display()))?;
    let mut r = csv::ReaderBuilder::new().has_headers(true).from_reader(BufReader::new(file));
    let headers = r.headers().with_context(|| format!("read header of {}", path.display()))?;
    Ok(headers.iter().map(str::to_string).collect())
}
