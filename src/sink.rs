//! line-oriented persistence for extracted fragments
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{error::SiftError, fragment::Fragment};

/// Write one record per fragment to `path`, replacing whatever was there
///
/// Each line is the fragment's rendered html, a comma-space, then its text
/// payload, written as-is with no escaping. The buffer is flushed before a
/// successful return; the file handle is released on every exit path. A
/// failure partway through leaves the partial file in place (no rollback).
/// Writing zero fragments produces an empty file. Returns the number of
/// records written.
pub fn save<P: AsRef<Path>>(path: P, fragments: &[Fragment]) -> Result<usize, SiftError> {
    let path = path.as_ref();
    log::trace!("enter: save({}, {} fragments)", path.display(), fragments.len());

    let write_err = |source: std::io::Error| SiftError::Write {
        path: path.to_path_buf(),
        source,
    };

    // truncating create; save is a full overwrite, never an append
    let file = File::create(path).map_err(write_err)?;

    let mut writer = BufWriter::new(file);

    for fragment in fragments {
        writeln!(writer, "{}", fragment.as_record()).map_err(write_err)?;
    }

    writer.flush().map_err(write_err)?;

    log::trace!("exit: save -> {}", fragments.len());
    Ok(fragments.len())
}
