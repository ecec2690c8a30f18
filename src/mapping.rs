//! JSON mapping import and export
//!
//! A mapping document is a single JSON object whose keys become tree keys.
//! Entries are written back in key order.

use crate::error::{Error, Result};
use crate::trie::RadixTree;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Read a JSON object into a tree
pub fn read_json<V, R>(reader: R) -> Result<RadixTree<V>>
where
    V: DeserializeOwned,
    R: Read,
{
    Ok(serde_json::from_reader(reader)?)
}

/// Write a tree as a JSON object
pub fn write_json<V, W>(tree: &RadixTree<V>, mut writer: W, pretty: bool) -> Result<()>
where
    V: Serialize,
    W: Write,
{
    if pretty {
        serde_json::to_writer_pretty(&mut writer, tree)?;
    } else {
        serde_json::to_writer(&mut writer, tree)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Load a mapping file
pub fn load_file<V: DeserializeOwned>(path: impl AsRef<Path>) -> Result<RadixTree<V>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Err(Error::InvalidFile(format!("{} is empty", path.display())));
    }

    let tree: RadixTree<V> = read_json(BufReader::new(file))?;
    debug!(path = %path.display(), keys = tree.len(), "loaded mapping");
    Ok(tree)
}

/// Save a tree to a mapping file, replacing its contents
///
/// The document is written to a temporary file in the same directory and
/// renamed over `path`, so a failed write leaves the old contents in place.
pub fn save_file<V: Serialize>(tree: &RadixTree<V>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    if let Ok(existing) = std::fs::metadata(path) {
        file.as_file().set_permissions(existing.permissions())?;
    }
    write_json(tree, BufWriter::new(file.as_file_mut()), true)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), keys = tree.len(), "saved mapping");
    Ok(())
}
