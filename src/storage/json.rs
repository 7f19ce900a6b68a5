use crate::error::Error;
use crate::storage::models::ClusterSet;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

const INDENT: &[u8] = b"    ";

/// Serialize clusters as an indented JSON array. Non-ASCII text is written as-is.
pub fn to_writer<W: Write>(clusters: &ClusterSet, writer: W) -> Result<(), Error> {
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    clusters.serialize(&mut serializer)?;
    Ok(())
}

pub fn from_reader<R: Read>(reader: R) -> Result<ClusterSet, Error> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn save(clusters: &ClusterSet, destination: &Path) -> Result<(), Error> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(destination)?);
    to_writer(clusters, &mut writer)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    debug!(
        "Saved {} clusters to {}",
        clusters.len(),
        destination.display()
    );
    Ok(())
}

pub fn load(source: &Path) -> Result<ClusterSet, Error> {
    let reader = BufReader::new(File::open(source)?);
    let clusters = from_reader(reader)?;
    debug!("Loaded {} clusters from {}", clusters.len(), source.display());
    Ok(clusters)
}
