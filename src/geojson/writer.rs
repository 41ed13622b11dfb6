use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use super::GeoJson;

/// Serialize a GeoJSON document, compact or indented
pub fn to_json_string(value: &GeoJson, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.context("Failed to serialize GeoJSON")
}

/// Write a GeoJSON document to a file, or to stdout when `path` is `None`
///
/// The document is followed by a single newline.
///
/// # Returns
/// * Number of bytes written
pub fn write_geojson(value: &GeoJson, path: Option<&Path>, pretty: bool) -> Result<usize> {
    let text = to_json_string(value, pretty)?;

    let written = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_text(BufWriter::new(file), &text)
        }
        None => write_text(BufWriter::new(io::stdout().lock()), &text),
    };
    written.context("Failed to write GeoJSON")?;

    Ok(text.len() + 1)
}

fn write_text<W: Write>(mut writer: W, text: &str) -> io::Result<()> {
    writer.write_all(text.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Read a GeoJSON document from a file, or from stdin when `path` is `-`
pub fn read_geojson(path: &Path) -> Result<GeoJson> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read GeoJSON from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?
    };

    contents
        .parse()
        .with_context(|| format!("Failed to parse GeoJSON from {}", path.display()))
}
