use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

/// Append `value` to `<name>.json` as an indented object followed by a
/// newline. Repeated calls produce a stream of objects, not a JSON array.
pub fn append_json<T: Serialize + ?Sized>(name: impl AsRef<Path>, value: &T) -> Result<PathBuf> {
    let mut path = name.as_ref().as_os_str().to_owned();
    path.push(".json");
    let path = PathBuf::from(path);
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');

    file.write_all(&buf)?;
    Ok(path)
}
