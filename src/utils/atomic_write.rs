use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::errors::Result;

const TMP_SUFFIX: &str = "tmp";

/// Sibling path used while a file is being rewritten: `expenses.json.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to the temp sibling of `path`, then renames it into place.
///
/// Either `path` ends up holding `data` or it is left as it was; the temp
/// file never outlives a failed attempt.
pub fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let tmp = tmp_path(path);
    let written = write_file(&tmp, data).and_then(|()| fs::rename(&tmp, path));
    if let Err(err) = written {
        discard_tmp(&tmp);
        return Err(err.into());
    }
    Ok(())
}

fn write_file(path: &Path, data: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()
}

fn discard_tmp(tmp: &Path) {
    if !tmp.is_file() {
        return;
    }
    if let Err(err) = fs::remove_file(tmp) {
        tracing::warn!(path = %tmp.display(), error = %err, "failed to remove temp file");
    }
}
