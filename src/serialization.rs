//! Persistence of fitted objects.
//!
//! Fitted transformers are plain serde data, so persisting them is a
//! `save_object` / `load_object` pair over bincode. Files start with a format
//! version so that an incompatible artifact fails loudly instead of
//! deserializing into garbage.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Version written at the start of every persisted object.
pub const FORMAT_VERSION: u32 = 1;

/// Error raised while saving or loading a persisted object.
#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("unsupported format version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
}

/// Serialize `obj` to `path`, replacing any existing file atomically.
pub fn save_object<T, P>(obj: &T, path: P) -> Result<(), SerializationError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomically(path, |w| {
        bincode::serialize_into(&mut *w, &FORMAT_VERSION)?;
        bincode::serialize_into(&mut *w, obj)?;
        Ok(())
    })
}

/// Deserialize an object previously written by [`save_object`].
pub fn load_object<T, P>(path: P) -> Result<T, SerializationError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let found: u32 = bincode::deserialize_from(&mut reader)?;
    if found != FORMAT_VERSION {
        return Err(SerializationError::Version {
            found,
            expected: FORMAT_VERSION,
        });
    }

    Ok(bincode::deserialize_from(&mut reader)?)
}

/// Write a file through a sibling temporary file that is renamed over `path`
/// once `write` succeeded and the data is flushed. On failure the temporary
/// file is removed and `path` is left untouched.
pub(crate) fn write_atomically<P, F, E>(path: P, write: F) -> Result<(), E>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> Result<(), E>,
    E: From<io::Error>,
{
    let path = path.as_ref();
    let tmp = temp_path(path);

    let written: Result<(), E> = (|| {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        write(&mut writer)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    })();

    match written.and_then(|()| fs::rename(&tmp, path).map_err(E::from)) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}
