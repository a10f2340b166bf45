use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Error, Result};
use crate::resource::Identifier;

/// Extracts the single PGN entry of a downloaded archive into `dest_dir`.
///
/// The entry name is derived from the archive file name through the
/// `twic{id}g.zip` template. Other entries are ignored and the archive itself
/// is left in place.
pub fn unpack(archive_path: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let id = Identifier::from_archive_path(archive_path).ok_or_else(|| {
        Error::UnrecognizedArchiveName {
            path: archive_path.to_path_buf(),
        }
    })?;
    let entry_name = id.entry_name();
    debug!(archive = ?archive_path, entry = %entry_name, "unpacking");

    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| corrupt(archive_path, e))?;

    let mut entry = match archive.by_name(&entry_name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(Error::MissingEntry {
                path: archive_path.to_path_buf(),
                entry: entry_name,
            });
        }
        Err(e) => return Err(corrupt(archive_path, e)),
    };

    let out_path = dest_dir.join(&entry_name);
    let mut out = File::create(&out_path)?;
    if let Err(e) = std::io::copy(&mut entry, &mut out) {
        drop(out);
        if let Err(rm) = std::fs::remove_file(&out_path) {
            warn!(path = ?out_path, "could not remove partial entry: {}", rm);
        }
        return Err(Error::CorruptArchive {
            path: archive_path.to_path_buf(),
            reason: e.to_string(),
        });
    }

    Ok(out_path)
}

fn corrupt(path: &Path, err: ZipError) -> Error {
    Error::CorruptArchive {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn zip_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn extracts_only_expected_entry() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("twic920g.zip");
        std::fs::write(
            &archive,
            zip_with(&[
                ("twic920.pgn", "[Event \"Test\"]\n1. e4 e5 *\n"),
                ("readme.txt", "ignore me"),
            ]),
        )
        .unwrap();

        let out = unpack(&archive, dir.path()).unwrap();

        assert_eq!(out, dir.path().join("twic920.pgn"));
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "[Event \"Test\"]\n1. e4 e5 *\n"
        );
        assert!(!dir.path().join("readme.txt").exists());
        assert!(archive.exists());
    }

    #[test]
    fn missing_entry_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("twic921g.zip");
        std::fs::write(&archive, zip_with(&[("twic999.pgn", "*")])).unwrap();

        let err = unpack(&archive, dir.path()).unwrap_err();

        match err {
            Error::MissingEntry { entry, .. } => assert_eq!(entry, "twic921.pgn"),
            other => panic!("expected MissingEntry, got {other:?}"),
        }
        assert!(!dir.path().join("twic921.pgn").exists());
    }

    #[test]
    fn garbage_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("twic922g.zip");
        std::fs::write(&archive, b"<html>not a zip</html>").unwrap();

        let err = unpack(&archive, dir.path()).unwrap_err();

        assert!(matches!(err, Error::CorruptArchive { .. }));
    }

    #[test]
    fn foreign_archive_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("games.zip");
        std::fs::write(&archive, zip_with(&[("games.pgn", "*")])).unwrap();

        let err = unpack(&archive, dir.path()).unwrap_err();

        assert!(matches!(err, Error::UnrecognizedArchiveName { .. }));
    }
}
