//! Reading batches of passwords from newline-delimited text files.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::Error;

/// Read one password per line. Lines are trimmed and blank lines dropped; order and duplicates are
/// kept.
pub fn read_passwords(path: &Path) -> Result<Vec<String>, Error> {
    let metadata = fs::metadata(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::input_unavailable(path, "file does not exist"),
        _ => Error::input_unavailable(path, format!("cannot access file: {err}")),
    })?;
    if metadata.is_dir() {
        return Err(Error::input_unavailable(
            path,
            "path is a directory, not a file",
        ));
    }
    let contents = fs::read_to_string(path)
        .map_err(|err| Error::input_unavailable(path, format!("cannot read file: {err}")))?;

    let passwords = parse_passwords(&contents);
    if passwords.is_empty() {
        return Err(Error::input_unavailable(path, "file contains no passwords"));
    }
    debug!(count = passwords.len(), path = %path.display(), "read passwords");
    Ok(passwords)
}

fn parse_passwords(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn lines_are_trimmed_and_blanks_dropped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "  first \n\n\tsecond\r\n   \nfirst\n").unwrap();
        let passwords = read_passwords(file.path()).unwrap();
        assert_eq!(passwords, ["first", "second", "first"]);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_passwords(&dir.path().join("nope.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputUnavailable);
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_passwords(dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputUnavailable);
        assert!(err.to_string().contains("directory"));
    }

    #[test]
    fn blank_file_is_unavailable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\n   \n").unwrap();
        let err = read_passwords(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputUnavailable);
    }

    #[test]
    fn not_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, b'\n']).unwrap();
        let err = read_passwords(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputUnavailable);
    }
}
