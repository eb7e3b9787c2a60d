use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{LmError, Result};

/// Reads a whole corpus file into memory.
///
/// - The file handle is dropped before returning, on success or failure
/// - Invalid UTF-8 is reported as an unreadable corpus
pub(crate) fn read_corpus<P: AsRef<Path>>(filename: P) -> Result<String> {
	let path = filename.as_ref();
	let mut contents = String::new();
	File::open(path)
		.and_then(|mut file| file.read_to_string(&mut contents))
		.map_err(|e| LmError::unreadable(path, e))?;
	Ok(contents)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn reads_file_content() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, "line one\nline two\n").unwrap();
		assert_eq!(read_corpus(file.path()).unwrap(), "line one\nline two\n");
	}

	#[test]
	fn missing_file_is_unreadable() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("missing.txt");
		match read_corpus(&path) {
			Err(LmError::UnreadableCorpus { path: reported, .. }) => assert_eq!(reported, path),
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn invalid_utf8_is_unreadable() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(&[0x61, 0xff, 0xfe]).unwrap();
		assert!(matches!(read_corpus(file.path()), Err(LmError::UnreadableCorpus { .. })));
	}
}
