//! File loading for delimited text.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Read a file as UTF-8 text, checking for unsupported byte-order marks.
///
/// A UTF-8 byte-order mark is kept and later dropped from the header; UTF-16
/// input is rejected.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes.len() >= 2 {
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    String::from_utf8(bytes).map_err(|_| IngestError::UnsupportedEncoding {
        path: path.to_path_buf(),
        encoding: "non-UTF-8",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ingest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_text_with_bom() {
        let file = create_temp_file("\u{feff}A,B\n1,x\n2,y\n".as_bytes());
        let dataset = ingest(&read_text(file.path()).unwrap()).unwrap();

        assert_eq!(dataset.columns[0].name, "A");
        assert_eq!(dataset.profile.row_count, 2);
    }

    #[test]
    fn test_read_text_rejects_utf16() {
        let file = create_temp_file(&[0xFF, 0xFE, b'A', 0x00]);
        let result = read_text(file.path());

        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_read_text_missing() {
        let result = read_text(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(IngestError::FileRead { .. })));
    }
}
