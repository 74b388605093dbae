//! Common test fixtures for dem-tools tests.

use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

/// A 4x3 grid with one no-data cell.
pub const SMALL_ASC: &str = "\
ncols         4
nrows         3
xllcorner     100
yllcorner     200
cellsize      10
NODATA_value  -9999
1 2 3 4
5 -9999 7 8
9 10 11 12
";

/// Write `contents` to a temporary `.asc` file.
///
/// The file is removed when the returned handle is dropped.
pub fn write_temp_asc(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".asc")
        .tempfile()
        .expect("failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("failed to write temp file");
    file.flush().expect("failed to flush temp file");
    file
}

/// A fresh temporary directory for test outputs.
pub fn output_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_temp_asc() {
        let file = write_temp_asc(SMALL_ASC);
        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, SMALL_ASC);
        assert_eq!(file.path().extension().unwrap(), "asc");
    }
}
