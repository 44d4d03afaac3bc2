//! JSON export of crawl results

use crate::course::CourseRecord;
use crate::output::OutputResult;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Writes records as a pretty-printed JSON array
///
/// # Arguments
///
/// * `records` - Courses in crawl order
/// * `output_path` - Destination file, overwritten if present
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the file
/// * `Err(OutputError)` - Failed to create or write the file
pub fn write_json(records: &[CourseRecord], output_path: &Path) -> OutputResult<()> {
    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Reads records previously written by [`write_json`]
pub fn read_json(input_path: &Path) -> OutputResult<Vec<CourseRecord>> {
    let reader = BufReader::new(File::open(input_path)?);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputError;
    use tempfile::tempdir;

    #[test]
    fn test_json_file_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("courses.json");
        let records = vec![CourseRecord {
            title: "Intro to AI".to_string(),
            url: "https://site.test/courses/x".to_string(),
            description: "N/A".to_string(),
            curriculum: vec!["Basics".to_string()],
        }];

        write_json(&records, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[0]["title"], "Intro to AI");
        assert_eq!(value[0]["curriculum"][0], "Basics");
        assert_eq!(read_json(&path).unwrap(), records);
    }

    #[test]
    fn test_read_json_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(read_json(&path), Err(OutputError::Json(_))));
    }
}
