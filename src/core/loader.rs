use serde_json::Value;
use std::fs;

use crate::utils::error::Result;

/// Reads one definition file and parses it as JSON. IO and parse failures
/// are local to this input; the batch layer turns them into a failure
/// outcome for just this file.
pub fn load_definition(path: &str) -> Result<Value> {
    let raw = fs::read_to_string(path)?;
    let record: Value = serde_json::from_str(&raw)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "web", "sockets": []}}"#).unwrap();

        let record = load_definition(file.path().to_str().unwrap()).unwrap();
        assert_eq!(record["name"], "web");
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();

        assert!(load_definition(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_definition("/nonexistent/definitely-not-here.json").is_err());
    }
}
