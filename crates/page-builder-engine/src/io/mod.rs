use crate::models::{BlockMap, ModelError};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid block map JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid block map: {0}")]
    Invalid(#[from] ModelError),
}

/// Read a JSON block map and check it forms a single tree under `page`
pub fn load_block_map(path: &Path) -> Result<BlockMap, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let json = fs::read_to_string(path)?;
    let map = parse_block_map(&json)?;
    log::info!("loaded {} blocks from {}", map.len(), path.display());
    Ok(map)
}

pub fn parse_block_map(json: &str) -> Result<BlockMap, IoError> {
    let map: BlockMap = serde_json::from_str(json)?;
    map.validate()?;
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockId, RichText};
    use crate::seed;
    use tempfile::TempDir;

    #[test]
    fn test_load_written_map() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("home.json");
        let map = seed::default_block_map()
            .unwrap()
            .commit_content(&"text0".into(), RichText::paragraph("edited"))
            .unwrap();
        fs::write(&path, serde_json::to_string_pretty(&map).unwrap()).unwrap();

        let loaded = load_block_map(&path).unwrap();

        assert_eq!(loaded, map);
    }

    #[test]
    fn test_missing_file() {
        let result = load_block_map(Path::new("/nonexistent/page.json"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_block_map(&path), Err(IoError::Parse(_))));
    }

    #[test]
    fn test_dangling_reference_is_rejected() {
        let json = r#"{
            "page": { "id": "page", "type": "PAGE", "children": ["gone"] }
        }"#;

        let err = parse_block_map(json).unwrap_err();
        assert!(matches!(
            err,
            IoError::Invalid(ModelError::DanglingReference { ref child, .. }) if *child == BlockId::from("gone")
        ));
        assert!(err.to_string().contains("gone"));
    }
}
