//! Loading of the run's input artifacts.

use std::{fs, path::Path};

use fleetdoc_model::{DocumentDefinition, InstanceMap, Profile};
use serde_json::Value;
use tracing::debug;

use crate::error::ConfigError;

/// One profile per non-blank line, surrounding whitespace trimmed, file order kept.
pub fn read_profiles(path: &Path) -> Result<Vec<Profile>, ConfigError> {
    let text = read(path)?;
    let profiles: Vec<Profile> = parse_profiles(&text);
    debug!(path = %path.display(), count = profiles.len(), "profiles loaded");
    Ok(profiles)
}

pub fn parse_profiles(text: &str) -> Vec<Profile> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Profile::from)
        .collect()
}

/// JSON object stored under `name`.
pub fn read_document(path: &Path, name: &str) -> Result<DocumentDefinition, ConfigError> {
    let content: Value = read_json(path)?;
    DocumentDefinition::new(name, content).map_err(|source| ConfigError::Document {
        path: path.to_path_buf(),
        source,
    })
}

/// JSON object mapping profile → ordered instance ids.
pub fn read_instance_map(path: &Path) -> Result<InstanceMap, ConfigError> {
    let map: InstanceMap = read_json(path)?;
    debug!(path = %path.display(), profiles = map.len(), "instance map loaded");
    Ok(map)
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn profiles_skip_blank_lines_and_keep_duplicates() {
        let f = file("dev\n\n  staging  \n\t\ndev\n");
        let profiles = read_profiles(f.path()).unwrap();
        assert_eq!(
            profiles,
            vec![Profile::from("dev"), Profile::from("staging"), Profile::from("dev")]
        );
    }

    #[test]
    fn missing_profiles_file_is_a_read_error() {
        let err = read_profiles(Path::new("/nonexistent/inventory.ini")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn document_must_be_a_json_object() {
        let ok = file(r#"{"schemaVersion": "2.2", "mainSteps": []}"#);
        let doc = read_document(ok.path(), "Patch-Baseline").unwrap();
        assert_eq!(doc.name, "Patch-Baseline");

        let not_object = file("[1, 2]");
        assert!(matches!(
            read_document(not_object.path(), "Patch-Baseline"),
            Err(ConfigError::Document { .. })
        ));

        let broken = file("{ nope");
        assert!(matches!(
            read_document(broken.path(), "Patch-Baseline"),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn instance_map_is_read_in_order() {
        let f = file(r#"{"dev": ["i-1", "i-2"], "staging": ["i-3"]}"#);
        let map = read_instance_map(f.path()).unwrap();
        assert_eq!(map.instances(&Profile::from("dev")), ["i-1", "i-2"]);
        assert_eq!(map.instances(&Profile::from("staging")), ["i-3"]);
    }

    #[test]
    fn instance_map_rejects_wrong_shape() {
        let f = file(r#"{"dev": "i-1"}"#);
        assert!(matches!(
            read_instance_map(f.path()),
            Err(ConfigError::Json { .. })
        ));
    }
}
