use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Profile;

/// Static assignment of instance ids to profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceMap(HashMap<String, Vec<String>>);

impl InstanceMap {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert<I, S>(&mut self, profile: impl Into<String>, instances: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .insert(profile.into(), instances.into_iter().map(Into::into).collect());
    }

    /// Instances listed for the profile, in file order. Empty when the profile has no entry.
    pub fn instances(&self, profile: &Profile) -> &[String] {
        self.0
            .get(profile.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_profile_to_instances_object() {
        let map: InstanceMap =
            serde_json::from_str(r#"{"dev": ["i-1", "i-2"], "staging": ["i-3"]}"#).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.instances(&Profile::from("dev")), ["i-1", "i-2"]);
        assert_eq!(map.instances(&Profile::from("staging")), ["i-3"]);
    }

    #[test]
    fn missing_profile_yields_empty_slice() {
        let map = InstanceMap::new();
        assert!(map.instances(&Profile::from("prod")).is_empty());
        assert!(map.is_empty());
    }
}
