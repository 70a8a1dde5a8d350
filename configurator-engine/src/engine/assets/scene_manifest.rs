use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::reveal::groups::{GroupTable, GroupTableError, RevealGroup};

/// Decode strategy for one manifest resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Model,
    Texture,
    /// Image-based-lighting map. Must be a pre-filtered cubemap (ktx2);
    /// declare the diffuse map first, the specular map second.
    Environment,
}

/// One entry of the resource batch supplied by the host at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub id: String,
    pub kind: ResourceKind,
    pub source: String,
}

/// One reveal stage as configured: display labels plus the full set of
/// part indices visible while the stage is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupEntry {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub size: String,
    pub parts: Vec<usize>,
}

/// Complete scene manifest as a Bevy asset. Mirrors the JSON structure
/// exactly; the group table is configuration data, never code.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
pub struct SceneManifest {
    pub resources: Vec<ResourceEntry>,
    pub groups: Vec<GroupEntry>,
}

impl SceneManifest {
    /// Build the validated group table. Part-count validation happens later,
    /// once ingestion knows how many parts the model actually has.
    pub fn group_table(&self) -> Result<GroupTable, GroupTableError> {
        GroupTable::new(
            self.groups
                .iter()
                .map(|entry| RevealGroup {
                    name: entry.name.clone(),
                    icon: entry.icon.clone(),
                    size: entry.size.clone(),
                    parts: entry.parts.clone(),
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST_JSON: &str = r#"{
        "resources": [
            { "id": "environment_diffuse", "kind": "environment", "source": "environment_diffuse.ktx2" },
            { "id": "model", "kind": "model", "source": "model.glb" }
        ],
        "groups": [
            { "name": "Pallet", "icon": "fa-pallet", "size": "120x80", "parts": [0] },
            { "name": "First layer", "icon": "fa-box", "size": "60x40", "parts": [0, 1] }
        ]
    }"#;

    #[test]
    fn manifest_decodes_from_json() {
        let manifest: SceneManifest = serde_json::from_str(MANIFEST_JSON).unwrap();
        assert_eq!(manifest.resources.len(), 2);
        assert_eq!(manifest.resources[0].kind, ResourceKind::Environment);
        assert_eq!(manifest.resources[1].kind, ResourceKind::Model);
        assert_eq!(manifest.groups[1].parts, vec![0, 1]);
    }

    #[test]
    fn optional_labels_default_to_empty() {
        let manifest: SceneManifest = serde_json::from_str(
            r#"{ "resources": [], "groups": [ { "name": "Base", "parts": [0] } ] }"#,
        )
        .unwrap();
        assert_eq!(manifest.groups[0].icon, "");
        assert_eq!(manifest.groups[0].size, "");
    }

    #[test]
    fn group_table_preserves_order_and_labels() {
        let manifest: SceneManifest = serde_json::from_str(MANIFEST_JSON).unwrap();
        let table = manifest.group_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0).unwrap().name, "Pallet");
        assert_eq!(table.get(1).unwrap().size, "60x40");
    }

    #[test]
    fn empty_group_table_is_a_configuration_error() {
        let manifest: SceneManifest =
            serde_json::from_str(r#"{ "resources": [], "groups": [] }"#).unwrap();
        assert!(manifest.group_table().is_err());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result: Result<SceneManifest, _> = serde_json::from_str(
            r#"{ "resources": [ { "id": "x", "kind": "sound", "source": "x.ogg" } ], "groups": [] }"#,
        );
        assert!(result.is_err());
    }
}
