use crate::types::RelationKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error as ThisError;
use xxhash_rust::xxh3::xxh3_64;

/// Artifact format revision; bump on any layout change.
pub const MAP_FORMAT_VERSION: u32 = 1;

///
/// MapCodecError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum MapCodecError {
    #[error(
        "component map checksum mismatch: artifact says {expected:#018x}, payload hashes to {found:#018x}"
    )]
    Checksum { expected: u64, found: u64 },

    #[error("component map could not be decoded: {0}")]
    Decode(String),

    #[error("component map could not be encoded: {0}")]
    Encode(String),

    #[error("unsupported component map format version {found} (this build reads version {expected})")]
    Version { found: u32, expected: u32 },
}

///
/// ComponentMap
/// The compiled dispatch artifact: route table, navigation index and the
/// symmetric relationship graph, all in canonical key order. Equal maps
/// encode to identical bytes.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ComponentMap {
    pub routes: BTreeMap<String, String>,
    pub navigation: BTreeMap<String, BTreeSet<String>>,
    pub relations: BTreeMap<String, RelationEntry>,
}

///
/// RelationEntry
/// Both directions of the relationship graph for one class path.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RelationEntry {
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub parents: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub children: BTreeSet<String>,
}

///
/// Artifact
/// On-disk envelope wrapping the map with integrity metadata.
///

#[derive(Deserialize, Serialize)]
struct Artifact {
    version: u32,
    checksum: u64,
    map: ComponentMap,
}

impl ComponentMap {
    /// Resolve a route key to its component class path.
    #[must_use]
    pub fn resolve(&self, route_key: &str) -> Option<&str> {
        self.routes.get(route_key).map(String::as_str)
    }

    /// Classes related to `path` in the given direction. Lookups run against
    /// the symmetric closure, so a one-sided declaration is visible from both
    /// ends.
    #[must_use]
    pub fn related_to(&self, path: &str, kind: RelationKind) -> BTreeSet<String> {
        self.relations
            .get(path)
            .map(|entry| match kind {
                RelationKind::Child => entry.children.clone(),
                RelationKind::Parent => entry.parents.clone(),
            })
            .unwrap_or_default()
    }

    /// Classes surfaced under a navigation key.
    #[must_use]
    pub fn navigation_entries(&self, nav_key: &str) -> BTreeSet<String> {
        self.navigation.get(nav_key).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Encode to the on-disk artifact format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, MapCodecError> {
        let payload =
            serde_json::to_vec(self).map_err(|e| MapCodecError::Encode(e.to_string()))?;
        let artifact = Artifact {
            version: MAP_FORMAT_VERSION,
            checksum: xxh3_64(&payload),
            map: self.clone(),
        };

        let mut bytes = serde_json::to_vec_pretty(&artifact)
            .map_err(|e| MapCodecError::Encode(e.to_string()))?;
        bytes.push(b'\n');

        Ok(bytes)
    }

    /// Decode and verify an artifact produced by [`Self::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MapCodecError> {
        let artifact: Artifact =
            serde_json::from_slice(bytes).map_err(|e| MapCodecError::Decode(e.to_string()))?;

        if artifact.version != MAP_FORMAT_VERSION {
            return Err(MapCodecError::Version {
                found: artifact.version,
                expected: MAP_FORMAT_VERSION,
            });
        }

        let payload = serde_json::to_vec(&artifact.map)
            .map_err(|e| MapCodecError::Encode(e.to_string()))?;
        let found = xxh3_64(&payload);
        if found != artifact.checksum {
            return Err(MapCodecError::Checksum {
                expected: artifact.checksum,
                found,
            });
        }

        Ok(artifact.map)
    }
}
