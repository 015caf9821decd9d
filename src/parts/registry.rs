use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::assets::LoadProgress;
use crate::scene::{NodeHandle, Scene};

/// Semantic role of a tracked model part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKey {
    #[serde(rename = "baseObject")]
    Base,
    #[serde(rename = "buttonObject")]
    Button,
    #[serde(rename = "mechanism1")]
    Mechanism1,
    #[serde(rename = "mechanism2")]
    Mechanism2,
    #[serde(rename = "mechanism3")]
    Mechanism3,
}

impl PartKey {
    pub const COUNT: usize = 5;

    pub const ALL: [PartKey; Self::COUNT] = [
        PartKey::Base,
        PartKey::Button,
        PartKey::Mechanism1,
        PartKey::Mechanism2,
        PartKey::Mechanism3,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PartKey::Base => "baseObject",
            PartKey::Button => "buttonObject",
            PartKey::Mechanism1 => "mechanism1",
            PartKey::Mechanism2 => "mechanism2",
            PartKey::Mechanism3 => "mechanism3",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which node wins when several carry a recognised name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The first node visited keeps the slot.
    FirstMatch,
    /// Every later match overwrites the slot.
    #[default]
    LastMatch,
}

/// One row of the name → role table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartEntry {
    pub node_name: String,
    pub part: PartKey,
}

/// Declarative table mapping asset node names to part roles.
///
/// Tracking another part is a matter of adding a row. When two rows use the
/// same node name the later row wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartTable {
    entries: Vec<PartEntry>,
}

impl PartTable {
    #[must_use]
    pub fn new(entries: Vec<PartEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn with(mut self, node_name: impl Into<String>, part: PartKey) -> Self {
        self.entries.push(PartEntry {
            node_name: node_name.into(),
            part,
        });
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[PartEntry] {
        &self.entries
    }

    fn lookup_map(&self) -> FxHashMap<&str, PartKey> {
        self.entries
            .iter()
            .map(|e| (e.node_name.as_str(), e.part))
            .collect()
    }
}

impl Default for PartTable {
    /// Node names used by the wristwatch asset.
    fn default() -> Self {
        Self::new(Vec::new())
            .with("Puterputer", PartKey::Base)
            .with("Tombol", PartKey::Button)
            .with("Mekanik1", PartKey::Mechanism1)
            .with("Mekanik2", PartKey::Mechanism2)
            .with("Mekanik3", PartKey::Mechanism3)
    }
}

/// Resolved handles for each tracked part.
///
/// Every slot may be empty; callers treat an empty slot as "do nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartRegistry {
    slots: [Option<NodeHandle>; PartKey::COUNT],
}

impl PartRegistry {
    /// Walks the subtree under `root` once, depth-first pre-order with
    /// children in order, and records every node whose name is in `table`.
    ///
    /// The same pass marks every mesh-bearing node as both casting and
    /// receiving shadows.
    pub fn populate(scene: &mut Scene, root: NodeHandle, table: &PartTable, tie_break: TieBreak) -> Self {
        let lookup = table.lookup_map();
        let mut registry = Self::default();

        for handle in scene.subtree(root) {
            if let Some(mesh) = scene.mesh_of_mut(handle) {
                mesh.cast_shadows = true;
                mesh.receive_shadows = true;
            }

            let Some(name) = scene.get_name(handle) else {
                continue;
            };
            let Some(&part) = lookup.get(name) else {
                continue;
            };

            let slot = &mut registry.slots[part.index()];
            match (tie_break, *slot) {
                (TieBreak::FirstMatch, Some(_)) => {
                    log::debug!("Ignoring duplicate node {name:?} for {part}");
                }
                (TieBreak::LastMatch, Some(_)) => {
                    log::debug!("Duplicate node {name:?} replaces earlier match for {part}");
                    *slot = Some(handle);
                }
                (_, None) => *slot = Some(handle),
            }
        }

        let missing = registry.missing();
        if missing.is_empty() {
            log::debug!("All {} parts resolved", PartKey::COUNT);
        } else {
            log::warn!("Parts not found in model: {missing:?}");
        }

        registry
    }

    #[inline]
    #[must_use]
    pub fn get(&self, part: PartKey) -> Option<NodeHandle> {
        self.slots[part.index()]
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, part: PartKey) -> bool {
        self.get(part).is_some()
    }

    /// Resolved parts in [`PartKey::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (PartKey, NodeHandle)> + '_ {
        PartKey::ALL
            .into_iter()
            .filter_map(|part| self.get(part).map(|handle| (part, handle)))
    }

    #[must_use]
    pub fn missing(&self) -> Vec<PartKey> {
        PartKey::ALL
            .into_iter()
            .filter(|&part| !self.contains(part))
            .collect()
    }
}

/// Load-to-ready lifecycle of the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryState {
    /// The model is still arriving.
    Loading(LoadProgress),
    Ready(PartRegistry),
    /// The model never arrived. The registry stays empty for the session.
    Failed(String),
}

impl RegistryState {
    #[must_use]
    pub fn registry(&self) -> Option<&PartRegistry> {
        match self {
            RegistryState::Ready(registry) => Some(registry),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, RegistryState::Ready(_))
    }
}

impl Default for RegistryState {
    fn default() -> Self {
        RegistryState::Loading(LoadProgress::default())
    }
}
