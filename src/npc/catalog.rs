use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

use super::descriptor::{NpcDescriptor, NpcRole, RawNpcDescriptor};
use crate::error::ContentError;

/// Registry of every NPC the dialogue engine can talk to
#[derive(Debug, Clone)]
pub struct NpcCatalog {
    npcs: HashMap<String, NpcDescriptor>,
}

impl NpcCatalog {
    pub fn new() -> Self {
        Self {
            npcs: HashMap::new(),
        }
    }

    /// The stock village cast, used when no NPC content is on disk
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.insert(NpcDescriptor::new("marina", "Marina", NpcRole::Trader).with_shop("harbor_tackle"));
        catalog.insert(NpcDescriptor::new("old_tom", "Old Tom", NpcRole::Fisherman));
        catalog.insert(NpcDescriptor::new("elder_rowan", "Elder Rowan", NpcRole::QuestGiver));
        catalog.insert(NpcDescriptor::new("pip", "Pip", NpcRole::Generic));
        catalog
    }

    /// Load NPC descriptors from `<data_dir>/npcs/*.toml`
    ///
    /// Each file is a table of NPC ids. Entries may `extends` another id in any
    /// file; children override their parent field by field.
    pub fn load_from_directory(&mut self, data_dir: &Path) -> Result<(), ContentError> {
        let npcs_dir = data_dir.join("npcs");
        if !npcs_dir.exists() {
            warn!("NPC directory does not exist: {:?}", npcs_dir);
            return Ok(());
        }

        let mut raw_descriptors: HashMap<String, RawNpcDescriptor> = HashMap::new();
        let entries = std::fs::read_dir(&npcs_dir).map_err(|e| ContentError::io(&npcs_dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| ContentError::io(&npcs_dir, e))?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "toml") {
                let content = std::fs::read_to_string(&path).map_err(|e| ContentError::io(&path, e))?;

                let table: HashMap<String, RawNpcDescriptor> =
                    toml::from_str(&content).map_err(|e| ContentError::parse(&path, e))?;

                for (id, raw) in table {
                    if raw_descriptors.contains_key(&id) {
                        warn!("Duplicate NPC ID '{}' in {:?}, overwriting", id, path);
                    }
                    raw_descriptors.insert(id, raw);
                }
            }
        }

        info!("Loaded {} raw NPC descriptors", raw_descriptors.len());

        for id in Self::topological_sort(&raw_descriptors)? {
            let Some(raw) = raw_descriptors.get(&id) else {
                continue;
            };
            let parent = raw.extends.as_ref().and_then(|p| self.npcs.get(p));
            let resolved = raw.resolve(&id, parent);
            self.npcs.insert(id, resolved);
        }

        info!("Resolved {} NPC descriptors", self.npcs.len());
        Ok(())
    }

    /// Order ids so that every parent precedes its children
    fn topological_sort(raw: &HashMap<String, RawNpcDescriptor>) -> Result<Vec<String>, ContentError> {
        let mut sorted = Vec::new();
        let mut visited = HashSet::new();
        let mut visiting = HashSet::new();

        fn visit(
            id: &str,
            raw: &HashMap<String, RawNpcDescriptor>,
            sorted: &mut Vec<String>,
            visited: &mut HashSet<String>,
            visiting: &mut HashSet<String>,
        ) -> Result<(), ContentError> {
            if visited.contains(id) {
                return Ok(());
            }
            if !visiting.insert(id.to_string()) {
                return Err(ContentError::CircularInheritance(id.to_string()));
            }

            if let Some(parent_id) = raw.get(id).and_then(|r| r.extends.as_ref()) {
                if !raw.contains_key(parent_id) {
                    return Err(ContentError::UnknownParent {
                        id: id.to_string(),
                        parent: parent_id.clone(),
                    });
                }
                visit(parent_id, raw, sorted, visited, visiting)?;
            }

            visiting.remove(id);
            visited.insert(id.to_string());
            sorted.push(id.to_string());
            Ok(())
        }

        let mut ids: Vec<&String> = raw.keys().collect();
        ids.sort();
        for id in ids {
            visit(id, raw, &mut sorted, &mut visited, &mut visiting)?;
        }

        Ok(sorted)
    }

    pub fn insert(&mut self, descriptor: NpcDescriptor) {
        self.npcs.insert(descriptor.id.clone(), descriptor);
    }

    /// Get a descriptor by NPC id
    pub fn get(&self, id: &str) -> Option<&NpcDescriptor> {
        self.npcs.get(id)
    }

    pub fn role_of(&self, id: &str) -> NpcRole {
        self.get(id).map(|npc| npc.role).unwrap_or_default()
    }

    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.npcs.keys()
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }
}

impl Default for NpcCatalog {
    fn default() -> Self {
        Self::new()
    }
}
