//! Per-job skill catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::{Skill, SkillId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill lists keyed by lowercase job identifier.
///
/// Used to fill in the learned skills of a character whose snapshot does
/// not report them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub jobs: BTreeMap<String, Vec<Skill>>,
}

impl SkillCatalog {
    /// Catalog embedded in the binary.
    pub fn builtin() -> LoadResult<Self> {
        let content = include_str!("../../data/skills.ron");
        Self::from_ron_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse builtin skill catalog: {}", e))
    }

    /// Load a skill catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::from_ron_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid skill catalog {}: {}", path.display(), e))
    }

    pub fn from_ron_str(content: &str) -> LoadResult<Self> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        Ok(catalog.normalized())
    }

    fn normalized(self) -> Self {
        let jobs = self
            .jobs
            .into_iter()
            .map(|(job, skills)| (job.to_ascii_lowercase(), skills))
            .collect();
        Self { jobs }
    }

    /// Skills of `job`.
    ///
    /// Falls back to the longest catalog key contained in the job name, so
    /// `"lord_knight"` gets the `"knight"` list when it has none of its own.
    pub fn skills_for(&self, job: &str) -> &[Skill] {
        let job = job.trim().to_ascii_lowercase();
        if job.is_empty() {
            return &[];
        }
        if let Some(skills) = self.jobs.get(&job) {
            return skills;
        }
        self.jobs
            .iter()
            .filter(|(key, _)| job.contains(key.as_str()))
            .max_by_key(|(key, _)| key.len())
            .map(|(_, skills)| skills.as_slice())
            .unwrap_or(&[])
    }

    /// Any catalog entry with the given skill id.
    pub fn find(&self, id: &SkillId) -> Option<&Skill> {
        self.jobs.values().flatten().find(|skill| skill.id == *id)
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
