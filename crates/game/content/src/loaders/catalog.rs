//! Level discovery.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use game_core::config::EnemyDefaults;
use game_core::{GameConfig, Level};

use crate::loaders::level::LEVEL_FILE;
use crate::loaders::{LevelDescriptor, LevelLoader, LoadResult};

/// One selectable level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelEntry {
    pub descriptor: LevelDescriptor,
}

impl LevelEntry {
    pub fn id(&self) -> &str {
        &self.descriptor.id
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn enemy_count(&self) -> usize {
        self.descriptor.enemies.len()
    }

    pub fn file_path(&self) -> PathBuf {
        self.descriptor.file_path()
    }

    /// Loads the full level, tile map included.
    pub fn load(&self) -> LoadResult<Level> {
        LevelLoader::build(&self.descriptor)
    }
}

/// Every level found under a levels directory.
///
/// # Directory Structure
///
/// ```text
/// levels/
/// ├── cave/
/// │   ├── level.json
/// │   └── cave.ron
/// └── forest/
///     ├── level.json
///     └── forest.ron
/// ```
///
/// Subdirectories without a `level.json` are ignored; unreadable ones are
/// skipped with a warning. Entries are sorted by level id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelCatalog {
    root: PathBuf,
    entries: Vec<LevelEntry>,
}

impl LevelCatalog {
    pub fn scan(root: impl Into<PathBuf>, config: &GameConfig) -> LoadResult<Self> {
        let root = root.into();
        let entries = Self::discover(&root, &config.enemy_defaults)?;
        tracing::info!(root = %root.display(), levels = entries.len(), "level catalog scanned");
        Ok(Self { root, entries })
    }

    fn discover(root: &Path, defaults: &EnemyDefaults) -> LoadResult<Vec<LevelEntry>> {
        let listing = match std::fs::read_dir(root) {
            Ok(listing) => listing,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::warn!(root = %root.display(), "levels directory not found");
                return Ok(Vec::new());
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("Failed to list levels in {}", root.display()));
            }
        };

        let mut entries = Vec::new();
        for dir_entry in listing {
            let dir = match dir_entry {
                Ok(dir_entry) => dir_entry.path(),
                Err(error) => {
                    tracing::warn!(%error, "unreadable entry in levels directory");
                    continue;
                }
            };
            if !dir.is_dir() || !dir.join(LEVEL_FILE).is_file() {
                continue;
            }

            match LevelLoader::read_descriptor(&dir, defaults) {
                Ok(descriptor) => entries.push(LevelEntry { descriptor }),
                Err(error) => {
                    tracing::warn!(
                        path = %dir.display(),
                        error = %format!("{error:#}"),
                        "level skipped"
                    );
                }
            }
        }

        entries.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(entries)
    }

    /// Re-reads the levels directory, e.g. after a roster write-back.
    pub fn rescan(&mut self, config: &GameConfig) -> LoadResult<()> {
        self.entries = Self::discover(&self.root, &config.enemy_defaults)?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[LevelEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&LevelEntry> {
        self.entries.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&LevelEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
