//! File system based rule store
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/rules/<name>.yaml   one rule document per rule
//! ```
//!
//! Writes go to a hidden temp file in the same directory which is then
//! renamed over the target, so readers never see a half-written document.

use async_trait::async_trait;
use path_absolutize::Absolutize;
use ruleforge_core::ast::Rule;
use ruleforge_parser::{ExpressionParser, RuleParser};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::fs;
use tokio::sync::RwLock;

use crate::traits::{check_version, CacheableRepository, RuleStore};
use crate::{error::RepositoryError, models::*, CacheStats, RepositoryResult};

/// Directory under the root holding rule documents
pub const RULES_DIR: &str = "rules";

const RULE_EXTENSION: &str = "yaml";

/// File system based rule store
///
/// Loads rules from YAML files on disk with optional caching. All writers go
/// through one async mutex, so the version check and the rename that follows
/// it cannot interleave with another write from this process.
pub struct FileSystemRuleStore {
    /// Root path of the repository
    root_path: PathBuf,
    /// Cache for rules
    rule_cache: RwLock<HashMap<String, CachedArtifact<Rule>>>,
    /// Cache configuration
    cache_config: Mutex<CacheConfig>,
    /// Cache statistics
    stats: Mutex<CacheStats>,
    /// Serializes writers
    write_lock: tokio::sync::Mutex<()>,
    /// Reads stored expressions back
    parser: ExpressionParser,
}

impl FileSystemRuleStore {
    /// Create a new file system rule store
    ///
    /// # Arguments
    /// * `root_path` - Existing directory; `rules/` is created on first write
    ///
    /// # Example
    /// ```no_run
    /// use ruleforge_repository::FileSystemRuleStore;
    ///
    /// let store = FileSystemRuleStore::new("repository").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(root_path: P) -> RepositoryResult<Self> {
        let path = root_path.as_ref();

        // Validate that the path exists
        if !path.is_dir() {
            return Err(RepositoryError::InvalidPath {
                path: path.to_path_buf(),
            });
        }

        // Get absolute path
        let abs_path = path
            .absolutize()
            .map_err(|e| RepositoryError::Other(format!("Failed to absolutize path: {}", e)))?
            .to_path_buf();

        tracing::debug!("Opened file system rule store at {}", abs_path.display());

        Ok(Self {
            root_path: abs_path,
            rule_cache: RwLock::new(HashMap::new()),
            cache_config: Mutex::new(CacheConfig::default()),
            stats: Mutex::new(CacheStats::default()),
            write_lock: tokio::sync::Mutex::new(()),
            parser: ExpressionParser::default(),
        })
    }

    /// Create a new file system rule store with custom cache configuration
    pub fn with_cache_config<P: AsRef<Path>>(
        root_path: P,
        config: CacheConfig,
    ) -> RepositoryResult<Self> {
        let store = Self::new(root_path)?;
        *store.config() = config;
        Ok(store)
    }

    /// Read stored expressions with `parser`
    ///
    /// Must accept everything the writing engine accepts, or rules nested
    /// deeper than the default limit cannot be loaded back.
    pub fn with_parser(mut self, parser: ExpressionParser) -> Self {
        self.parser = parser;
        self
    }

    /// Absolute root directory
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn rules_dir(&self) -> PathBuf {
        self.root_path.join(RULES_DIR)
    }

    /// Path of the document for `name`
    ///
    /// Names that could escape the rules directory or collide with temp files
    /// are rejected.
    fn rule_path(&self, name: &str) -> RepositoryResult<PathBuf> {
        let safe = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(|c: char| matches!(c, '/' | '\\' | '\0'));
        if !safe {
            return Err(RepositoryError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self
            .rules_dir()
            .join(format!("{}.{}", name, RULE_EXTENSION)))
    }

    fn config(&self) -> MutexGuard<'_, CacheConfig> {
        self.cache_config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn stats(&self) -> MutexGuard<'_, CacheStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Check cache and potentially load from cache
    async fn check_cache(&self, name: &str) -> Option<Rule> {
        if !self.config().enabled {
            return None;
        }

        let cache_read = self.rule_cache.read().await;
        if let Some(cached) = cache_read.get(name) {
            if !cached.is_expired() {
                // Cache hit
                self.stats().hits += 1;
                return Some(cached.data.clone());
            }
        }

        // Cache miss
        self.stats().misses += 1;
        None
    }

    /// Store in cache
    async fn store_in_cache(&self, rule: &Rule) {
        let (enabled, ttl, max_entries) = {
            let config = self.config();
            (config.enabled, config.default_ttl, config.max_entries)
        };

        if !enabled {
            return;
        }

        let mut cache_write = self.rule_cache.write().await;

        // A reader that loaded from disk before a concurrent write must not
        // replace the newer cached version
        if let Some(cached) = cache_write.get(&rule.name) {
            if !cached.is_expired() && cached.data.version > rule.version {
                return;
            }
        }

        if let Some(max) = max_entries {
            if !cache_write.contains_key(&rule.name) && cache_write.len() >= max {
                cache_write.retain(|_, cached| !cached.is_expired());
                if cache_write.len() >= max {
                    // Still full: drop the oldest entry
                    let oldest = cache_write
                        .iter()
                        .min_by_key(|(_, cached)| cached.cached_at)
                        .map(|(name, _)| name.clone());
                    if let Some(oldest) = oldest {
                        cache_write.remove(&oldest);
                    }
                }
            }
        }
        cache_write.insert(rule.name.clone(), CachedArtifact::new(rule.clone(), ttl));

        // Update stats
        self.stats().size = cache_write.len();
    }

    /// Read and parse a rule document, bypassing the cache
    async fn load_from_disk(&self, name: &str) -> RepositoryResult<Option<Rule>> {
        let path = self.rule_path(name)?;

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let rule = RuleParser::parse_with(&self.parser, &content).map_err(|e| {
            RepositoryError::InvalidDocument {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        if rule.name != name {
            return Err(RepositoryError::InvalidDocument {
                path: path.display().to_string(),
                message: format!("document names rule '{}'", rule.name),
            });
        }

        Ok(Some(rule))
    }

    /// Write `content` to `path` via a temp file and rename
    async fn write_atomically(&self, path: &Path, name: &str, content: &str) -> RepositoryResult<()> {
        let dir = self.rules_dir();
        fs::create_dir_all(&dir).await?;

        let tmp_path = dir.join(format!(".{}.{}.tmp", name, RULE_EXTENSION));
        fs::write(&tmp_path, content).await?;
        if let Err(e) = fs::rename(&tmp_path, path).await {
            // Leave no temp file behind
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl RuleStore for FileSystemRuleStore {
    async fn get(&self, name: &str) -> RepositoryResult<Option<Rule>> {
        // Check cache first
        if let Some(cached) = self.check_cache(name).await {
            return Ok(Some(cached));
        }

        let rule = self.load_from_disk(name).await?;
        if let Some(rule) = &rule {
            self.store_in_cache(rule).await;
        }
        Ok(rule)
    }

    async fn put(&self, rule: &Rule, expected_version: Option<u64>) -> RepositoryResult<()> {
        let path = self.rule_path(&rule.name)?;
        let content = RuleParser::to_yaml(rule)?;

        let _guard = self.write_lock.lock().await;

        // The file on disk is authoritative; the cache may be stale
        let actual = self.load_from_disk(&rule.name).await?.map(|r| r.version);
        if let Err(conflict) = check_version(&rule.name, expected_version, actual) {
            tracing::warn!("Rejected write to rule '{}': {}", rule.name, conflict);
            return Err(conflict.into());
        }

        self.write_atomically(&path, &rule.name, &content).await?;
        self.store_in_cache(rule).await;

        tracing::debug!(
            "Wrote rule '{}' version {} to {}",
            rule.name,
            rule.version,
            path.display()
        );
        Ok(())
    }

    async fn list_names(&self) -> RepositoryResult<Vec<String>> {
        let dir = self.rules_dir();

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some(RULE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !stem.starts_with('.') {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl CacheableRepository for FileSystemRuleStore {
    async fn clear_cache(&self) {
        self.rule_cache.write().await.clear();
        self.stats().size = 0;
    }

    async fn clear_cache_entry(&self, name: &str) {
        let mut cache = self.rule_cache.write().await;
        cache.remove(name);
        self.stats().size = cache.len();
    }

    fn cache_stats(&self) -> CacheStats {
        self.stats().clone()
    }

    fn set_cache_enabled(&self, enabled: bool) {
        self.config().enabled = enabled;
    }

    fn is_cache_enabled(&self) -> bool {
        self.config().enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_requires_existing_directory() {
        let err = FileSystemRuleStore::new("/definitely/not/here").err().unwrap();
        assert!(matches!(err, RepositoryError::InvalidPath { .. }));
    }

    #[test]
    fn test_rule_path_rejects_unsafe_names() {
        let dir = TempDir::new().unwrap();
        let store = FileSystemRuleStore::new(dir.path()).unwrap();

        assert!(store.rule_path("adult_us").is_ok());
        for name in ["", ".hidden", "../escape", "a/b", "a\\b"] {
            assert!(
                matches!(store.rule_path(name), Err(RepositoryError::InvalidName { .. })),
                "accepted {:?}",
                name
            );
        }
    }

    #[tokio::test]
    async fn test_get_missing_rule() {
        let dir = TempDir::new().unwrap();
        let store = FileSystemRuleStore::new(dir.path()).unwrap();
        assert_eq!(store.get("nothing").await.unwrap(), None);
        assert!(store.list_names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mismatched_document_name() {
        let dir = TempDir::new().unwrap();
        let store = FileSystemRuleStore::new(dir.path()).unwrap();

        let rule = RuleParser::parse_rule("other", "a == 1").unwrap();
        std::fs::create_dir_all(dir.path().join(RULES_DIR)).unwrap();
        std::fs::write(
            dir.path().join(RULES_DIR).join("renamed.yaml"),
            RuleParser::to_yaml(&rule).unwrap(),
        )
        .unwrap();

        let err = store.get("renamed").await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidDocument { .. }));
    }
}
