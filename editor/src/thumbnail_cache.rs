//! Content browser thumbnails, decoded a few per frame
//!
//! A thumbnail stays valid while the file's modification time (in whole
//! seconds) matches the one it was decoded from. Requests that miss the
//! cache are queued and decoded by [`ThumbnailCache::on_update`].

use cobra_engine::asset::texture_importer;
use cobra_engine::graphics::Texture2D;
use cobra_engine::project::Project;
use cobra_engine::utils::paths;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::UNIX_EPOCH;
use tracing::{debug, trace, warn};

const DECODABLE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailCacheConfig {
    /// Maximum successful decodes per `on_update` call
    pub per_frame_budget: usize,
}

impl Default for ThumbnailCacheConfig {
    fn default() -> Self {
        Self { per_frame_budget: 1 }
    }
}

impl From<crate::settings::ThumbnailSettings> for ThumbnailCacheConfig {
    fn from(settings: crate::settings::ThumbnailSettings) -> Self {
        Self {
            per_frame_budget: settings.per_frame_budget,
        }
    }
}

#[derive(Debug, Clone)]
struct ThumbnailImage {
    timestamp: u64,
    image: Arc<Texture2D>,
}

#[derive(Debug, Clone)]
struct ThumbnailRequest {
    absolute_path: PathBuf,
    asset_path: PathBuf,
    timestamp: u64,
}

pub struct ThumbnailCache {
    project: Project,
    config: ThumbnailCacheConfig,
    cache_file_path: PathBuf,
    cached_images: HashMap<PathBuf, ThumbnailImage>,
    queue: VecDeque<ThumbnailRequest>,
    thumbnails_generated: usize,
}

impl ThumbnailCache {
    pub fn new(project: Project) -> Self {
        Self::with_config(project, ThumbnailCacheConfig::default())
    }

    pub fn with_config(project: Project, config: ThumbnailCacheConfig) -> Self {
        let cache_file_path = project.asset_directory().join("Thumbnail.cache");
        Self {
            project,
            config,
            cache_file_path,
            cached_images: HashMap::new(),
            queue: VecDeque::new(),
            thumbnails_generated: 0,
        }
    }

    /// Cached thumbnail for an asset path relative to the asset directory.
    ///
    /// Returns `None` while the thumbnail is missing or stale; a decodable
    /// file is then queued for generation. Never decodes inline.
    pub fn get_or_create_thumbnail<P: AsRef<Path>>(&mut self, asset_path: P) -> Option<Arc<Texture2D>> {
        let asset_path = paths::normalize_path(asset_path);
        let absolute_path = self.project.asset_absolute_path(&asset_path);
        let timestamp = file_timestamp(&absolute_path)?;

        if let Some(cached) = self.cached_images.get(&asset_path) {
            if cached.timestamp == timestamp {
                return Some(Arc::clone(&cached.image));
            }
        }

        let decodable = paths::extension_lowercase(&asset_path)
            .map(|ext| DECODABLE_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false);
        if !decodable {
            return None;
        }

        trace!(path = ?asset_path, timestamp, "Queued thumbnail");
        self.queue.push_back(ThumbnailRequest {
            absolute_path,
            asset_path,
            timestamp,
        });
        None
    }

    /// Decode up to `per_frame_budget` queued thumbnails.
    ///
    /// Superseded and undecodable requests are dropped without counting
    /// against the budget. Returns the number of thumbnails generated.
    pub fn on_update(&mut self) -> usize {
        let mut generated = 0;
        while generated < self.config.per_frame_budget {
            let Some(request) = self.queue.pop_front() else {
                break;
            };

            if let Some(cached) = self.cached_images.get(&request.asset_path) {
                if cached.timestamp == request.timestamp {
                    continue;
                }
            }

            let texture = match texture_importer::load_texture_2d(&request.absolute_path) {
                Ok(texture) => texture,
                Err(e) => {
                    warn!(path = ?request.absolute_path, error = %e, "Could not generate thumbnail");
                    continue;
                }
            };

            debug!(path = ?request.asset_path, "Generated thumbnail");
            self.cached_images.insert(
                request.asset_path,
                ThumbnailImage {
                    timestamp: request.timestamp,
                    image: Arc::new(texture),
                },
            );
            generated += 1;
            self.thumbnails_generated += 1;
        }
        generated
    }

    /// Requests waiting for `on_update`
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Total thumbnails decoded since creation
    pub fn thumbnails_generated(&self) -> usize {
        self.thumbnails_generated
    }

    pub fn cached_count(&self) -> usize {
        self.cached_images.len()
    }

    /// Drop every cached thumbnail and queued request
    pub fn clear(&mut self) {
        self.cached_images.clear();
        self.queue.clear();
    }

    pub fn config(&self) -> ThumbnailCacheConfig {
        self.config
    }

    pub fn set_config(&mut self, config: ThumbnailCacheConfig) {
        self.config = config;
    }

    /// Reserved location for an on-disk cache
    pub fn cache_file_path(&self) -> &Path {
        &self.cache_file_path
    }
}

/// Modification time in whole seconds since the epoch
fn file_timestamp(path: &Path) -> Option<u64> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    Some(
        modified
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_secs())
            .unwrap_or(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cobra_engine::project::ProjectConfig;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_not_queued() {
        let dir = TempDir::new().unwrap();
        let mut cache = ThumbnailCache::new(Project::new(ProjectConfig::default(), dir.path()));
        assert!(cache.get_or_create_thumbnail("Textures/none.png").is_none());
        assert_eq!(cache.pending(), 0);
    }

    #[test]
    fn test_non_image_is_not_queued() {
        let dir = TempDir::new().unwrap();
        let project = Project::new(ProjectConfig::default(), dir.path());
        std::fs::create_dir_all(project.asset_directory()).unwrap();
        std::fs::write(project.asset_absolute_path("Start.cobra"), "{}").unwrap();

        let mut cache = ThumbnailCache::new(project);
        assert!(cache.get_or_create_thumbnail("Start.cobra").is_none());
        assert_eq!(cache.pending(), 0);
    }

    #[test]
    fn test_cache_file_path_is_reserved() {
        let project = Project::new(ProjectConfig::default(), "/work/Sandbox");
        let cache = ThumbnailCache::new(project);
        assert_eq!(
            cache.cache_file_path(),
            Path::new("/work/Sandbox/Assets/Thumbnail.cache")
        );
        assert!(!cache.cache_file_path().exists());
    }
}
