//! Integration tests for the content browser thumbnail cache

use cobra_editor::thumbnail_cache::{ThumbnailCache, ThumbnailCacheConfig};
use cobra_engine::project::{Project, ProjectConfig};
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn project_in(dir: &TempDir) -> Project {
    let project = Project::new(ProjectConfig::default(), dir.path());
    fs::create_dir_all(project.asset_directory()).unwrap();
    project
}

fn write_png(project: &Project, relative: &str, width: u32, height: u32) {
    let path = project.asset_absolute_path(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    image::RgbaImage::from_pixel(width, height, image::Rgba([200, 100, 50, 255]))
        .save(&path)
        .unwrap();
}

fn set_mtime(path: &Path, time: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

fn cache_with_budget(project: Project, budget: usize) -> ThumbnailCache {
    ThumbnailCache::with_config(
        project,
        ThumbnailCacheConfig {
            per_frame_budget: budget,
        },
    )
}

#[test]
fn test_first_request_queues_and_update_decodes() {
    let dir = TempDir::new().unwrap();
    let project = project_in(&dir);
    write_png(&project, "Textures/Crate.png", 8, 4);

    let mut cache = ThumbnailCache::new(project);
    assert!(cache.get_or_create_thumbnail("Textures/Crate.png").is_none());
    assert_eq!(cache.pending(), 1);

    assert_eq!(cache.on_update(), 1);
    let thumbnail = cache.get_or_create_thumbnail("Textures/Crate.png").unwrap();
    assert_eq!((thumbnail.width(), thumbnail.height()), (8, 4));
}

#[test]
fn test_unchanged_file_returns_same_image() {
    let dir = TempDir::new().unwrap();
    let project = project_in(&dir);
    write_png(&project, "Crate.png", 2, 2);

    let mut cache = ThumbnailCache::new(project);
    cache.get_or_create_thumbnail("Crate.png");
    cache.on_update();

    let first = cache.get_or_create_thumbnail("Crate.png").unwrap();
    let second = cache.get_or_create_thumbnail("Crate.png").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.pending(), 0);
    assert_eq!(cache.on_update(), 0);
    assert_eq!(cache.thumbnails_generated(), 1);
}

#[test]
fn test_modified_file_is_regenerated() {
    let dir = TempDir::new().unwrap();
    let project = project_in(&dir);
    write_png(&project, "Crate.png", 2, 2);
    let path = project.asset_absolute_path("Crate.png");
    let base = SystemTime::now() - Duration::from_secs(3600);
    set_mtime(&path, base);

    let mut cache = ThumbnailCache::new(project.clone());
    cache.get_or_create_thumbnail("Crate.png");
    cache.on_update();
    let old = cache.get_or_create_thumbnail("Crate.png").unwrap();

    write_png(&project, "Crate.png", 4, 4);
    set_mtime(&path, base + Duration::from_secs(60));

    assert!(cache.get_or_create_thumbnail("Crate.png").is_none());
    assert_eq!(cache.on_update(), 1);
    let new = cache.get_or_create_thumbnail("Crate.png").unwrap();
    assert!(!Arc::ptr_eq(&old, &new));
    assert_eq!(new.width(), 4);
    assert_eq!(cache.thumbnails_generated(), 2);
}

#[test]
fn test_budget_limits_decodes_per_update() {
    let dir = TempDir::new().unwrap();
    let project = project_in(&dir);
    for name in ["A.png", "B.png", "C.png"] {
        write_png(&project, name, 2, 2);
    }

    let mut cache = cache_with_budget(project, 2);
    for name in ["A.png", "B.png", "C.png"] {
        assert!(cache.get_or_create_thumbnail(name).is_none());
    }

    assert_eq!(cache.on_update(), 2);
    assert_eq!(cache.pending(), 1);
    assert!(cache.get_or_create_thumbnail("A.png").is_some());
    assert!(cache.get_or_create_thumbnail("B.png").is_some());
    assert!(cache.get_or_create_thumbnail("C.png").is_none());

    assert_eq!(cache.on_update(), 1);
    assert!(cache.get_or_create_thumbnail("C.png").is_some());
}

#[test]
fn test_failed_decode_does_not_consume_budget() {
    let dir = TempDir::new().unwrap();
    let project = project_in(&dir);
    fs::write(project.asset_absolute_path("Broken.png"), b"not a png").unwrap();
    write_png(&project, "Good.png", 2, 2);

    let mut cache = cache_with_budget(project, 1);
    cache.get_or_create_thumbnail("Broken.png");
    cache.get_or_create_thumbnail("Good.png");

    assert_eq!(cache.on_update(), 1);
    assert_eq!(cache.pending(), 0);
    assert!(cache.get_or_create_thumbnail("Good.png").is_some());
    assert_eq!(cache.cached_count(), 1);
}

#[test]
fn test_duplicate_requests_decode_once() {
    let dir = TempDir::new().unwrap();
    let project = project_in(&dir);
    write_png(&project, "Crate.png", 2, 2);

    let mut cache = cache_with_budget(project, 4);
    cache.get_or_create_thumbnail("Crate.png");
    cache.get_or_create_thumbnail("Crate.png");
    assert_eq!(cache.pending(), 2);

    assert_eq!(cache.on_update(), 1);
    assert_eq!(cache.pending(), 0);
    assert_eq!(cache.thumbnails_generated(), 1);
}

#[test]
fn test_clear_drops_cache_and_queue() {
    let dir = TempDir::new().unwrap();
    let project = project_in(&dir);
    write_png(&project, "A.png", 2, 2);
    write_png(&project, "B.png", 2, 2);

    let mut cache = ThumbnailCache::new(project);
    cache.get_or_create_thumbnail("A.png");
    cache.on_update();
    cache.get_or_create_thumbnail("B.png");

    cache.clear();
    assert_eq!(cache.cached_count(), 0);
    assert_eq!(cache.pending(), 0);
}
