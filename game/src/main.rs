//! Headless runtime: open a project, load its start scene and run it

use cobra_engine::prelude::*;
use cobra_engine::scene::SceneSerializer;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[cfg(feature = "editor")]
use cobra_editor::{EditorSettings, EditorState};

const DEFAULT_FRAMES: u32 = 600;
const TIMESTEP: f32 = 1.0 / 60.0;

/// Script host that only traces the calls it receives
#[derive(Default)]
struct TracingScriptHost {
    created: usize,
}

impl ScriptHost for TracingScriptHost {
    fn on_runtime_start(&mut self) {
        debug!("Script runtime started");
    }

    fn on_runtime_stop(&mut self) {
        debug!(created = self.created, "Script runtime stopped");
    }

    fn on_create_entity(&mut self, entity: Uuid, class_name: &str) {
        self.created += 1;
        debug!(entity = %entity, class = class_name, "Script instance created");
    }

    fn on_update_entity(&mut self, _entity: Uuid, _class_name: &str, _ts: f32) {}
}

const DEFAULT_PROJECT: &str = "SandboxProject/Sandbox.cproj";

struct Args {
    project: Option<PathBuf>,
    frames: u32,
    editor: bool,
}

fn parse_args() -> Option<Args> {
    let mut project = None;
    let mut frames = DEFAULT_FRAMES;
    let mut editor = false;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--frames" => frames = args.next()?.parse().ok()?,
            "--editor" => editor = true,
            _ => project = Some(PathBuf::from(arg)),
        }
    }
    Some(Args {
        project,
        frames,
        editor,
    })
}

fn open_project(path: &Path) -> Option<Project> {
    match Project::load(path) {
        Ok(project) => {
            info!(project = %project.config().name, "Opened project");
            Some(project)
        }
        Err(e) => {
            error!(path = ?path, error = %e, "Failed to open project");
            None
        }
    }
}

fn load_start_scene(project: &Project) -> Option<Arc<Scene>> {
    let mut assets = EditorAssetManager::new(project.clone());
    if !assets.deserialize_asset_registry() {
        warn!("No asset registry, loading start scene from disk");
    }

    let start_scene = &project.config().start_scene;
    if let Some(handle) = assets.handle_for_path(start_scene) {
        return assets.get_scene(handle);
    }

    match SceneSerializer::deserialize(project.start_scene_path()) {
        Ok(scene) => Some(Arc::new(scene)),
        Err(e) => {
            error!(path = ?project.start_scene_path(), error = %e, "Failed to load start scene");
            None
        }
    }
}

fn run_runtime(project: &Project, frames: u32) -> ExitCode {
    let Some(start_scene) = load_start_scene(project) else {
        return ExitCode::FAILURE;
    };

    let mut scene = Scene::copy(&start_scene);
    scene.on_viewport_resize(1280, 720);
    let mut scripts = TracingScriptHost::default();
    let mut renderer = RecordingRenderer::new();

    scene.on_runtime_start(&mut scripts);
    for _ in 0..frames {
        renderer.clear();
        scene.on_update_runtime(TIMESTEP, &mut scripts, &mut renderer);
    }

    info!(
        frames,
        entities = scene.entity_count(),
        draws_last_frame = renderer.draw_count(),
        "Runtime finished"
    );
    if let Some(physics) = scene.physics_world() {
        for pose in physics.body_poses() {
            info!(entity = %pose.entity, x = pose.position.x, y = pose.position.y, angle = pose.angle, "Body");
        }
    }
    scene.on_runtime_stop(&mut scripts);
    ExitCode::SUCCESS
}

#[cfg(feature = "editor")]
fn run_editor(requested: Option<PathBuf>, frames: u32) -> ExitCode {
    let settings_path = EditorSettings::default_path();
    let mut settings = EditorSettings::load_or_default(&settings_path);
    let path = settings
        .project_to_open(requested)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT));
    let Some(project) = open_project(&path) else {
        return ExitCode::FAILURE;
    };
    settings.remember_project(&path);
    if let Err(e) = settings.save_to(&settings_path) {
        warn!(path = ?settings_path, error = %e, "Failed to save editor settings");
    }

    let mut editor = EditorState::new(project, settings);
    let mut renderer = NullRenderer;
    for _ in 0..frames {
        editor.on_update(TIMESTEP, Mat4::IDENTITY, &mut renderer);
    }
    info!(
        assets = editor.asset_manager.asset_registry().len(),
        thumbnails = editor.thumbnail_cache.thumbnails_generated(),
        "Editor session finished"
    );
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    cobra_engine::init_logging();

    let Some(args) = parse_args() else {
        eprintln!("usage: cobra_game [--frames N] [--editor] [project.cproj]");
        return ExitCode::FAILURE;
    };

    if args.editor {
        #[cfg(feature = "editor")]
        {
            return run_editor(args.project, args.frames);
        }
        #[cfg(not(feature = "editor"))]
        warn!("Built without the editor feature, running the game instead");
    }

    let path = args.project.unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT));
    let Some(project) = open_project(&path) else {
        return ExitCode::FAILURE;
    };
    info!("Starting Cobra runtime");
    run_runtime(&project, args.frames)
}
