//! Quick scene validation utility

use cobra_engine::scene::{component_registry, SceneSerializer};
use std::{env, path::Path, process::ExitCode};

fn main() -> ExitCode {
    cobra_engine::init_logging();

    let args: Vec<String> = env::args().collect();
    let scene_path = if args.len() > 1 {
        args[1].as_str()
    } else {
        "SandboxProject/Assets/Scenes/Start.cobra"
    };

    let path = Path::new(scene_path);
    println!("Validating scene: {}", path.display());

    let scene = match SceneSerializer::deserialize(path) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("✗ Failed to load scene: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("✓ Scene '{}' loaded successfully!", scene.name());
    println!("  Entity count: {}", scene.entity_count());
    let viewport = scene.viewport();
    println!("  Viewport: {}x{}", viewport.width, viewport.height);

    for entry in component_registry().entries() {
        let count = scene
            .entities()
            .into_iter()
            .filter_map(|uuid| scene.get_entity_by_uuid(uuid))
            .filter(|&entity| (entry.has)(scene.registry(), entity))
            .count();
        if count > 0 {
            println!("  {}: {count}", entry.name);
        }
    }

    match SceneSerializer::serialize_runtime(&scene)
        .and_then(|snapshot| SceneSerializer::deserialize_runtime(&snapshot))
    {
        Ok(copy) if copy.entities() == scene.entities() => {
            println!("✓ Round trip preserved all entities");
            ExitCode::SUCCESS
        }
        Ok(_) => {
            eprintln!("✗ Round trip changed the entity set");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("✗ Round trip failed: {e}");
            ExitCode::FAILURE
        }
    }
}
