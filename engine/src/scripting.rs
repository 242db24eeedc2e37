//! Script runtime hooks called by a running scene

use crate::core::Uuid;

/// Host for entity scripts.
///
/// The scene calls `on_runtime_start`, then `on_create_entity` for every
/// scripted entity; each advanced frame calls `on_update_entity`.
pub trait ScriptHost {
    fn on_runtime_start(&mut self) {}

    fn on_runtime_stop(&mut self) {}

    fn on_create_entity(&mut self, entity: Uuid, class_name: &str);

    fn on_update_entity(&mut self, entity: Uuid, class_name: &str, ts: f32);
}

/// Script host that ignores every call
#[derive(Debug, Default, Clone, Copy)]
pub struct NullScriptHost;

impl ScriptHost for NullScriptHost {
    fn on_create_entity(&mut self, _entity: Uuid, _class_name: &str) {}

    fn on_update_entity(&mut self, _entity: Uuid, _class_name: &str, _ts: f32) {}
}
