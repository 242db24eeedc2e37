//! Configuration types for the engine

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunables for the 2D physics world built when a scene starts running
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsSettings {
    /// Gravity applied to every dynamic body
    pub gravity: Vec2,
    /// Velocity solver iterations per step
    pub velocity_iterations: u32,
    /// Position correction iterations per step
    pub position_iterations: u32,
}

impl PhysicsSettings {
    pub fn new(gravity: Vec2, velocity_iterations: u32, position_iterations: u32) -> Self {
        debug!(
            gravity = ?gravity,
            velocity_iterations,
            position_iterations,
            "Creating new PhysicsSettings"
        );
        Self {
            gravity,
            velocity_iterations,
            position_iterations,
        }
    }

    /// Iterations for Rapier's single solver loop, at least one
    pub fn solver_iterations(&self) -> usize {
        ((self.velocity_iterations + self.position_iterations) as usize).max(1)
    }
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.8),
            velocity_iterations: 6,
            position_iterations: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_physics_settings() {
        let settings = PhysicsSettings::default();
        assert_eq!(settings.gravity, Vec2::new(0.0, -9.8));
        assert_eq!(settings.velocity_iterations, 6);
        assert_eq!(settings.position_iterations, 2);
    }

    #[test]
    fn test_solver_iterations_never_zero() {
        let settings = PhysicsSettings::new(Vec2::ZERO, 0, 0);
        assert_eq!(settings.solver_iterations(), 1);
        assert_eq!(PhysicsSettings::default().solver_iterations(), 8);
    }
}
