//! Camera attached to scene entities

use super::ViewportSize;
use glam::Mat4;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectionType {
    Perspective,
    #[default]
    Orthographic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SceneCamera {
    pub projection_type: ProjectionType,
    /// Vertical field of view in radians
    #[serde(rename = "PerspectiveFOV")]
    pub perspective_fov: f32,
    pub perspective_near: f32,
    pub perspective_far: f32,
    pub orthographic_size: f32,
    pub orthographic_near: f32,
    pub orthographic_far: f32,
    pub aspect_ratio: f32,
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self {
            projection_type: ProjectionType::Orthographic,
            perspective_fov: 45f32.to_radians(),
            perspective_near: 0.01,
            perspective_far: 1000.0,
            orthographic_size: 10.0,
            orthographic_near: -1.0,
            orthographic_far: 1.0,
            aspect_ratio: 0.0,
        }
    }
}

impl SceneCamera {
    pub fn set_perspective(&mut self, fov: f32, near: f32, far: f32) {
        self.projection_type = ProjectionType::Perspective;
        self.perspective_fov = fov;
        self.perspective_near = near;
        self.perspective_far = far;
    }

    pub fn set_orthographic(&mut self, size: f32, near: f32, far: f32) {
        self.projection_type = ProjectionType::Orthographic;
        self.orthographic_size = size;
        self.orthographic_near = near;
        self.orthographic_far = far;
    }

    /// Update the aspect ratio; a zero height is ignored
    pub fn set_viewport_size(&mut self, viewport: ViewportSize) {
        if viewport.height == 0 {
            return;
        }
        self.aspect_ratio = viewport.width as f32 / viewport.height as f32;
    }

    pub fn projection(&self) -> Mat4 {
        // an unsized camera still yields an invertible projection
        let aspect = if self.aspect_ratio > 0.0 {
            self.aspect_ratio
        } else {
            1.0
        };
        match self.projection_type {
            ProjectionType::Perspective => Mat4::perspective_rh_gl(
                self.perspective_fov,
                aspect,
                self.perspective_near,
                self.perspective_far,
            ),
            ProjectionType::Orthographic => {
                let half_height = self.orthographic_size * 0.5;
                let half_width = half_height * aspect;
                Mat4::orthographic_rh_gl(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.orthographic_near,
                    self.orthographic_far,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_set_viewport_size_updates_aspect() {
        let mut camera = SceneCamera::default();
        camera.set_viewport_size(ViewportSize::new(1600, 900));
        assert!((camera.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);

        camera.set_viewport_size(ViewportSize::new(100, 0));
        assert!((camera.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthographic_projection_bounds() {
        let mut camera = SceneCamera::default();
        camera.set_viewport_size(ViewportSize::new(200, 100));
        let projection = camera.projection();

        // right edge of the view volume maps to +1 in clip space
        let edge = projection * Vec4::new(10.0, 5.0, 0.0, 1.0);
        assert!((edge.x - 1.0).abs() < 1e-5);
        assert!((edge.y - 1.0).abs() < 1e-5);
    }
}
