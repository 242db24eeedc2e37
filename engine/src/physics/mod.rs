//! 2D physics for running scenes, backed by Rapier

pub mod world;

pub use world::{BodyPose, PhysicsWorld2D};
