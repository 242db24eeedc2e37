//! Core engine primitives shared by the asset and scene layers

pub mod main_thread;
pub mod uuid;

pub use self::main_thread::MainThreadQueue;
pub use self::uuid::Uuid;
