pub mod auth;
pub mod scene;
pub mod scene_version;
pub mod screenplay;
pub mod story;
