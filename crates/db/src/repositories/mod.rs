//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod scene_repo;
pub mod scene_version_repo;
pub mod session_repo;
pub mod story_repo;
pub mod user_repo;

pub use scene_repo::SceneRepo;
pub use scene_version_repo::SceneVersionRepo;
pub use session_repo::SessionRepo;
pub use story_repo::StoryRepo;
pub use user_repo::UserRepo;
