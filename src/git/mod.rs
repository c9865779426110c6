pub mod diff;
pub mod history;
pub mod metadata;
pub mod repository;
pub mod store;
pub mod tree;

pub use repository::BareRepo;
pub use store::{CreateOptions, RepoStore, SharedStore};
