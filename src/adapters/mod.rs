// Adapters layer: concrete implementations for external systems
// (model artifact, local filesystem).

pub mod gbdt_model;
pub mod local_storage;

pub use gbdt_model::GbdtChurnModel;
pub use local_storage::LocalStorage;
