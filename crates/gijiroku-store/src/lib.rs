pub mod fs_store;
pub mod store_trait;

pub use fs_store::FsObjectStore;
pub use store_trait::ObjectStore;
