pub mod backend;
pub mod storage;

pub use backend::HttpCheckpointAdapter;
pub use storage::LocalDocumentStore;
