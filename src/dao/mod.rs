/// SQLite implementation of the store traits.
pub mod sqlite;
/// Storage error types shared by every backend.
pub mod storage;
/// Store traits consumed by the service layer.
pub mod store;
