// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod item;

// Re-export so code can keep using `crate::model::Task`
pub use item::Task;
