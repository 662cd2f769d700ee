pub mod gets;
pub mod posts;
