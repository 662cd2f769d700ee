pub mod crawler;
pub mod db;
pub mod guard;
pub mod queries;
pub mod routes;
pub mod tasks;
pub mod types;
