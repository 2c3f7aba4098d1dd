pub mod config;
pub mod database;
pub mod http_error;
pub mod model;
