pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;
pub mod upstream;
pub mod utils;
