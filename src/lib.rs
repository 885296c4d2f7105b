pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod middleware;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod routes;
pub mod state;
