pub mod cli;
pub mod config;
pub mod employee;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod source;
