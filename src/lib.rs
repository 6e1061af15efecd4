// Core modules
pub mod cli;
pub mod config;
pub mod infrastructure;
pub mod models;
pub mod report;
pub mod review;
pub mod session;
