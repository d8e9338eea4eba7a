pub mod catalog;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod format;
pub mod graph;
pub mod ranking;
pub mod types;
