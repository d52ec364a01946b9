pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod naming;
pub mod output;
pub mod report;
pub mod sweep;
