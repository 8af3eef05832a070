pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod output;
pub mod render;
pub mod result;
pub mod task;
pub mod workspace;
