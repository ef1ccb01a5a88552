pub mod audio;
pub mod config;
pub mod controller;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod loggers;
pub mod models;
pub mod server_messages;
pub mod storage;
