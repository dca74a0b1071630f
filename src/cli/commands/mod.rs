pub mod auth;
pub mod config;
pub mod db;
pub mod finish;
pub mod init;
pub mod log;
pub mod model;
pub mod platform;
pub mod shift;
