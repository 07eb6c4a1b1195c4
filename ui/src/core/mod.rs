pub mod config;
pub mod error;
pub mod platform;
pub mod storage;
