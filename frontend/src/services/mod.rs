pub mod api;
pub mod config;
pub mod download;
pub mod logging;
pub mod notify;
pub mod storage;
