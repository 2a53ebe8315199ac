pub mod config;
pub mod import;
pub mod init;
pub mod log;
pub mod occupancy;
pub mod sessions;
pub mod snapshots;
