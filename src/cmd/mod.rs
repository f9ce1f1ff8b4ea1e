pub mod config;
pub mod init;
pub mod insights;
pub mod log;
pub mod show;
