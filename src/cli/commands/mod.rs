mod context;
pub mod extract;
pub mod file;
pub mod init;
pub mod project;
