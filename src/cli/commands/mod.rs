pub mod check;
pub mod context;
pub mod generate;
pub mod init;
pub mod watch;
