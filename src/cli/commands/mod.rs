pub mod check;
pub mod events;
pub mod generate;
pub mod init;
pub mod resolve;
