pub mod check;
pub mod did;
pub mod init;
