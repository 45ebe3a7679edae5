pub mod events;
pub mod grade;
pub mod init;
