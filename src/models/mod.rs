pub mod channel;
pub mod file;
pub mod user;
