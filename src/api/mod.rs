pub mod channels;
pub mod client;
pub mod files;
pub mod users;
