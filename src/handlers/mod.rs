pub mod connection_handler;
pub mod session_handler;
