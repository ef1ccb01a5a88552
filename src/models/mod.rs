pub mod communication;
pub mod question;
pub mod round;
