pub mod countdown;
pub mod listener;
pub mod round_controller;
pub mod selection;

pub use listener::{ChannelListener, Notification, RoundListener};
pub use round_controller::RoundController;
