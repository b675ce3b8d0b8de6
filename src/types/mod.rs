pub mod cart;
pub mod catalog;
pub mod item;
pub mod playback_state;
pub mod session;
