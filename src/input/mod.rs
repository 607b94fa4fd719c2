pub mod controller;
pub mod handler;

pub use controller::Controls;
pub use handler::{InputHandler, KeyAction};
