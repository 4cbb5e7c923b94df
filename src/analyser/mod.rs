pub mod gui;
pub mod logic;
pub mod render;

pub use gui::Dashboard;
