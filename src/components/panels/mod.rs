mod controls;
mod info;

pub use controls::ControlPanel;
pub use info::InfoPanel;
