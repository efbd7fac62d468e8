// Terminal viewer for exploring a turbine's power curve
pub mod app;
pub mod input;
pub mod state;
pub mod ui;
