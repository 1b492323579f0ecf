pub mod app;
pub mod chooser;
pub mod cli;
pub mod shortcuts;
