pub mod cli;
mod panel;
pub mod utils;
