pub mod board;
pub mod config;
pub mod main_module;
pub mod shared;
