pub mod config;
pub mod kind;
