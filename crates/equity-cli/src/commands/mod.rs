pub mod check;
pub mod config;
pub mod edit;
pub mod extract;
pub mod show;
