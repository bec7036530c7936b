pub mod capture;
pub mod cli;
pub mod config;
pub mod drivers;
