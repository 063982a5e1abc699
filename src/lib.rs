pub mod app;
pub mod clients;
pub mod config;
pub mod pantry;
pub mod plans;
pub mod profile;
pub mod reports;
pub mod state;
