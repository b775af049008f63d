pub mod backend;
pub mod config;
pub mod csrf;
pub mod errors;
pub mod flash;
pub mod form;
pub mod generation;
pub mod handlers;
pub mod models;
pub mod state;
pub mod templates_structs;
pub mod validate;
pub mod workspace;
