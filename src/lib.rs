pub mod config;
pub mod error;
pub mod models;
pub mod password;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod token;
pub mod validation;
