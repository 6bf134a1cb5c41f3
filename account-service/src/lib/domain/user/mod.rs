pub mod errors;
pub mod identity;
pub mod models;
pub mod policy;
pub mod ports;
pub mod service;
