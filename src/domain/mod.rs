pub mod error;
pub mod models;
pub mod object_key;
pub mod ports;
