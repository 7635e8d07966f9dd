//! dotproxy application layer: ports and the query pipeline
pub mod ports;
pub mod services;
pub mod use_cases;
