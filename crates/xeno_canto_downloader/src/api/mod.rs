//! HTTP access to the xeno-canto API.

pub mod client;
