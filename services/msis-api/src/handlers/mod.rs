//! HTTP request handlers for the MSIS API.

pub mod altitude;
pub mod bulk;
pub mod common;
pub mod health;
pub mod surface;
