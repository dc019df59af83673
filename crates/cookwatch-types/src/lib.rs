//! JSON wire types for the cookwatch dashboard API.

mod api;

pub use api::*;
