//! actix-web middleware.

pub mod trace;
