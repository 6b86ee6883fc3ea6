//! Campaigns

mod errors;
mod filters;
mod handlers;
mod models;

pub(crate) use handlers::*;
