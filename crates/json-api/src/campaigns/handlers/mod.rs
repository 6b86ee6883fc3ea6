//! Campaign Handlers

pub(crate) mod active;
pub(crate) mod export;
pub(crate) mod facets;
pub(crate) mod index;
pub(crate) mod product;
pub(crate) mod summary;
pub(crate) mod validate;
