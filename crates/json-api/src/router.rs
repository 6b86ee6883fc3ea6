//! App Router

use salvo::Router;

use crate::campaigns::{active, export, facets, index, product, summary, validate};

pub fn app_router() -> Router {
    Router::with_path("api/v1").push(
        Router::with_path("campaigns")
            .get(index::handler)
            .push(Router::with_path("active").get(active::handler))
            .push(Router::with_path("types").get(facets::types))
            .push(Router::with_path("segments").get(facets::segments))
            .push(Router::with_path("brands").get(facets::brands))
            .push(Router::with_path("summary").get(summary::handler))
            .push(Router::with_path("export").get(export::handler))
            .push(Router::with_path("validate").post(validate::handler))
            .push(Router::with_path("product/{product_id}").get(product::handler)),
    )
}
