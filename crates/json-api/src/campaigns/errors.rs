//! Campaign Errors

use salvo::http::StatusError;
use tracing::error;

use storeops_app::campaigns::CampaignsServiceError;

pub(crate) fn into_status_error(error: CampaignsServiceError) -> StatusError {
    match error {
        CampaignsServiceError::NotFound => StatusError::not_found().brief("Campaign not found"),
        CampaignsServiceError::Sql(source) => {
            error!("failed to query campaigns: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            into_status_error(CampaignsServiceError::NotFound).code,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn storage_errors_map_to_500() {
        assert_eq!(
            into_status_error(CampaignsServiceError::Sql(sqlx::Error::PoolClosed)).code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
