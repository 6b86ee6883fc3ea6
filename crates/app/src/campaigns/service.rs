//! Campaigns service.

use async_trait::async_trait;
use jiff::{Zoned, civil::Date};
use mockall::automock;
use sqlx::PgPool;
use storeops::campaigns::RawCampaignRecord;

use crate::campaigns::{
    errors::CampaignsServiceError, models::CampaignFilter, repository::PgCampaignsRepository,
};

#[derive(Debug, Clone)]
pub struct PgCampaignsService {
    pool: PgPool,
    repository: PgCampaignsRepository,
}

impl PgCampaignsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            repository: PgCampaignsRepository::new(),
        }
    }
}

#[async_trait]
impl CampaignsService for PgCampaignsService {
    async fn list_campaigns(
        &self,
        filter: CampaignFilter,
        today: Date,
    ) -> Result<Vec<RawCampaignRecord>, CampaignsServiceError> {
        Ok(self
            .repository
            .list_campaigns(&self.pool, &filter, today)
            .await?)
    }

    async fn get_campaign_by_product_id(
        &self,
        product_id: &str,
    ) -> Result<RawCampaignRecord, CampaignsServiceError> {
        Ok(self
            .repository
            .get_campaign_by_product_id(&self.pool, product_id)
            .await?)
    }

    async fn list_campaign_types(&self) -> Result<Vec<String>, CampaignsServiceError> {
        Ok(self.repository.list_campaign_types(&self.pool).await?)
    }

    async fn list_segments(&self) -> Result<Vec<String>, CampaignsServiceError> {
        Ok(self.repository.list_segments(&self.pool).await?)
    }

    async fn list_brands(&self) -> Result<Vec<String>, CampaignsServiceError> {
        Ok(self.repository.list_brands(&self.pool).await?)
    }
}

#[automock]
#[async_trait]
pub trait CampaignsService: Send + Sync {
    /// Retrieve stored campaigns matching `filter`, newest live date first.
    ///
    /// `today` anchors the `active_only` window.
    async fn list_campaigns(
        &self,
        filter: CampaignFilter,
        today: Date,
    ) -> Result<Vec<RawCampaignRecord>, CampaignsServiceError>;

    /// Retrieve the most recent campaign for a product.
    async fn get_campaign_by_product_id(
        &self,
        product_id: &str,
    ) -> Result<RawCampaignRecord, CampaignsServiceError>;

    /// Distinct campaign types on record.
    async fn list_campaign_types(&self) -> Result<Vec<String>, CampaignsServiceError>;

    /// Distinct segments on record.
    async fn list_segments(&self) -> Result<Vec<String>, CampaignsServiceError>;

    /// Distinct brands on record.
    async fn list_brands(&self) -> Result<Vec<String>, CampaignsServiceError>;
}

/// Today's date in the system time zone.
#[must_use]
pub fn today() -> Date {
    Zoned::now().date()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use sqlx::query;
    use testresult::TestResult;

    use crate::test::TestDb;

    use super::*;

    struct Seed<'a> {
        issue_type: &'a str,
        product_id: &'a str,
        live_date: &'a str,
        end_date: &'a str,
        segment: Option<&'a str>,
        brand: Option<&'a str>,
        selling_price: Option<f64>,
    }

    impl Default for Seed<'_> {
        fn default() -> Self {
            Self {
                issue_type: "DOD",
                product_id: "P1",
                live_date: "01/06/2025",
                end_date: "30/06/2025",
                segment: None,
                brand: None,
                selling_price: Some(100.0),
            }
        }
    }

    async fn seed(db: &TestDb, row: Seed<'_>) -> TestResult {
        query(
            "INSERT INTO campaigns (issue_type, product_id, live_date, end_date, segment, brand, selling_price) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(row.issue_type)
        .bind(row.product_id)
        .bind(row.live_date)
        .bind(row.end_date)
        .bind(row.segment)
        .bind(row.brand)
        .bind(row.selling_price)
        .execute(db.pool())
        .await?;

        Ok(())
    }

    fn product_ids(campaigns: &[RawCampaignRecord]) -> Vec<&str> {
        campaigns.iter().map(|c| c.product_id.as_str()).collect()
    }

    #[tokio::test]
    async fn active_only_uses_an_inclusive_window() -> TestResult {
        let db = TestDb::new().await;
        let service = PgCampaignsService::new(db.pool().clone());

        seed(&db, Seed { product_id: "running", ..Seed::default() }).await?;
        seed(&db, Seed { product_id: "ends-today", end_date: "15/06/2025", ..Seed::default() }).await?;
        seed(&db, Seed { product_id: "ended", end_date: "14/06/2025", ..Seed::default() }).await?;
        seed(&db, Seed { product_id: "garbled", live_date: "June", ..Seed::default() }).await?;

        let campaigns = service
            .list_campaigns(CampaignFilter::default(), date(2025, 6, 15))
            .await?;

        let mut ids = product_ids(&campaigns);
        ids.sort_unstable();

        assert_eq!(ids, ["ends-today", "running"]);

        Ok(())
    }

    #[tokio::test]
    async fn filters_combine_and_order_by_live_date() -> TestResult {
        let db = TestDb::new().await;
        let service = PgCampaignsService::new(db.pool().clone());

        seed(&db, Seed { product_id: "old", live_date: "01/05/2025", segment: Some("men"), ..Seed::default() }).await?;
        seed(&db, Seed { product_id: "new", live_date: "10/06/2025", segment: Some("men"), ..Seed::default() }).await?;
        seed(&db, Seed { product_id: "women", segment: Some("women"), ..Seed::default() }).await?;
        seed(&db, Seed { product_id: "flash", issue_type: "FLASH_SALE", segment: Some("men"), ..Seed::default() }).await?;

        let campaigns = service
            .list_campaigns(
                CampaignFilter {
                    campaign_types: vec!["DOD".to_string()],
                    segment: Some("men".to_string()),
                    ..CampaignFilter::all()
                },
                date(2025, 6, 15),
            )
            .await?;

        assert_eq!(product_ids(&campaigns), ["new", "old"]);

        Ok(())
    }

    #[tokio::test]
    async fn date_bounds_apply_to_live_and_end_dates() -> TestResult {
        let db = TestDb::new().await;
        let service = PgCampaignsService::new(db.pool().clone());

        seed(&db, Seed { product_id: "early", live_date: "01/05/2025", end_date: "10/05/2025", ..Seed::default() }).await?;
        seed(&db, Seed { product_id: "inside", live_date: "05/06/2025", end_date: "20/06/2025", ..Seed::default() }).await?;
        seed(&db, Seed { product_id: "late", live_date: "05/06/2025", end_date: "05/07/2025", ..Seed::default() }).await?;

        let campaigns = service
            .list_campaigns(
                CampaignFilter {
                    start_date: Some(date(2025, 6, 1)),
                    end_date: Some(date(2025, 6, 30)),
                    ..CampaignFilter::all()
                },
                date(2025, 6, 15),
            )
            .await?;

        assert_eq!(product_ids(&campaigns), ["inside"]);

        Ok(())
    }

    #[tokio::test]
    async fn null_columns_read_as_defaults() -> TestResult {
        let db = TestDb::new().await;
        let service = PgCampaignsService::new(db.pool().clone());

        seed(&db, Seed { selling_price: None, ..Seed::default() }).await?;

        let campaign = service.get_campaign_by_product_id("P1").await?;

        assert_eq!(campaign.segment, "");
        assert!(campaign.selling_price.abs() < f64::EPSILON);
        assert_eq!(campaign.brand, None);
        assert_eq!(campaign.live_date.raw(), "01/06/2025");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_returns_not_found() {
        let db = TestDb::new().await;
        let service = PgCampaignsService::new(db.pool().clone());

        let result = service.get_campaign_by_product_id("missing").await;

        assert!(
            matches!(result, Err(CampaignsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn facets_are_distinct_and_sorted() -> TestResult {
        let db = TestDb::new().await;
        let service = PgCampaignsService::new(db.pool().clone());

        seed(&db, Seed { issue_type: "SPIN_WHEEL", segment: Some("women"), brand: Some("Zeta"), ..Seed::default() }).await?;
        seed(&db, Seed { issue_type: "DOD", segment: Some("men"), brand: Some("Acme"), ..Seed::default() }).await?;
        seed(&db, Seed { issue_type: "DOD", segment: Some(""), brand: None, ..Seed::default() }).await?;

        assert_eq!(service.list_campaign_types().await?, ["DOD", "SPIN_WHEEL"]);
        assert_eq!(service.list_segments().await?, ["men", "women"]);
        assert_eq!(service.list_brands().await?, ["Acme", "Zeta"]);

        Ok(())
    }
}
