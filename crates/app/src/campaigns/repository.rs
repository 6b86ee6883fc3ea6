//! Campaigns Repository

use jiff::civil::Date;
use jiff_sqlx::Date as SqlxDate;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, query_scalar};
use storeops::campaigns::{MonetaryType, RawCampaignRecord};

use crate::campaigns::models::CampaignFilter;

const LIST_CAMPAIGNS_SQL: &str = include_str!("sql/list_campaigns.sql");
const GET_CAMPAIGN_BY_PRODUCT_ID_SQL: &str = include_str!("sql/get_campaign_by_product_id.sql");
const LIST_CAMPAIGN_TYPES_SQL: &str = include_str!("sql/list_campaign_types.sql");
const LIST_SEGMENTS_SQL: &str = include_str!("sql/list_segments.sql");
const LIST_BRANDS_SQL: &str = include_str!("sql/list_brands.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCampaignsRepository;

impl PgCampaignsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_campaigns(
        &self,
        pool: &PgPool,
        filter: &CampaignFilter,
        today: Date,
    ) -> Result<Vec<RawCampaignRecord>, sqlx::Error> {
        let rows = query_as::<Postgres, CampaignRow>(LIST_CAMPAIGNS_SQL)
            .bind(filter.campaign_types.as_slice())
            .bind(filter.segment.as_deref())
            .bind(filter.brand.as_deref())
            .bind(filter.start_date.map(SqlxDate::from))
            .bind(filter.end_date.map(SqlxDate::from))
            .bind(filter.active_only)
            .bind(SqlxDate::from(today))
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(CampaignRow::into_record).collect())
    }

    pub(crate) async fn get_campaign_by_product_id(
        &self,
        pool: &PgPool,
        product_id: &str,
    ) -> Result<RawCampaignRecord, sqlx::Error> {
        query_as::<Postgres, CampaignRow>(GET_CAMPAIGN_BY_PRODUCT_ID_SQL)
            .bind(product_id)
            .fetch_one(pool)
            .await
            .map(CampaignRow::into_record)
    }

    pub(crate) async fn list_campaign_types(&self, pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        query_scalar::<Postgres, String>(LIST_CAMPAIGN_TYPES_SQL)
            .fetch_all(pool)
            .await
    }

    pub(crate) async fn list_segments(&self, pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        query_scalar::<Postgres, String>(LIST_SEGMENTS_SQL)
            .fetch_all(pool)
            .await
    }

    pub(crate) async fn list_brands(&self, pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        query_scalar::<Postgres, String>(LIST_BRANDS_SQL)
            .fetch_all(pool)
            .await
    }
}

/// A `campaigns` row; nullable text columns read as empty strings.
struct CampaignRow(RawCampaignRecord);

impl CampaignRow {
    fn into_record(self) -> RawCampaignRecord {
        self.0
    }
}

fn text(row: &PgRow, column: &str) -> sqlx::Result<String> {
    Ok(row.try_get::<Option<String>, _>(column)?.unwrap_or_default())
}

impl<'r> FromRow<'r, PgRow> for CampaignRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let monetary_type = row
            .try_get::<Option<String>, _>("monetary_type")?
            .filter(|value| !value.trim().is_empty())
            .map(MonetaryType::from);

        Ok(Self(RawCampaignRecord {
            issue_type: text(row, "issue_type")?.into(),
            live_date: text(row, "live_date")?.into(),
            end_date: text(row, "end_date")?.into(),
            segment: text(row, "segment")?,
            slot: row.try_get("slot")?,
            request_type: text(row, "request_type")?.into(),
            monetary_type,
            cpc: row.try_get("cpc")?,
            product_id: text(row, "product_id")?,
            akeneo_product_name: row.try_get("akeneo_product_name")?,
            akeneo_brand_name: row.try_get("akeneo_brand_name")?,
            selling_price: row
                .try_get::<Option<f64>, _>("selling_price")?
                .unwrap_or(0.0),
            projected_inventory: row.try_get("projected_inventory")?,
            brand: row.try_get("brand")?,
            preferred_landing_sku_id: row.try_get("preferred_landing_sku_id")?,
            property: row.try_get("property")?,
            funnel: row.try_get("funnel")?,
            mv: row.try_get("mv")?,
            top_bet_date: row.try_get("top_bet_date")?,
            campaign_name: row.try_get("campaign_name")?,
            top_bet: row.try_get("top_bet")?,
            article_type: row.try_get("article_type")?,
            akeneo_family: row.try_get("akeneo_family")?,
            mrp: row.try_get("mrp")?,
            segment_in: row.try_get("segment_in")?,
            remarks: row.try_get("remarks")?,
            price_remarks: row.try_get("price_remarks")?,
            user_email: row.try_get("user_email")?,
            impressions: row.try_get("impressions")?,
            tacos: row.try_get("tacos")?,
            index: row.try_get("index")?,
            available_inventory: row.try_get("available_inventory")?,
        }))
    }
}
