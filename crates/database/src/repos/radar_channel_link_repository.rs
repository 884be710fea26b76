//! Contract and service for radar channel link data access.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::entities::{CreateRadarChannelLink, RadarChannelLink, UpdateRadarChannelLink};
use crate::filter::{Conditions, Page, PageOptions, SqlValue};
use crate::repo::Repository;
use crate::types::DatabaseResult;

/// The closed set of permitted radar channel link operations.
#[async_trait]
pub trait RadarChannelLinkContract: Send + Sync {
    /// Find one link by id.
    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<RadarChannelLink>>;

    /// Find all links matching an id list.
    async fn find_by_ids(&self, ids: &[i64]) -> DatabaseResult<Vec<RadarChannelLink>>;

    /// Paginated listing with exact-match column filters.
    async fn list_page(
        &self,
        filters: &[(&str, SqlValue)],
        options: &PageOptions,
    ) -> DatabaseResult<Page<RadarChannelLink>>;

    /// Insert one link; returns its new id.
    async fn create(&self, data: &CreateRadarChannelLink) -> DatabaseResult<i64>;

    /// Insert many links in one statement; `true` when all rows landed.
    async fn create_many(&self, data: &[CreateRadarChannelLink]) -> DatabaseResult<bool>;

    /// Apply a change set to one link by id; returns the matched-row count.
    async fn update_by_id(
        &self,
        id: i64,
        changes: &UpdateRadarChannelLink,
    ) -> DatabaseResult<u64>;

    /// Delete one link by id; returns the deleted-row count.
    async fn delete(&self, id: i64) -> DatabaseResult<u64>;

    /// Delete all links matching an id list; returns the deleted-row count.
    async fn delete_many(&self, ids: &[i64]) -> DatabaseResult<u64>;

    /// All links for a corp.
    async fn find_by_corp_id(&self, corp_id: i64) -> DatabaseResult<Vec<RadarChannelLink>>;

    /// All links for a radar under one channel of a corp.
    async fn find_by_corp_radar_channel(
        &self,
        corp_id: i64,
        radar_id: i64,
        channel_id: i64,
    ) -> DatabaseResult<Vec<RadarChannelLink>>;

    /// All links for a radar of a corp, across channels.
    async fn find_by_corp_radar(
        &self,
        corp_id: i64,
        radar_id: i64,
    ) -> DatabaseResult<Vec<RadarChannelLink>>;

    /// The employee-specific link for a radar/channel pair, if minted.
    async fn find_first_by_corp_radar_channel_employee(
        &self,
        corp_id: i64,
        radar_id: i64,
        channel_id: i64,
        employee_id: i64,
    ) -> DatabaseResult<Option<RadarChannelLink>>;

    /// Total click count for a radar of a corp.
    async fn count_by_corp_radar(&self, corp_id: i64, radar_id: i64) -> DatabaseResult<i64>;

    /// All channel links minted for a radar.
    async fn find_by_radar_id(&self, radar_id: i64) -> DatabaseResult<Vec<RadarChannelLink>>;
}

/// Sole implementation of [`RadarChannelLinkContract`].
pub struct RadarChannelLinkService {
    repo: Repository<RadarChannelLink>,
}

impl RadarChannelLinkService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: Repository::new(pool),
        }
    }
}

#[async_trait]
impl RadarChannelLinkContract for RadarChannelLinkService {
    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<RadarChannelLink>> {
        self.repo.get_one_by_id(id).await
    }

    async fn find_by_ids(&self, ids: &[i64]) -> DatabaseResult<Vec<RadarChannelLink>> {
        self.repo.get_all_by_id(ids).await
    }

    async fn list_page(
        &self,
        filters: &[(&str, SqlValue)],
        options: &PageOptions,
    ) -> DatabaseResult<Page<RadarChannelLink>> {
        self.repo.get_page_list(filters, options).await
    }

    async fn create(&self, data: &CreateRadarChannelLink) -> DatabaseResult<i64> {
        self.repo.create_one(data).await
    }

    async fn create_many(&self, data: &[CreateRadarChannelLink]) -> DatabaseResult<bool> {
        self.repo.create_all(data).await
    }

    async fn update_by_id(
        &self,
        id: i64,
        changes: &UpdateRadarChannelLink,
    ) -> DatabaseResult<u64> {
        self.repo.update_one_by_id(id, changes).await
    }

    async fn delete(&self, id: i64) -> DatabaseResult<u64> {
        self.repo.delete_one(id).await
    }

    async fn delete_many(&self, ids: &[i64]) -> DatabaseResult<u64> {
        self.repo.delete_all(ids).await
    }

    async fn find_by_corp_id(&self, corp_id: i64) -> DatabaseResult<Vec<RadarChannelLink>> {
        let conditions = Conditions::new().eq("corp_id", corp_id);
        self.repo.select(&conditions).await
    }

    async fn find_by_corp_radar_channel(
        &self,
        corp_id: i64,
        radar_id: i64,
        channel_id: i64,
    ) -> DatabaseResult<Vec<RadarChannelLink>> {
        let conditions = Conditions::new()
            .eq("corp_id", corp_id)
            .eq("radar_id", radar_id)
            .eq("channel_id", channel_id);
        self.repo.select(&conditions).await
    }

    async fn find_by_corp_radar(
        &self,
        corp_id: i64,
        radar_id: i64,
    ) -> DatabaseResult<Vec<RadarChannelLink>> {
        let conditions = Conditions::new()
            .eq("corp_id", corp_id)
            .eq("radar_id", radar_id);
        self.repo.select(&conditions).await
    }

    async fn find_first_by_corp_radar_channel_employee(
        &self,
        corp_id: i64,
        radar_id: i64,
        channel_id: i64,
        employee_id: i64,
    ) -> DatabaseResult<Option<RadarChannelLink>> {
        let conditions = Conditions::new()
            .eq("corp_id", corp_id)
            .eq("radar_id", radar_id)
            .eq("channel_id", channel_id)
            .eq("employee_id", employee_id);
        self.repo.select_first(&conditions).await
    }

    async fn count_by_corp_radar(&self, corp_id: i64, radar_id: i64) -> DatabaseResult<i64> {
        let conditions = Conditions::new()
            .eq("corp_id", corp_id)
            .eq("radar_id", radar_id);
        self.repo.count(&conditions).await
    }

    async fn find_by_radar_id(&self, radar_id: i64) -> DatabaseResult<Vec<RadarChannelLink>> {
        let conditions = Conditions::new().eq("radar_id", radar_id);
        self.repo.select(&conditions).await
    }
}
