//! Contract and service for room fission contact data access.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::entities::{
    CreateRoomFissionContact, RoomFissionContact, UpdateRoomFissionContact,
};
use crate::filter::{Conditions, Page, PageOptions, SqlValue, TriState};
use crate::repo::Repository;
use crate::types::DatabaseResult;

/// The closed set of permitted room fission contact operations.
#[async_trait]
pub trait RoomFissionContactContract: Send + Sync {
    /// Find one contact by id.
    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<RoomFissionContact>>;

    /// Find all contacts matching an id list.
    async fn find_by_ids(&self, ids: &[i64]) -> DatabaseResult<Vec<RoomFissionContact>>;

    /// Paginated listing with exact-match column filters.
    async fn list_page(
        &self,
        filters: &[(&str, SqlValue)],
        options: &PageOptions,
    ) -> DatabaseResult<Page<RoomFissionContact>>;

    /// Insert one contact; returns its new id.
    async fn create(&self, data: &CreateRoomFissionContact) -> DatabaseResult<i64>;

    /// Insert many contacts in one statement; `true` when all rows landed.
    async fn create_many(&self, data: &[CreateRoomFissionContact]) -> DatabaseResult<bool>;

    /// Apply a change set to one contact by id; returns the matched-row count.
    async fn update_by_id(
        &self,
        id: i64,
        changes: &UpdateRoomFissionContact,
    ) -> DatabaseResult<u64>;

    /// Delete one contact by id; returns the deleted-row count.
    async fn delete(&self, id: i64) -> DatabaseResult<u64>;

    /// Delete all contacts matching an id list; returns the deleted-row count.
    async fn delete_many(&self, ids: &[i64]) -> DatabaseResult<u64>;

    /// All contacts for a corp.
    async fn find_by_corp_id(&self, corp_id: i64) -> DatabaseResult<Vec<RoomFissionContact>>;

    /// Contacts in a completion state across a set of corps.
    async fn find_by_corps_and_status(
        &self,
        corp_ids: &[i64],
        status: i64,
    ) -> DatabaseResult<Vec<RoomFissionContact>>;

    /// The contact for a union id within a room, optionally pinned to one
    /// campaign.
    async fn find_first_by_room_union_fission(
        &self,
        room_id: i64,
        union_id: &str,
        fission_id: Option<i64>,
    ) -> DatabaseResult<Option<RoomFissionContact>>;

    /// The contact for a union id, optionally pinned to one campaign.
    async fn find_first_by_union_fission(
        &self,
        union_id: &str,
        fission_id: Option<i64>,
    ) -> DatabaseResult<Option<RoomFissionContact>>;

    /// Contacts recruited by one inviter, filtered by flag state.
    async fn find_helpers_by_parent_union(
        &self,
        parent_union_id: &str,
        join_status: TriState,
        is_new: TriState,
        loss: TriState,
    ) -> DatabaseResult<Vec<RoomFissionContact>>;

    /// Campaign-wide contact count, filtered by flag state, optionally
    /// restricted to one room and to rows created after `since`.
    async fn count_by_fission(
        &self,
        fission_id: i64,
        join_status: TriState,
        status: TriState,
        loss: TriState,
        room_id: Option<i64>,
        since: Option<&str>,
    ) -> DatabaseResult<i64>;
}

/// Sole implementation of [`RoomFissionContactContract`].
pub struct RoomFissionContactService {
    repo: Repository<RoomFissionContact>,
}

impl RoomFissionContactService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: Repository::new(pool),
        }
    }
}

#[async_trait]
impl RoomFissionContactContract for RoomFissionContactService {
    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<RoomFissionContact>> {
        self.repo.get_one_by_id(id).await
    }

    async fn find_by_ids(&self, ids: &[i64]) -> DatabaseResult<Vec<RoomFissionContact>> {
        self.repo.get_all_by_id(ids).await
    }

    async fn list_page(
        &self,
        filters: &[(&str, SqlValue)],
        options: &PageOptions,
    ) -> DatabaseResult<Page<RoomFissionContact>> {
        self.repo.get_page_list(filters, options).await
    }

    async fn create(&self, data: &CreateRoomFissionContact) -> DatabaseResult<i64> {
        self.repo.create_one(data).await
    }

    async fn create_many(&self, data: &[CreateRoomFissionContact]) -> DatabaseResult<bool> {
        self.repo.create_all(data).await
    }

    async fn update_by_id(
        &self,
        id: i64,
        changes: &UpdateRoomFissionContact,
    ) -> DatabaseResult<u64> {
        self.repo.update_one_by_id(id, changes).await
    }

    async fn delete(&self, id: i64) -> DatabaseResult<u64> {
        self.repo.delete_one(id).await
    }

    async fn delete_many(&self, ids: &[i64]) -> DatabaseResult<u64> {
        self.repo.delete_all(ids).await
    }

    async fn find_by_corp_id(&self, corp_id: i64) -> DatabaseResult<Vec<RoomFissionContact>> {
        let conditions = Conditions::new().eq("corp_id", corp_id);
        self.repo.select(&conditions).await
    }

    async fn find_by_corps_and_status(
        &self,
        corp_ids: &[i64],
        status: i64,
    ) -> DatabaseResult<Vec<RoomFissionContact>> {
        let conditions = Conditions::new()
            .eq_any("corp_id", corp_ids)
            .eq("status", status);
        self.repo.select(&conditions).await
    }

    async fn find_first_by_room_union_fission(
        &self,
        room_id: i64,
        union_id: &str,
        fission_id: Option<i64>,
    ) -> DatabaseResult<Option<RoomFissionContact>> {
        let conditions = Conditions::new()
            .eq("room_id", room_id)
            .eq_opt("fission_id", fission_id)
            .eq("union_id", union_id);
        self.repo.select_first(&conditions).await
    }

    async fn find_first_by_union_fission(
        &self,
        union_id: &str,
        fission_id: Option<i64>,
    ) -> DatabaseResult<Option<RoomFissionContact>> {
        let conditions = Conditions::new()
            .eq("union_id", union_id)
            .eq_opt("fission_id", fission_id);
        self.repo.select_first(&conditions).await
    }

    async fn find_helpers_by_parent_union(
        &self,
        parent_union_id: &str,
        join_status: TriState,
        is_new: TriState,
        loss: TriState,
    ) -> DatabaseResult<Vec<RoomFissionContact>> {
        let conditions = Conditions::new()
            .eq("parent_union_id", parent_union_id)
            .tri("join_status", join_status)
            .tri("is_new", is_new)
            .tri("loss", loss);
        self.repo.select(&conditions).await
    }

    async fn count_by_fission(
        &self,
        fission_id: i64,
        join_status: TriState,
        status: TriState,
        loss: TriState,
        room_id: Option<i64>,
        since: Option<&str>,
    ) -> DatabaseResult<i64> {
        let conditions = Conditions::new()
            .eq("fission_id", fission_id)
            .tri("join_status", join_status)
            .tri("status", status)
            .tri("loss", loss)
            .eq_opt("room_id", room_id)
            .after("created_at", since);
        self.repo.count(&conditions).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_pool() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test_fission_contacts.db");
        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        let pool = SqlitePool::connect(&db_url).await.unwrap();

        sqlx::query(
            "CREATE TABLE room_fission_contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                corp_id INTEGER NOT NULL,
                fission_id INTEGER NOT NULL,
                room_id INTEGER NOT NULL DEFAULT 0,
                union_id TEXT NOT NULL,
                parent_union_id TEXT NOT NULL DEFAULT '',
                nickname TEXT NOT NULL DEFAULT '',
                avatar TEXT NOT NULL DEFAULT '',
                join_status INTEGER NOT NULL DEFAULT 0,
                is_new INTEGER NOT NULL DEFAULT 0,
                loss INTEGER NOT NULL DEFAULT 0,
                status INTEGER NOT NULL DEFAULT 0,
                invite_count INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        (pool, temp_dir)
    }

    struct ContactSpec {
        union_id: &'static str,
        parent_union_id: &'static str,
        join_status: i64,
        is_new: i64,
        loss: i64,
        status: i64,
    }

    fn contact(spec: ContactSpec) -> CreateRoomFissionContact {
        CreateRoomFissionContact {
            corp_id: 1,
            fission_id: 1,
            room_id: 1,
            union_id: spec.union_id.to_string(),
            parent_union_id: spec.parent_union_id.to_string(),
            nickname: String::new(),
            avatar: String::new(),
            join_status: spec.join_status,
            is_new: spec.is_new,
            loss: spec.loss,
            status: spec.status,
            invite_count: 0,
        }
    }

    async fn seed_helpers(service: &RoomFissionContactService) {
        // Four helpers recruited by "parent", covering both join states.
        let specs = [
            ("u-1", 1, 1, 0, 1),
            ("u-2", 1, 0, 0, 0),
            ("u-3", 0, 1, 1, 0),
            ("u-4", 0, 0, 0, 1),
        ];
        for (union_id, join_status, is_new, loss, status) in specs {
            service
                .create(&contact(ContactSpec {
                    union_id,
                    parent_union_id: "parent",
                    join_status,
                    is_new,
                    loss,
                    status,
                }))
                .await
                .unwrap();
        }
        // A contact under a different inviter, never matched below.
        service
            .create(&contact(ContactSpec {
                union_id: "u-5",
                parent_union_id: "other",
                join_status: 1,
                is_new: 1,
                loss: 0,
                status: 1,
            }))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn any_flag_matches_both_values() {
        let (pool, _temp_dir) = create_test_pool().await;
        let service = RoomFissionContactService::new(pool);
        seed_helpers(&service).await;

        let all = service
            .find_helpers_by_parent_union("parent", TriState::Any, TriState::Any, TriState::Any)
            .await
            .unwrap();
        assert_eq!(all.len(), 4);

        // Legacy wire values of 2 (or more) decode to Any and must yield
        // the same rows.
        let legacy = service
            .find_helpers_by_parent_union(
                "parent",
                TriState::from_flag(2),
                TriState::from_flag(7),
                TriState::from_flag(2),
            )
            .await
            .unwrap();
        assert_eq!(legacy, all);
    }

    #[tokio::test]
    async fn concrete_flags_strictly_narrow() {
        let (pool, _temp_dir) = create_test_pool().await;
        let service = RoomFissionContactService::new(pool);
        seed_helpers(&service).await;

        let joined = service
            .find_helpers_by_parent_union(
                "parent",
                TriState::MatchTrue,
                TriState::Any,
                TriState::Any,
            )
            .await
            .unwrap();
        assert_eq!(joined.len(), 2);
        assert!(joined.iter().all(|c| c.join_status == 1));

        let not_joined_not_new = service
            .find_helpers_by_parent_union(
                "parent",
                TriState::MatchFalse,
                TriState::MatchFalse,
                TriState::Any,
            )
            .await
            .unwrap();
        assert_eq!(not_joined_not_new.len(), 1);
        assert_eq!(not_joined_not_new[0].union_id, "u-4");
    }

    #[tokio::test]
    async fn count_by_fission_applies_optional_filters() {
        let (pool, _temp_dir) = create_test_pool().await;
        let service = RoomFissionContactService::new(pool);
        seed_helpers(&service).await;

        let all = service
            .count_by_fission(1, TriState::Any, TriState::Any, TriState::Any, None, None)
            .await
            .unwrap();
        assert_eq!(all, 5);

        let joined = service
            .count_by_fission(
                1,
                TriState::MatchTrue,
                TriState::Any,
                TriState::Any,
                None,
                None,
            )
            .await
            .unwrap();
        assert_eq!(joined, 3);

        let other_room = service
            .count_by_fission(
                1,
                TriState::Any,
                TriState::Any,
                TriState::Any,
                Some(99),
                None,
            )
            .await
            .unwrap();
        assert_eq!(other_room, 0);

        // All seeded rows were created after 2020, none after 9999.
        let since_epoch = service
            .count_by_fission(
                1,
                TriState::Any,
                TriState::Any,
                TriState::Any,
                None,
                Some("2020-01-01"),
            )
            .await
            .unwrap();
        assert_eq!(since_epoch, 5);

        let since_future = service
            .count_by_fission(
                1,
                TriState::Any,
                TriState::Any,
                TriState::Any,
                None,
                Some("9999-01-01"),
            )
            .await
            .unwrap();
        assert_eq!(since_future, 0);
    }

    #[tokio::test]
    async fn union_lookups_respect_optional_fission_filter() {
        let (pool, _temp_dir) = create_test_pool().await;
        let service = RoomFissionContactService::new(pool);

        let mut in_campaign = contact(ContactSpec {
            union_id: "u-1",
            parent_union_id: "",
            join_status: 1,
            is_new: 1,
            loss: 0,
            status: 0,
        });
        in_campaign.fission_id = 5;
        service.create(&in_campaign).await.unwrap();

        let found = service
            .find_first_by_union_fission("u-1", None)
            .await
            .unwrap();
        assert!(found.is_some());

        let pinned = service
            .find_first_by_union_fission("u-1", Some(5))
            .await
            .unwrap();
        assert!(pinned.is_some());

        let wrong_campaign = service
            .find_first_by_union_fission("u-1", Some(6))
            .await
            .unwrap();
        assert!(wrong_campaign.is_none());

        let in_room = service
            .find_first_by_room_union_fission(1, "u-1", Some(5))
            .await
            .unwrap();
        assert!(in_room.is_some());

        let wrong_room = service
            .find_first_by_room_union_fission(2, "u-1", None)
            .await
            .unwrap();
        assert!(wrong_room.is_none());
    }

    #[tokio::test]
    async fn corps_and_status_lookup_uses_id_list() {
        let (pool, _temp_dir) = create_test_pool().await;
        let service = RoomFissionContactService::new(pool);

        let mut done = contact(ContactSpec {
            union_id: "u-1",
            parent_union_id: "",
            join_status: 1,
            is_new: 0,
            loss: 0,
            status: 1,
        });
        done.corp_id = 1;
        service.create(&done).await.unwrap();

        let mut pending = contact(ContactSpec {
            union_id: "u-2",
            parent_union_id: "",
            join_status: 1,
            is_new: 0,
            loss: 0,
            status: 0,
        });
        pending.corp_id = 2;
        service.create(&pending).await.unwrap();

        let completed = service
            .find_by_corps_and_status(&[1, 2], 1)
            .await
            .unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].union_id, "u-1");

        let none = service.find_by_corps_and_status(&[], 1).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn missing_ids_yield_empty_containers() {
        let (pool, _temp_dir) = create_test_pool().await;
        let service = RoomFissionContactService::new(pool);

        assert!(service.find_by_id(404).await.unwrap().is_none());
        assert!(service.find_by_ids(&[1, 2, 3]).await.unwrap().is_empty());
        assert!(service.find_by_corp_id(404).await.unwrap().is_empty());
    }
}
