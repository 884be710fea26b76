//! Room fission contact entity definitions
//!
//! One row per external contact pulled into a group-fission campaign.
//! `join_status`, `is_new`, `loss`, and `status` are 0/1 flag columns;
//! queries filter them through [`crate::filter::TriState`].

use serde::{Deserialize, Serialize};

use crate::filter::SqlValue;
use crate::repo::EntitySchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RoomFissionContact {
    pub id: i64,
    pub corp_id: i64,
    pub fission_id: i64,
    pub room_id: i64,
    pub union_id: String,
    /// Union id of the contact who invited this one; empty for seeds.
    pub parent_union_id: String,
    pub nickname: String,
    pub avatar: String,
    /// 1 once the contact has joined the target room.
    pub join_status: i64,
    /// 1 when this contact was newly acquired by the campaign.
    pub is_new: i64,
    /// 1 once the contact has left the room again.
    pub loss: i64,
    /// 1 once the contact completed the campaign task.
    pub status: i64,
    pub invite_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomFissionContact {
    pub corp_id: i64,
    pub fission_id: i64,
    pub room_id: i64,
    pub union_id: String,
    pub parent_union_id: String,
    pub nickname: String,
    pub avatar: String,
    pub join_status: i64,
    pub is_new: i64,
    pub loss: i64,
    pub status: i64,
    pub invite_count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoomFissionContact {
    pub room_id: Option<i64>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub join_status: Option<i64>,
    pub is_new: Option<i64>,
    pub loss: Option<i64>,
    pub status: Option<i64>,
    pub invite_count: Option<i64>,
}

impl EntitySchema for RoomFissionContact {
    type Create = CreateRoomFissionContact;
    type Update = UpdateRoomFissionContact;

    const TABLE: &'static str = "room_fission_contacts";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "corp_id",
        "fission_id",
        "room_id",
        "union_id",
        "parent_union_id",
        "nickname",
        "avatar",
        "join_status",
        "is_new",
        "loss",
        "status",
        "invite_count",
        "created_at",
        "updated_at",
    ];
    const INSERT_COLUMNS: &'static [&'static str] = &[
        "corp_id",
        "fission_id",
        "room_id",
        "union_id",
        "parent_union_id",
        "nickname",
        "avatar",
        "join_status",
        "is_new",
        "loss",
        "status",
        "invite_count",
        "created_at",
        "updated_at",
    ];

    fn insert_values(data: &Self::Create) -> Vec<SqlValue> {
        let now = chrono::Utc::now().to_rfc3339();
        vec![
            data.corp_id.into(),
            data.fission_id.into(),
            data.room_id.into(),
            data.union_id.clone().into(),
            data.parent_union_id.clone().into(),
            data.nickname.clone().into(),
            data.avatar.clone().into(),
            data.join_status.into(),
            data.is_new.into(),
            data.loss.into(),
            data.status.into(),
            data.invite_count.into(),
            now.clone().into(),
            now.into(),
        ]
    }

    fn update_values(data: &Self::Update) -> Vec<(&'static str, SqlValue)> {
        let mut assignments = Vec::new();
        if let Some(room_id) = data.room_id {
            assignments.push(("room_id", SqlValue::Int(room_id)));
        }
        if let Some(nickname) = &data.nickname {
            assignments.push(("nickname", SqlValue::Text(nickname.clone())));
        }
        if let Some(avatar) = &data.avatar {
            assignments.push(("avatar", SqlValue::Text(avatar.clone())));
        }
        if let Some(join_status) = data.join_status {
            assignments.push(("join_status", SqlValue::Int(join_status)));
        }
        if let Some(is_new) = data.is_new {
            assignments.push(("is_new", SqlValue::Int(is_new)));
        }
        if let Some(loss) = data.loss {
            assignments.push(("loss", SqlValue::Int(loss)));
        }
        if let Some(status) = data.status {
            assignments.push(("status", SqlValue::Int(status)));
        }
        if let Some(invite_count) = data.invite_count {
            assignments.push(("invite_count", SqlValue::Int(invite_count)));
        }
        if !assignments.is_empty() {
            assignments.push((
                "updated_at",
                SqlValue::Text(chrono::Utc::now().to_rfc3339()),
            ));
        }
        assignments
    }
}
