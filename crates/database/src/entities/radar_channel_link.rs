//! Radar channel link entity definitions
//!
//! One row per employee-specific link minted for a radar under a given
//! marketing channel.

use serde::{Deserialize, Serialize};

use crate::filter::SqlValue;
use crate::repo::EntitySchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RadarChannelLink {
    pub id: i64,
    pub corp_id: i64,
    pub radar_id: i64,
    pub channel_id: i64,
    pub employee_id: i64,
    pub contact_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRadarChannelLink {
    pub corp_id: i64,
    pub radar_id: i64,
    pub channel_id: i64,
    pub employee_id: i64,
    pub contact_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRadarChannelLink {
    pub channel_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub contact_id: Option<i64>,
}

impl EntitySchema for RadarChannelLink {
    type Create = CreateRadarChannelLink;
    type Update = UpdateRadarChannelLink;

    const TABLE: &'static str = "radar_channel_links";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "corp_id",
        "radar_id",
        "channel_id",
        "employee_id",
        "contact_id",
        "created_at",
        "updated_at",
    ];
    const INSERT_COLUMNS: &'static [&'static str] = &[
        "corp_id",
        "radar_id",
        "channel_id",
        "employee_id",
        "contact_id",
        "created_at",
        "updated_at",
    ];

    fn insert_values(data: &Self::Create) -> Vec<SqlValue> {
        let now = chrono::Utc::now().to_rfc3339();
        vec![
            data.corp_id.into(),
            data.radar_id.into(),
            data.channel_id.into(),
            data.employee_id.into(),
            data.contact_id.into(),
            now.clone().into(),
            now.into(),
        ]
    }

    fn update_values(data: &Self::Update) -> Vec<(&'static str, SqlValue)> {
        let mut assignments = Vec::new();
        if let Some(channel_id) = data.channel_id {
            assignments.push(("channel_id", SqlValue::Int(channel_id)));
        }
        if let Some(employee_id) = data.employee_id {
            assignments.push(("employee_id", SqlValue::Int(employee_id)));
        }
        if let Some(contact_id) = data.contact_id {
            assignments.push(("contact_id", SqlValue::Int(contact_id)));
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
