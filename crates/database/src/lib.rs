//! MoChat Database Crate
//!
//! Data-access layer for the MoChat backend: connection management,
//! migrations, the generic entity repository, and the per-entity
//! contracts with their service implementations.

use mochat_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod filter;
pub mod migrations;
pub mod repo;
pub mod repos;
pub mod types;

pub use connection::{prepare_database, DatabaseConnection};
pub use migrations::run_migrations;

// Re-export the query-building primitives
pub use filter::{Conditions, Page, PageOptions, SqlValue, TriState};
pub use repo::{EntitySchema, Repository};

// Re-export contracts and services
pub use repos::{
    RadarChannelLinkContract, RadarChannelLinkService, RoomFissionContactContract,
    RoomFissionContactService,
};

// Re-export entities
pub use entities::{
    radar_channel_link::{CreateRadarChannelLink, RadarChannelLink, UpdateRadarChannelLink},
    room_fission_contact::{
        CreateRoomFissionContact, RoomFissionContact, UpdateRoomFissionContact,
    },
};

// Re-export types
pub use types::{errors::DatabaseError, DatabaseResult};

/// Re-export commonly used types for convenience
pub use sqlx::Pool;

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::Connection(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;

    Ok(pool)
}
