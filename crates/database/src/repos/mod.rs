//! Per-entity contracts and their service implementations

pub mod radar_channel_link_repository;
pub mod room_fission_contact_repository;

pub use radar_channel_link_repository::{RadarChannelLinkContract, RadarChannelLinkService};
pub use room_fission_contact_repository::{
    RoomFissionContactContract, RoomFissionContactService,
};
