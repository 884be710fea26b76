//! Domain entities for the database layer

pub mod radar_channel_link;
pub mod room_fission_contact;

pub use radar_channel_link::{
    CreateRadarChannelLink, RadarChannelLink, UpdateRadarChannelLink,
};
pub use room_fission_contact::{
    CreateRoomFissionContact, RoomFissionContact, UpdateRoomFissionContact,
};
