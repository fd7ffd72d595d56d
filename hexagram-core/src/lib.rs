//! HEXAGRAM Core - Board legend and wire model
//!
//! This crate provides the client-side domain data:
//! - Board geometry (21-row hexagram with home triangles)
//! - Color categories and their legend (name, paint value, ink)
//! - Server records (rooms, players, game state, token bundles)
//! - Request bodies and push-channel events

pub mod board;
pub mod color;
pub mod model;
pub mod protocol;

// Re-exports for convenient access
pub use board::{color_at, is_in_corner, legend, BoardError, Cell, LegendEntry, ROWS, ROW_LENGTHS};
pub use color::{Color, ColorInfo, Ink, COLORS, PLAYER_COLORS};
pub use model::{CreatedRoom, GameState, Move, Player, RoomDesc, TokenBundle};
pub use protocol::{RoomEvent, UpdateRoomRequest, UpdateType, USER_TOKEN_HEADER};
