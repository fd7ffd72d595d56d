//! Request bodies and push-channel events

use serde::{Deserialize, Serialize};

use crate::board::Cell;
use crate::color::Color;
use crate::model::{GameState, RoomDesc};

/// Header carrying the session token
pub const USER_TOKEN_HEADER: &str = "X-User-Token";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub room_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddUserRequest {
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveRequest {
    pub path: Vec<Cell>,
    pub calculate_path: bool,
}

impl MoveRequest {
    pub fn new(path: Vec<Cell>) -> Self {
        Self {
            path,
            calculate_path: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReadyRequest {
    pub set_ready: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateType {
    Start,
    Stop,
    ColorChange,
    Leave,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateRoomRequest {
    pub update_type: UpdateType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub new_color: Option<Color>,
}

impl UpdateRoomRequest {
    pub fn start() -> Self {
        Self {
            update_type: UpdateType::Start,
            new_color: None,
        }
    }

    pub fn leave() -> Self {
        Self {
            update_type: UpdateType::Leave,
            new_color: None,
        }
    }

    pub fn color_change(new_color: Color) -> Self {
        Self {
            update_type: UpdateType::ColorChange,
            new_color: Some(new_color),
        }
    }
}

/// Message pushed by the server on a room's live channel, tagged by `name`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum RoomEvent {
    MoveMade {
        by_user_id: usize,
        path: Vec<Cell>,
        next_player: usize,
        game_finished: bool,
    },
    RoomStateUpdate {
        room: RoomDesc,
    },
    MoveTimer {
        timer_value: usize,
        user_id: usize,
    },
    TurnChange {
        turn_goes_to: usize,
    },
    GameState {
        room_id: String,
        game: GameState,
    },
    ChatMessage {
        by: String,
        message: String,
        user_id: usize,
    },
    PlayerJoined {
        user_id: usize,
        room_id: String,
        #[serde(default)]
        player_cones: Vec<Cell>,
        player_name: String,
        player_color: Color,
    },
    PlayerLeft {
        user_id: usize,
        room_id: String,
        next_turn: usize,
    },
    #[serde(other)]
    Unknown,
}
