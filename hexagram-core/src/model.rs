//! Server records as the client sees them
//!
//! These are snapshots: the client never derives or mutates them, it only
//! replaces them with whatever the server sends next.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{BoardError, Cell};
use crate::color::Color;

/// A player seated in a room
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub user_id: usize,
    pub color: Color,
    pub name: String,
    pub ready: bool,
}

/// Room summary
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDesc {
    pub id: String,
    pub name: String,
    pub winner: Option<usize>,
    pub created_by: usize,
    /// Milliseconds since the Unix epoch
    pub created_time: u64,
    pub game_started: bool,
    pub game_finished: bool,
    pub active_player: usize,
    pub number_of_player: usize,
}

/// Response of room creation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRoom {
    pub room: RoomDesc,
    /// Push-channel address advertised by the server
    pub url: String,
}

/// Session identity issued by the server
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBundle {
    pub token: String,
    /// Milliseconds since the Unix epoch
    pub created_at: u64,
    pub user_id: usize,
    pub user_name: String,
}

/// A move: who makes it and the path the cone travels
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub by: usize,
    pub path: Vec<Cell>,
}

impl Move {
    /// The path is sent as-is; the only local requirement is that it is not empty.
    pub fn new(by: usize, path: Vec<Cell>) -> Result<Self, BoardError> {
        if path.is_empty() {
            return Err(BoardError::EmptyPath);
        }
        Ok(Self { by, path })
    }
}

/// Board occupation as published by the server
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Cone color by cell; keyed `"row,col"` on the wire
    #[serde(with = "cone_map")]
    pub cones: FxHashMap<Cell, Color>,
    /// Color by user id
    #[serde(with = "player_map")]
    pub players_colors: FxHashMap<usize, Color>,
    /// Past moves as (color, path)
    #[serde(default)]
    pub moves: Vec<(usize, Vec<Cell>)>,
}

impl GameState {
    /// Cells holding cones of the given color, sorted
    pub fn cones_of(&self, color: Color) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self
            .cones
            .iter()
            .filter(|(_, c)| **c == color)
            .map(|(&cell, _)| cell)
            .collect();
        cells.sort();
        cells
    }

    pub fn color_of(&self, user_id: usize) -> Option<Color> {
        self.players_colors.get(&user_id).copied()
    }
}

mod cone_map {
    use super::*;
    use serde::de::Error;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(cones: &FxHashMap<Cell, Color>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let keyed: BTreeMap<String, Color> = cones
            .iter()
            .map(|(cell, color)| (cell.to_string(), *color))
            .collect();
        keyed.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<FxHashMap<Cell, Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let keyed = BTreeMap::<String, Color>::deserialize(deserializer)?;
        keyed
            .into_iter()
            .map(|(key, color)| {
                key.parse::<Cell>()
                    .map(|cell| (cell, color))
                    .map_err(D::Error::custom)
            })
            .collect()
    }
}

// User ids arrive as string keys. Parsed here rather than by serde_json so the
// map also decodes inside tagged push events.
mod player_map {
    use super::*;
    use serde::de::Error;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(colors: &FxHashMap<usize, Color>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let keyed: BTreeMap<String, Color> = colors
            .iter()
            .map(|(user_id, color)| (user_id.to_string(), *color))
            .collect();
        keyed.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<FxHashMap<usize, Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let keyed = BTreeMap::<String, Color>::deserialize(deserializer)?;
        keyed
            .into_iter()
            .map(|(key, color)| {
                key.parse::<usize>()
                    .map(|user_id| (user_id, color))
                    .map_err(|_| D::Error::custom(format!("invalid user id key: {key:?}")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_desc_from_server_json() {
        let json = r#"{
            "id": "4f1c", "name": "friday", "winner": null, "created_by": 3,
            "created_time": 1700000000000, "game_started": false,
            "game_finished": false, "active_player": 0, "number_of_player": 2
        }"#;
        let room: RoomDesc = serde_json::from_str(json).unwrap();
        assert_eq!(room.name, "friday");
        assert_eq!(room.winner, None);
        assert_eq!(room.number_of_player, 2);
    }

    #[test]
    fn test_game_state_parses_cell_keys() {
        let json = r#"{
            "cones": {"0,0": 1, "16,4": 4, "10,5": 1},
            "players_colors": {"7": 1, "8": 4},
            "moves": [[1, [[4, 0], [5, 6]]]]
        }"#;
        let gs: GameState = serde_json::from_str(json).unwrap();
        assert_eq!(gs.cones.get(&Cell::new(16, 4)), Some(&Color::Yellow));
        assert_eq!(gs.cones_of(Color::Purple), vec![Cell::new(0, 0), Cell::new(10, 5)]);
        assert_eq!(gs.color_of(8), Some(Color::Yellow));
        assert_eq!(gs.color_of(9), None);
        assert_eq!(gs.moves[0].1, vec![Cell::new(4, 0), Cell::new(5, 6)]);
    }

    #[test]
    fn test_game_state_rejects_bad_key() {
        let json = r#"{"cones": {"oops": 1}, "players_colors": {}}"#;
        assert!(serde_json::from_str::<GameState>(json).is_err());
    }

    #[test]
    fn test_move_requires_a_cell() {
        assert_eq!(Move::new(1, vec![]), Err(BoardError::EmptyPath));
        let mv = Move::new(1, vec![Cell::new(3, 0)]).unwrap();
        assert_eq!(mv.path.len(), 1);
    }
}
