//! Watch command - follow a room's live updates until the server hangs up
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: follow() - event loop
//! - Level 3: describe_event() - formatting

use anyhow::Result;
use clap::Args;

use hexagram_client::{ApiClient, RoomEvents};
use hexagram_core::RoomEvent;

use crate::context::{block_on, connect, GlobalArgs};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct WatchArgs {
    /// Room id
    pub room_id: String,

    /// Print raw event payloads as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(global: &GlobalArgs, args: WatchArgs) -> Result<()> {
    let client = connect(global)?;
    block_on(follow(&client, &args))?
}

// ============================================================================
// LEVEL 2 - EVENT LOOP
// ============================================================================

async fn follow(client: &ApiClient, args: &WatchArgs) -> Result<()> {
    let mut events: RoomEvents = client.subscribe(&args.room_id).await?;
    tracing::info!("Watching room {}", events.room_id());

    loop {
        tokio::select! {
            event = events.next() => match event {
                Some(event) if args.json => println!("{}", serde_json::to_string(&event)?),
                Some(event) => println!("{}", describe_event(&event)),
                None => {
                    println!("Server closed the channel");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    events.close();
    Ok(())
}

// ============================================================================
// LEVEL 3 - FORMATTING
// ============================================================================

fn describe_event(event: &RoomEvent) -> String {
    match event {
        RoomEvent::MoveMade { by_user_id, path, next_player, game_finished } => {
            let cells: Vec<String> = path.iter().map(|c| c.to_string()).collect();
            let tail = if *game_finished {
                "game finished".to_string()
            } else {
                format!("next: {}", next_player)
            };
            format!("move by {}: {} ({})", by_user_id, cells.join(" -> "), tail)
        }
        RoomEvent::RoomStateUpdate { room } => format!(
            "room {} now has {} player(s), active {}",
            room.id, room.number_of_player, room.active_player
        ),
        RoomEvent::MoveTimer { timer_value, user_id } => {
            format!("timer for {}: {}s", user_id, timer_value)
        }
        RoomEvent::TurnChange { turn_goes_to } => format!("turn goes to {}", turn_goes_to),
        RoomEvent::GameState { room_id, game } => {
            format!("game state for {}: {} cone(s)", room_id, game.cones.len())
        }
        RoomEvent::ChatMessage { by, message, .. } => format!("<{}> {}", by, message),
        RoomEvent::PlayerJoined { player_name, player_color, user_id, .. } => {
            format!("{} (id {}) joined as {}", player_name, user_id, player_color)
        }
        RoomEvent::PlayerLeft { user_id, next_turn, .. } => {
            format!("{} left, turn goes to {}", user_id, next_turn)
        }
        RoomEvent::Unknown => "unrecognized event".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexagram_core::{Cell, Color};

    #[test]
    fn test_describe_move() {
        let event = RoomEvent::MoveMade {
            by_user_id: 3,
            path: vec![Cell::new(4, 0), Cell::new(5, 6)],
            next_player: 5,
            game_finished: false,
        };
        assert_eq!(describe_event(&event), "move by 3: 4,0 -> 5,6 (next: 5)");
    }

    #[test]
    fn test_describe_join_and_chat() {
        let joined = RoomEvent::PlayerJoined {
            user_id: 2,
            room_id: "r1".to_string(),
            player_cones: vec![],
            player_name: "Bob".to_string(),
            player_color: Color::Orange,
        };
        assert_eq!(describe_event(&joined), "Bob (id 2) joined as orange");

        let chat = RoomEvent::ChatMessage {
            by: "Bob".to_string(),
            message: "hi".to_string(),
            user_id: 2,
        };
        assert_eq!(describe_event(&chat), "<Bob> hi");
    }
}
