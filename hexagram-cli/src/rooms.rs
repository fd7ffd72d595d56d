//! Room commands - list, create, inspect rooms and their game state
//!
//! ## Architecture
//!
//! - Level 1: list(), create(), show(), players(), state(), health()
//! - Level 2: (delegated to hexagram-client)
//! - Level 3: room_line(), player_line(), occupation_lines() - formatting

use anyhow::Result;
use clap::Args;

use hexagram_core::{GameState, Player, RoomDesc, PLAYER_COLORS};

use crate::context::{block_on, connect, format_millis, GlobalArgs};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct CreateRoomArgs {
    /// Display name of the new room
    pub name: String,
}

#[derive(Args)]
pub struct RoomArgs {
    /// Room id
    pub room_id: String,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn list(global: &GlobalArgs) -> Result<()> {
    let client = connect(global)?;
    let rooms = block_on(client.list_rooms())??;

    if rooms.is_empty() {
        println!("No rooms");
    }
    for room in &rooms {
        println!("{}", room_line(room));
    }
    Ok(())
}

pub fn create(global: &GlobalArgs, args: CreateRoomArgs) -> Result<()> {
    let client = connect(global)?;
    let created = block_on(client.create_room(&args.name))??;
    println!("{}", room_line(&created.room));
    println!("Live updates: {}", created.url);
    Ok(())
}

pub fn show(global: &GlobalArgs, args: RoomArgs) -> Result<()> {
    let client = connect(global)?;
    match block_on(client.resolve_room(&args.room_id))?? {
        Some(room) => {
            println!("{}", room_line(&room));
            println!("  created by {} at {}", room.created_by, format_millis(room.created_time));
            if let Some(winner) = room.winner {
                println!("  won by {}", winner);
            }
        }
        None => println!("No room {}", args.room_id),
    }
    Ok(())
}

pub fn players(global: &GlobalArgs, args: RoomArgs) -> Result<()> {
    let client = connect(global)?;
    let players = block_on(client.list_players(&args.room_id))??;

    if players.is_empty() {
        println!("No players");
    }
    for player in &players {
        println!("{}", player_line(player));
    }
    Ok(())
}

pub fn state(global: &GlobalArgs, args: RoomArgs) -> Result<()> {
    let client = connect(global)?;
    match block_on(client.game_state(&args.room_id))?? {
        Some(game) => {
            for line in occupation_lines(&game) {
                println!("{}", line);
            }
        }
        None => println!("No game state for {}", args.room_id),
    }
    Ok(())
}

pub fn health(global: &GlobalArgs) -> Result<()> {
    let client = connect(global)?;
    if block_on(client.health())?? {
        println!("Backend at {} is up", client.config().base_url);
        Ok(())
    } else {
        anyhow::bail!("Backend at {} is not healthy", client.config().base_url)
    }
}

// ============================================================================
// LEVEL 3 - FORMATTING
// ============================================================================

fn room_line(room: &RoomDesc) -> String {
    let phase = if room.game_finished {
        "finished"
    } else if room.game_started {
        "playing"
    } else {
        "waiting"
    };
    format!(
        "{}  {:<20} {} player(s), {}",
        room.id, room.name, room.number_of_player, phase
    )
}

fn player_line(player: &Player) -> String {
    format!(
        "{:>4}  {:<16} {:<7} {}",
        player.user_id,
        player.name,
        player.color.name(),
        if player.ready { "ready" } else { "not ready" }
    )
}

/// One line per seated color: owner and number of cones on the board
fn occupation_lines(game: &GameState) -> Vec<String> {
    let mut seats: Vec<_> = game.players_colors.iter().collect();
    seats.sort();

    let mut lines: Vec<String> = seats
        .into_iter()
        .map(|(user_id, color)| {
            format!(
                "{:<7} user {:>4}  {} cone(s)",
                color.name(),
                user_id,
                game.cones_of(*color).len()
            )
        })
        .collect();

    let unseated = PLAYER_COLORS
        .iter()
        .filter(|c| !game.players_colors.values().any(|seated| seated == *c))
        .filter(|c| !game.cones_of(**c).is_empty());
    for color in unseated {
        lines.push(format!("{:<7} unseated   {} cone(s)", color.name(), game.cones_of(*color).len()));
    }

    lines.push(format!("{} move(s) played", game.moves.len()));
    lines
}
