//! Play commands - validate and make moves, chat, ready up, start, leave, recolor
//!
//! ## Architecture
//!
//! - Level 1: validate(), make_move(), chat(), ready(), start(), leave(), color()
//! - Level 2: current_user() - session lookup
//! - Level 3: format_path() - formatting

use anyhow::{Context, Result};
use clap::Args;

use hexagram_client::ApiClient;
use hexagram_core::{Cell, Color, Move};

use crate::context::{block_on, connect, GlobalArgs};
use crate::rooms::RoomArgs;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PathArgs {
    /// Room id
    pub room_id: String,

    /// Cells visited by the cone, as `row,col`
    #[arg(required = true, value_name = "ROW,COL")]
    pub path: Vec<Cell>,
}

#[derive(Args)]
pub struct ChatArgs {
    /// Room id
    pub room_id: String,

    /// Message text
    pub message: String,
}

#[derive(Args)]
pub struct ColorArgs {
    /// Room id
    pub room_id: String,

    /// New color, by name or code
    pub color: Color,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn validate(global: &GlobalArgs, args: PathArgs) -> Result<()> {
    let client = connect(global)?;
    let legal = block_on(client.validate_path(&args.room_id, &args.path))??;
    let verdict = if legal { "legal" } else { "illegal" };
    println!("{} is {}", format_path(&args.path), verdict);
    Ok(())
}

pub fn make_move(global: &GlobalArgs, args: PathArgs) -> Result<()> {
    let client = connect(global)?;
    let mv = Move::new(current_user(&client)?, args.path)?;
    block_on(client.make_move(&args.room_id, &mv))??;
    println!("Moved {}", format_path(&mv.path));
    Ok(())
}

pub fn chat(global: &GlobalArgs, args: ChatArgs) -> Result<()> {
    let client = connect(global)?;
    block_on(client.send_chat(&args.room_id, &args.message))??;
    Ok(())
}

pub fn ready(global: &GlobalArgs, args: RoomArgs) -> Result<()> {
    let client = connect(global)?;
    block_on(client.set_ready(&args.room_id))??;
    println!("Ready in {}", args.room_id);
    Ok(())
}

pub fn start(global: &GlobalArgs, args: RoomArgs) -> Result<()> {
    let client = connect(global)?;
    block_on(client.start_game(&args.room_id))??;
    println!("Game started in {}", args.room_id);
    Ok(())
}

pub fn leave(global: &GlobalArgs, args: RoomArgs) -> Result<()> {
    let client = connect(global)?;
    block_on(client.leave_room(&args.room_id))??;
    println!("Left {}", args.room_id);
    Ok(())
}

pub fn color(global: &GlobalArgs, args: ColorArgs) -> Result<()> {
    let client = connect(global)?;
    if !args.color.is_player_color() {
        anyhow::bail!("{} is not a player color", args.color);
    }
    block_on(client.change_color(&args.room_id, args.color))??;
    println!("Now playing {}", args.color);
    Ok(())
}

// ============================================================================
// LEVEL 2 - SESSION
// ============================================================================

fn current_user(client: &ApiClient) -> Result<usize> {
    client
        .session()
        .bundle()
        .map(|bundle| bundle.user_id)
        .context("Not logged in, run `hexagram login <name>` first")
}

// ============================================================================
// LEVEL 3 - FORMATTING
// ============================================================================

fn format_path(path: &[Cell]) -> String {
    path.iter()
        .map(|cell| format!("({})", cell))
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_path() {
        let path = [Cell::new(3, 0), Cell::new(5, 5)];
        assert_eq!(format_path(&path), "(3,0) -> (5,5)");
    }

    #[test]
    fn test_current_user_needs_session() {
        let client = ApiClient::new(
            hexagram_client::ClientConfig::default(),
            std::sync::Arc::new(hexagram_client::Session::in_memory()),
        );
        assert!(current_user(&client).is_err());
    }
}
