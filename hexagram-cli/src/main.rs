//! HEXAGRAM CLI - Command-line client for the game backend
//!
//! Commands:
//! - login / refresh / logout / whoami: Manage the stored session
//! - rooms / create-room / room / players / state: Inspect rooms
//! - validate / move / chat / ready / start / leave / color: Play in a room
//! - watch: Follow a room's live updates
//! - board: Print the board legend
//! - health: Check the backend

mod board;
mod context;
mod play;
mod rooms;
mod session;
mod watch;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use context::GlobalArgs;

#[derive(Parser)]
#[command(name = "hexagram")]
#[command(about = "HEXAGRAM Chinese-checkers client")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a player name and store the session
    Login(session::LoginArgs),
    /// Exchange the stored token for a fresh one
    Refresh,
    /// Forget the stored session
    Logout,
    /// Show the stored session
    Whoami,
    /// List all rooms
    Rooms,
    /// Create a room
    CreateRoom(rooms::CreateRoomArgs),
    /// Show one room
    Room(rooms::RoomArgs),
    /// List the players of a room
    Players(rooms::RoomArgs),
    /// Show the board occupation of a room
    State(rooms::RoomArgs),
    /// Ask the server whether a path is a legal move
    Validate(play::PathArgs),
    /// Play a move
    Move(play::PathArgs),
    /// Send a chat message
    Chat(play::ChatArgs),
    /// Mark yourself ready
    Ready(rooms::RoomArgs),
    /// Start the game
    Start(rooms::RoomArgs),
    /// Leave a room
    Leave(rooms::RoomArgs),
    /// Pick another color
    Color(play::ColorArgs),
    /// Follow a room's live updates
    Watch(watch::WatchArgs),
    /// Print the board legend
    Board(board::BoardArgs),
    /// Check that the backend is up
    Health,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Login(args) => session::login(&global, args),
        Commands::Refresh => session::refresh(&global),
        Commands::Logout => session::logout(&global),
        Commands::Whoami => session::whoami(&global),
        Commands::Rooms => rooms::list(&global),
        Commands::CreateRoom(args) => rooms::create(&global, args),
        Commands::Room(args) => rooms::show(&global, args),
        Commands::Players(args) => rooms::players(&global, args),
        Commands::State(args) => rooms::state(&global, args),
        Commands::Validate(args) => play::validate(&global, args),
        Commands::Move(args) => play::make_move(&global, args),
        Commands::Chat(args) => play::chat(&global, args),
        Commands::Ready(args) => play::ready(&global, args),
        Commands::Start(args) => play::start(&global, args),
        Commands::Leave(args) => play::leave(&global, args),
        Commands::Color(args) => play::color(&global, args),
        Commands::Watch(args) => watch::run(&global, args),
        Commands::Board(args) => board::run(args),
        Commands::Health => rooms::health(&global),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexagram_core::{Cell, Color};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hexagram").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_global_defaults() {
        let cli = parse(&["rooms"]);
        assert_eq!(
            cli.global.session_file,
            std::path::PathBuf::from(".hexagram-session.json")
        );
        assert!(cli.global.base_url.is_none());
        assert!(matches!(cli.command, Commands::Rooms));
    }

    #[test]
    fn test_move_parses_cells() {
        let cli = parse(&["--base-url", "http://h:1", "move", "r1", "3,0", "5,5"]);
        assert_eq!(cli.global.base_url.as_deref(), Some("http://h:1"));
        match cli.command {
            Commands::Move(args) => {
                assert_eq!(args.room_id, "r1");
                assert_eq!(args.path, vec![Cell::new(3, 0), Cell::new(5, 5)]);
            }
            _ => panic!("expected move"),
        }
    }

    #[test]
    fn test_color_accepts_name_or_code() {
        for raw in ["green", "2"] {
            match parse(&["color", "r1", raw]).command {
                Commands::Color(args) => assert_eq!(args.color, Color::Green),
                _ => panic!("expected color"),
            }
        }
    }

    #[test]
    fn test_rejects_bad_cell() {
        let result = Cli::try_parse_from(["hexagram", "validate", "r1", "3;0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_move_needs_a_path() {
        assert!(Cli::try_parse_from(["hexagram", "move", "r1"]).is_err());
    }
}
