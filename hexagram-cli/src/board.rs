//! Board command - print the hexagram and its color legend
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: render_board(), render_key(), describe_cell()
//! - Level 3: symbol() - formatting

use anyhow::Result;
use clap::Args;

use hexagram_core::board::{row_len, HOME_SIZE};
use hexagram_core::{color_at, is_in_corner, legend, Cell, Color, COLORS, ROWS, ROW_LENGTHS};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct BoardArgs {
    /// Describe a single cell instead of drawing the board
    #[arg(long, value_name = "ROW,COL")]
    pub cell: Option<Cell>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: BoardArgs) -> Result<()> {
    match args.cell {
        Some(cell) => println!("{}", describe_cell(cell)?),
        None => {
            for line in render_board() {
                println!("{}", line);
            }
            println!();
            for line in render_key() {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - RENDERING
// ============================================================================

/// One text line per row, centered on the widest row
fn render_board() -> Vec<String> {
    let widest = ROW_LENGTHS.iter().copied().max().unwrap_or(0);

    (0..ROWS)
        .map(|row| {
            let len = row_len(row).unwrap_or(0);
            let cells: Vec<String> = (0..len)
                .filter_map(|col| color_at(row, col).ok())
                .map(|color| symbol(color).to_string())
                .collect();
            format!("{}{}", " ".repeat(widest - len), cells.join(" "))
                .trim_end()
                .to_string()
        })
        .collect()
}

fn render_key() -> Vec<String> {
    COLORS
        .iter()
        .map(|info| {
            format!(
                "{}  {} {:<7} {:<8} {} ink",
                symbol(info.color),
                info.color.code(),
                info.name,
                info.value,
                info.ink.as_str()
            )
        })
        .collect()
}

fn describe_cell(cell: Cell) -> Result<String> {
    let entry = legend(cell.row, cell.col)?;
    let area = if is_in_corner(cell.row, cell.col) {
        format!("home triangle of {} ({} cells)", entry.name, HOME_SIZE)
    } else {
        "neutral field".to_string()
    };
    Ok(format!(
        "{}: {} on {} with {} ink",
        cell,
        area,
        entry.value,
        entry.ink.as_str()
    ))
}

// ============================================================================
// LEVEL 3 - FORMATTING
// ============================================================================

fn symbol(color: Color) -> char {
    match color {
        Color::Neutral => '.',
        other => other
            .name()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?'),
    }
}
