//! Color categories and their legend definitions

use serde::{Deserialize, Serialize};

use crate::board::BoardError;

/// Color category of a board cell or a player.
///
/// Serialized as its integer code, which is what the server speaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Color {
    Neutral = 0,
    Purple = 1,
    Green = 2,
    Orange = 3,
    Yellow = 4,
    Red = 5,
    Blue = 6,
}

/// Ink used for legend text drawn on top of a color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ink {
    Black,
    White,
}

impl Ink {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ink::Black => "black",
            Ink::White => "white",
        }
    }
}

/// Legend definition of a color category
#[derive(Clone, Debug)]
pub struct ColorInfo {
    pub color: Color,
    /// Display name
    pub name: &'static str,
    /// CSS color name or hex code used to paint the cell
    pub value: &'static str,
    /// Contrasting ink for legend text
    pub ink: Ink,
}

impl ColorInfo {
    const fn new(color: Color, name: &'static str, value: &'static str, ink: Ink) -> Self {
        Self {
            color,
            name,
            value,
            ink,
        }
    }
}

/// All 7 color categories, indexed by code
pub static COLORS: [ColorInfo; 7] = [
    ColorInfo::new(Color::Neutral, "black", "black", Ink::White),
    ColorInfo::new(Color::Purple, "purple", "purple", Ink::White),
    ColorInfo::new(Color::Green, "green", "#32BC23", Ink::Black),
    ColorInfo::new(Color::Orange, "orange", "orange", Ink::Black),
    ColorInfo::new(Color::Yellow, "yellow", "#fbff2a", Ink::Black),
    ColorInfo::new(Color::Red, "red", "red", Ink::White),
    ColorInfo::new(Color::Blue, "blue", "blue", Ink::White),
];

/// The six player colors, in code order
pub const PLAYER_COLORS: [Color; 6] = [
    Color::Purple,
    Color::Green,
    Color::Orange,
    Color::Yellow,
    Color::Red,
    Color::Blue,
];

impl Color {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn info(self) -> &'static ColorInfo {
        &COLORS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn value(self) -> &'static str {
        self.info().value
    }

    pub fn contrast(self) -> Ink {
        self.info().ink
    }

    pub fn is_player_color(self) -> bool {
        self != Color::Neutral
    }

    /// The home triangle on the opposite side of the board
    pub fn complementary(self) -> Color {
        match self {
            Color::Purple => Color::Yellow,
            Color::Green => Color::Red,
            Color::Orange => Color::Blue,
            Color::Yellow => Color::Purple,
            Color::Red => Color::Green,
            Color::Blue => Color::Orange,
            Color::Neutral => Color::Neutral,
        }
    }

    /// Look up a color by display name (`black` is neutral)
    pub fn from_name(name: &str) -> Option<Color> {
        COLORS
            .iter()
            .find(|info| info.name.eq_ignore_ascii_case(name))
            .map(|info| info.color)
    }
}

impl TryFrom<u8> for Color {
    type Error = BoardError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        COLORS
            .get(code as usize)
            .map(|info| info.color)
            .ok_or(BoardError::InvalidColor(code))
    }
}

impl From<Color> for u8 {
    fn from(color: Color) -> u8 {
        color.code()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Color {
    type Err = BoardError;

    /// Accepts either a display name or an integer code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.parse::<u8>() {
            return Color::try_from(code);
        }
        Color::from_name(s).ok_or_else(|| BoardError::UnknownColor(s.to_string()))
    }
}
