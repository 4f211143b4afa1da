use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightCyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const VERIFIED: Color = Color::Green;
pub const FAILED: Color = Color::Red;
pub const REFERENCE: Color = Color::Yellow;
