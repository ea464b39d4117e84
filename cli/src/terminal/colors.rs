use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 102, g: 217, b: 239 };
pub const ACCENT: Color = Color::TrueColor { r: 249, g: 38, b: 114 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 220, g: 220, b: 220 };
pub const IPV4_ADDR: Color = Color::TrueColor { r: 166, g: 226, b: 46 };
