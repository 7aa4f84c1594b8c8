use std::fmt;

use serde::Serialize;

/// Font, size and color for one class of text on the card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextStyle {
    pub font_path: String,
    /// Em size in pixels.
    pub font_size: u32,
    pub color: [u8; 3],
}

impl TextStyle {
    /// Build a style from its three parts.
    pub fn new(font_path: impl Into<String>, font_size: u32, color: [u8; 3]) -> Self {
        Self {
            font_path: font_path.into(),
            font_size,
            color,
        }
    }
}

/// Named slots in the style map. The string form doubles as the Config Store key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleRole {
    Regular,
    BoldBig,
    Semibold,
    Clock,
    Battery,
    Username,
}

impl StyleRole {
    pub const ALL: [StyleRole; 6] = [
        StyleRole::Regular,
        StyleRole::BoldBig,
        StyleRole::Semibold,
        StyleRole::Clock,
        StyleRole::Battery,
        StyleRole::Username,
    ];

    /// Config Store key, e.g. `font_regular`.
    pub fn key(self) -> &'static str {
        match self {
            StyleRole::Regular => "font_regular",
            StyleRole::BoldBig => "font_bold_big",
            StyleRole::Semibold => "font_semibold",
            StyleRole::Clock => "font_clock",
            StyleRole::Battery => "font_battery",
            StyleRole::Username => "font_username",
        }
    }

    /// Role for a Config Store key, if it names one.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.key() == key)
    }
}

impl fmt::Display for StyleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One [`TextStyle`] per [`StyleRole`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextStyles {
    pub regular: TextStyle,
    pub bold_big: TextStyle,
    pub semibold: TextStyle,
    pub clock: TextStyle,
    pub battery: TextStyle,
    pub username: TextStyle,
}

impl Default for TextStyles {
    fn default() -> Self {
        const BLACK: [u8; 3] = [0, 0, 0];
        Self {
            regular: TextStyle::new("fonts/HarmonyOS_Sans_SC_Medium.ttf", 36, BLACK),
            bold_big: TextStyle::new("fonts/KeepSans-ExtraBold.otf", 180, BLACK),
            semibold: TextStyle::new("fonts/KeepSans-Bold.otf", 65, BLACK),
            clock: TextStyle::new("fonts/HarmonyOS_Sans_Regular.ttf", 40, BLACK),
            battery: TextStyle::new("fonts/HarmonyOS_Sans_Regular.ttf", 30, BLACK),
            username: TextStyle::new("fonts/HarmonyOS_Sans_Regular.ttf", 30, BLACK),
        }
    }
}

impl TextStyles {
    /// Style assigned to `role`.
    pub fn get(&self, role: StyleRole) -> &TextStyle {
        match role {
            StyleRole::Regular => &self.regular,
            StyleRole::BoldBig => &self.bold_big,
            StyleRole::Semibold => &self.semibold,
            StyleRole::Clock => &self.clock,
            StyleRole::Battery => &self.battery,
            StyleRole::Username => &self.username,
        }
    }

    /// Mutable style assigned to `role`.
    pub fn get_mut(&mut self, role: StyleRole) -> &mut TextStyle {
        match role {
            StyleRole::Regular => &mut self.regular,
            StyleRole::BoldBig => &mut self.bold_big,
            StyleRole::Semibold => &mut self.semibold,
            StyleRole::Clock => &mut self.clock,
            StyleRole::Battery => &mut self.battery,
            StyleRole::Username => &mut self.username,
        }
    }

    /// Every role with its style, in [`StyleRole::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleRole, &TextStyle)> {
        StyleRole::ALL.into_iter().map(|r| (r, self.get(r)))
    }
}
