//! Fixed catalog of design styles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::RedesignError;

/// Aesthetic style a room can be redesigned into.
///
/// The set is closed. Declaration order is the display order of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignStyle {
    Modern,
    Minimalist,
    Scandinavian,
    Industrial,
    Luxury,
    Bohemian,
    Japandi,
}

impl DesignStyle {
    /// Every style, in catalog order.
    pub const CATALOG: [DesignStyle; 7] = [
        DesignStyle::Modern,
        DesignStyle::Minimalist,
        DesignStyle::Scandinavian,
        DesignStyle::Industrial,
        DesignStyle::Luxury,
        DesignStyle::Bohemian,
        DesignStyle::Japandi,
    ];

    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            DesignStyle::Modern => "modern",
            DesignStyle::Minimalist => "minimalist",
            DesignStyle::Scandinavian => "scandinavian",
            DesignStyle::Industrial => "industrial",
            DesignStyle::Luxury => "luxury",
            DesignStyle::Bohemian => "bohemian",
            DesignStyle::Japandi => "japandi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DesignStyle::Modern => "Modern",
            DesignStyle::Minimalist => "Minimalist",
            DesignStyle::Scandinavian => "Scandinavian",
            DesignStyle::Industrial => "Industrial",
            DesignStyle::Luxury => "Luxury",
            DesignStyle::Bohemian => "Bohemian",
            DesignStyle::Japandi => "Japandi",
        }
    }

    /// Short description fed to the AI prompts.
    pub fn prompt_description(&self) -> &'static str {
        match self {
            DesignStyle::Modern => "clean lines, neutral palette with bold accents, sleek furniture",
            DesignStyle::Minimalist => "uncluttered surfaces, monochrome tones, only essential furniture",
            DesignStyle::Scandinavian => "light woods, white walls, cozy textiles, natural light",
            DesignStyle::Industrial => "exposed brick and metal, raw finishes, open layout",
            DesignStyle::Luxury => "rich materials, marble and brass, statement lighting",
            DesignStyle::Bohemian => "layered patterns, plants, eclectic warm colors",
            DesignStyle::Japandi => "japanese restraint meets scandinavian warmth, low furniture, natural materials",
        }
    }
}

impl fmt::Display for DesignStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DesignStyle {
    type Err = RedesignError;

    /// Exact, case-sensitive match against the catalog identifiers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DesignStyle::CATALOG
            .iter()
            .copied()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| RedesignError::UnknownStyle(s.to_string()))
    }
}
