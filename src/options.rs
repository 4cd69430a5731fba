use crate::error::ManuscriptError;
use std::fmt;
use std::str::FromStr;

/// Generic family used when no font family is given
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// How large glyphs are drawn relative to the base font size of the layout
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextSize {
    /// 小
    Small,
    /// 中
    #[default]
    Medium,
    /// 大
    Large,
}

impl TextSize {
    const TABLE: [(TextSize, f32, &'static str, &'static str); 3] = [
        (TextSize::Small, 0.8, "small", "小"),
        (TextSize::Medium, 1.0, "medium", "中"),
        (TextSize::Large, 1.4, "large", "大"),
    ];

    pub fn multiplier(self) -> f32 {
        Self::TABLE
            .iter()
            .find(|(size, ..)| *size == self)
            .map(|&(_, m, ..)| m)
            .unwrap_or(1.0)
    }
}

impl FromStr for TextSize {
    type Err = ManuscriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::TABLE
            .iter()
            .find(|(_, _, name, glyph)| name.eq_ignore_ascii_case(s) || *glyph == s)
            .map(|&(size, ..)| size)
            .ok_or_else(|| ManuscriptError::UnknownTextSize(s.to_string()))
    }
}

impl fmt::Display for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = Self::TABLE
            .iter()
            .find(|(size, ..)| size == self)
            .map(|&(_, _, name, _)| name)
            .unwrap_or("medium");
        f.write_str(name)
    }
}

/// The ruling inside each cell
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GridPattern {
    /// 口: plain squares
    #[default]
    Plain,
    /// 田: squares with a dashed centre cross
    Cross,
    /// 米: squares with a dashed centre cross and both diagonals
    CrossDiagonal,
}

impl GridPattern {
    const TABLE: [(GridPattern, &'static str, &'static str); 3] = [
        (GridPattern::Plain, "plain", "口"),
        (GridPattern::Cross, "tian", "田"),
        (GridPattern::CrossDiagonal, "mi", "米"),
    ];

    /// Dashed guide lines drawn inside every cell
    pub fn dashed_lines_per_cell(self) -> usize {
        match self {
            GridPattern::Plain => 0,
            GridPattern::Cross => 2,
            GridPattern::CrossDiagonal => 4,
        }
    }

    /// The single glyph the pattern is named after
    pub fn glyph(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(pattern, ..)| *pattern == self)
            .map(|&(_, _, glyph)| glyph)
            .unwrap_or("口")
    }
}

impl FromStr for GridPattern {
    type Err = ManuscriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let alias = match s.to_ascii_lowercase().as_str() {
            "square" => Some(GridPattern::Plain),
            "cross" | "center-cross" => Some(GridPattern::Cross),
            "cross-diagonal" | "center-cross+diagonal" => Some(GridPattern::CrossDiagonal),
            _ => None,
        };
        alias
            .or_else(|| {
                Self::TABLE
                    .iter()
                    .find(|(_, name, glyph)| name.eq_ignore_ascii_case(s) || *glyph == s)
                    .map(|&(pattern, ..)| pattern)
            })
            .ok_or_else(|| ManuscriptError::UnknownGridPattern(s.to_string()))
    }
}

impl fmt::Display for GridPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = Self::TABLE
            .iter()
            .find(|(pattern, ..)| pattern == self)
            .map(|&(_, name, _)| name)
            .unwrap_or("plain");
        f.write_str(name)
    }
}

/// Everything a user can choose about how the paper looks. These are the only
/// inputs besides the text that affect the output.
///
/// Colours and the font family are handed to the drawing backend untouched;
/// a backend that cannot make sense of them substitutes its own default.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub font_family: String,
    pub text_size: TextSize,
    pub text_colour: String,
    pub paper_colour: String,
    pub grid_colour: String,
    pub grid_pattern: GridPattern,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            text_size: TextSize::Medium,
            text_colour: "#000".to_string(),
            paper_colour: "#fff".to_string(),
            grid_colour: "#3C3".to_string(),
            grid_pattern: GridPattern::Plain,
        }
    }
}

impl RenderOptions {
    /// The family glyphs are drawn in: the configured one, trimmed, or the
    /// generic sans-serif family when that leaves nothing
    pub fn resolved_font_family(&self) -> &str {
        let family = self.font_family.trim();
        if family.is_empty() {
            DEFAULT_FONT_FAMILY
        } else {
            family
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_size_multipliers() {
        assert_eq!(TextSize::Small.multiplier(), 0.8);
        assert_eq!(TextSize::Medium.multiplier(), 1.0);
        assert_eq!(TextSize::Large.multiplier(), 1.4);
    }

    #[test]
    fn text_size_accepts_both_spellings() {
        assert_eq!("小".parse::<TextSize>().unwrap(), TextSize::Small);
        assert_eq!("Large".parse::<TextSize>().unwrap(), TextSize::Large);
        assert!(matches!(
            "huge".parse::<TextSize>(),
            Err(ManuscriptError::UnknownTextSize(s)) if s == "huge"
        ));
    }

    #[test]
    fn grid_pattern_accepts_glyphs_and_names() {
        assert_eq!("口".parse::<GridPattern>().unwrap(), GridPattern::Plain);
        assert_eq!("田".parse::<GridPattern>().unwrap(), GridPattern::Cross);
        assert_eq!("米".parse::<GridPattern>().unwrap(), GridPattern::CrossDiagonal);
        assert_eq!("tian".parse::<GridPattern>().unwrap(), GridPattern::Cross);
        assert_eq!(
            "center-cross+diagonal".parse::<GridPattern>().unwrap(),
            GridPattern::CrossDiagonal
        );
        assert!("dots".parse::<GridPattern>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for pattern in [GridPattern::Plain, GridPattern::Cross, GridPattern::CrossDiagonal] {
            assert_eq!(pattern.to_string().parse::<GridPattern>().unwrap(), pattern);
        }
        assert_eq!(GridPattern::CrossDiagonal.glyph(), "米");
    }

    #[test]
    fn blank_font_family_falls_back() {
        let options = RenderOptions {
            font_family: "   ".into(),
            ..Default::default()
        };
        assert_eq!(options.resolved_font_family(), "sans-serif");

        let options = RenderOptions {
            font_family: " STKaiti ".into(),
            ..Default::default()
        };
        assert_eq!(options.resolved_font_family(), "STKaiti");
    }
}
