//! # Settings
//! Formatting toggles of [PromptBuilder::build](crate::prompt::PromptBuilder::build), decoded from a short marker string.
//!
//! | Marker | Flag |
//! |---|---|
//! | `c` | separate every character of the user's prompt with the character separator |
//! | `f` | put the user's prompt before the instructions |
//! | `p` | wrap the user's prompt between two lines of the paragraph separator |
//! | `r` | introduce the role of the assistant first |
//!
//! A flag is on iff its marker occurs anywhere in the string, so `"rp"`, `"pr"` and `"rpp"` decode to the same value.
//! Any other character is ignored.

use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;

pub const CHARACTER_SEPARATE: char = 'c';
pub const PROMPT_FIRST: char = 'f';
pub const PARAGRAPH_SEPARATE: char = 'p';
pub const INTRODUCE_ROLE: char = 'r';

/// Independent formatting flags. All 16 combinations are legal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Settings {
    pub character_separate: bool,
    pub prompt_first: bool,
    pub paragraph_separate: bool,
    pub introduce_role: bool,
}

impl Settings {
    /// Decode flags from a marker string.
    pub fn parse(markers: &str) -> Self {
        let mut settings = Self::default();
        for marker in markers.chars() {
            match marker {
                CHARACTER_SEPARATE => settings.character_separate = true,
                PROMPT_FIRST => settings.prompt_first = true,
                PARAGRAPH_SEPARATE => settings.paragraph_separate = true,
                INTRODUCE_ROLE => settings.introduce_role = true,
                _ => {}
            }
        }
        settings
    }

    /// Whether the user's prompt gets the "Here is the user's prompt:" line.
    #[inline]
    pub fn needs_intro(&self) -> bool {
        self.character_separate || self.paragraph_separate || self.introduce_role
    }

    /// Every combination of flags, from none (`""`) to all of them (`"cfpr"`).
    pub fn all() -> Vec<Self> {
        (0u8..16)
            .map(|bits| Self {
                character_separate: bits & 0b0001 != 0,
                prompt_first: bits & 0b0010 != 0,
                paragraph_separate: bits & 0b0100 != 0,
                introduce_role: bits & 0b1000 != 0,
            })
            .collect()
    }
}

impl From<&str> for Settings {
    fn from(markers: &str) -> Self {
        Self::parse(markers)
    }
}

impl From<&String> for Settings {
    fn from(markers: &String) -> Self {
        Self::parse(markers)
    }
}

impl FromStr for Settings {
    type Err = std::convert::Infallible;

    fn from_str(markers: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(markers))
    }
}

/// Canonical marker string, markers in `cfpr` order.
impl fmt::Display for Settings {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let flags = [
            (self.character_separate, CHARACTER_SEPARATE),
            (self.prompt_first, PROMPT_FIRST),
            (self.paragraph_separate, PARAGRAPH_SEPARATE),
            (self.introduce_role, INTRODUCE_ROLE),
        ];
        for (on, marker) in flags {
            if on {
                write!(f, "{}", marker)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_settings {
    use std::collections::HashSet;
    use super::Settings;

    #[test]
    fn test_presence_based() {
        assert_eq!(Settings::parse("rp"), Settings::parse("pr"));
        assert_eq!(Settings::parse("rp"), Settings::parse("rpp"));
        let settings = Settings::parse("xrzp");
        assert!(settings.introduce_role);
        assert!(settings.paragraph_separate);
        assert!(!settings.character_separate);
        assert!(!settings.prompt_first);
    }

    #[test]
    fn test_needs_intro() {
        assert!(!Settings::parse("").needs_intro());
        assert!(!Settings::parse("f").needs_intro());
        assert!(Settings::parse("c").needs_intro());
        assert!(Settings::parse("p").needs_intro());
        assert!(Settings::parse("r").needs_intro());
    }

    #[test]
    fn test_all_combinations() {
        let all = Settings::all();
        assert_eq!(16, all.len());
        let distinct: HashSet<Settings> = all.iter().copied().collect();
        assert_eq!(16, distinct.len());
        assert_eq!(Settings::default(), all[0]);
        assert_eq!("cfpr", all[15].to_string());
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!("pr", Settings::parse("rpp").to_string());
        for settings in Settings::all() {
            assert_eq!(settings, Settings::parse(&settings.to_string()));
        }
    }
}
