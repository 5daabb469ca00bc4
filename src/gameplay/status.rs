use colored::Colorize;
use serde::Deserialize;
use serde::Serialize;

/// A seat's standing in the current hand.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Active,
    Folded,
    AllIn,
    Busted,
    Showing,
    SittingOut,
}

impl Status {
    pub const fn all() -> [Status; 6] {
        [
            Status::Active,
            Status::Folded,
            Status::AllIn,
            Status::Busted,
            Status::Showing,
            Status::SittingOut,
        ]
    }
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Folded => "folded",
            Status::AllIn => "all-in",
            Status::Busted => "busted",
            Status::Showing => "showing",
            Status::SittingOut => "sitting-out",
        }
    }
    /// single colored letter for console tables
    pub fn glyph(&self) -> colored::ColoredString {
        match self {
            Status::Active => "P".normal(),
            Status::Folded => "F".red(),
            Status::AllIn => "S".magenta(),
            Status::Busted => "B".bright_black(),
            Status::Showing => "W".green(),
            Status::SittingOut => "O".bright_black(),
        }
    }
}

impl TryFrom<&str> for Status {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Status::all()
            .into_iter()
            .find(|x| x.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown status {:?}", s))
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
