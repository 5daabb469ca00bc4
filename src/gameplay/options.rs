use crate::Chips;
use serde::Deserialize;
use serde::Serialize;

/// Table format. Stored as the document's root `type`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    #[default]
    Cash,
    SitAndGo,
    Tournament,
}

impl Format {
    /// busted seats are placed and paid, and the table ends with one survivor
    pub fn is_elimination(&self) -> bool {
        matches!(self, Format::SitAndGo | Format::Tournament)
    }
}

impl TryFrom<&str> for Format {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "cash" => Ok(Format::Cash),
            "sit-and-go" => Ok(Format::SitAndGo),
            "tournament" => Ok(Format::Tournament),
            _ => Err(anyhow::anyhow!("unknown table type {:?}", s)),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Format::Cash => write!(f, "cash"),
            Format::SitAndGo => write!(f, "sit-and-go"),
            Format::Tournament => write!(f, "tournament"),
        }
    }
}

/// House cut taken from pots above a free threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rake {
    pub free_threshold: Chips,
    pub percentage: u32,
    pub cap: Chips,
    pub owner: Option<String>,
}

impl Rake {
    /// the cut from a hand whose pots total `total`
    pub fn take(&self, total: Chips) -> Chips {
        if total > self.free_threshold {
            std::cmp::min(total * self.percentage as Chips / 100, self.cap)
        } else {
            0
        }
    }
}

/// Immutable per-table configuration, the document's `gameOptions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub min_buy_in: Chips,
    pub max_buy_in: Chips,
    pub min_players: usize,
    pub max_players: usize,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub timeout: u64,
    pub rake: Option<Rake>,
}

impl Options {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.small_blind == 0 || self.big_blind == 0 {
            anyhow::bail!("blinds must be positive");
        }
        if self.small_blind > self.big_blind {
            anyhow::bail!("small blind exceeds big blind");
        }
        if self.min_buy_in == 0 || self.min_buy_in > self.max_buy_in {
            anyhow::bail!("buy-in range is empty");
        }
        if self.min_players < crate::MIN_SEATS
            || self.max_players > crate::MAX_SEATS
            || self.min_players > self.max_players
        {
            anyhow::bail!(
                "seat counts must satisfy {} <= min <= max <= {}",
                crate::MIN_SEATS,
                crate::MAX_SEATS
            );
        }
        if let Some(rake) = self.rake.as_ref() {
            if rake.percentage > 100 {
                anyhow::bail!("rake percentage above 100");
            }
        }
        Ok(())
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_buy_in: 10_000_000_000_000_000,
            max_buy_in: 1_000_000_000_000_000_000,
            min_players: crate::MIN_SEATS,
            max_players: crate::MAX_SEATS,
            small_blind: 10_000_000_000_000_000,
            big_blind: 20_000_000_000_000_000,
            timeout: crate::DEFAULT_TIMEOUT,
            rake: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Options::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_blinds() {
        let options = Options {
            small_blind: 30,
            big_blind: 20,
            ..Options::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn rejects_bad_seat_counts() {
        let options = Options {
            max_players: 10,
            ..Options::default()
        };
        assert!(options.validate().is_err());
        let options = Options {
            min_players: 4,
            max_players: 3,
            ..Options::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn rake_is_capped() {
        let rake = Rake {
            free_threshold: 100,
            percentage: 5,
            cap: 30,
            owner: None,
        };
        assert_eq!(rake.take(100), 0);
        assert_eq!(rake.take(200), 10);
        assert_eq!(rake.take(10_000), 30);
    }

    #[test]
    fn format_strings() {
        assert_eq!(Format::SitAndGo.to_string(), "sit-and-go");
        assert_eq!(Format::try_from("tournament").unwrap(), Format::Tournament);
        assert!(Format::try_from("limit").is_err());
    }
}
