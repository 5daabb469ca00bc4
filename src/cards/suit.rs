#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suit {
    #[default]
    C = 0,
    D = 1,
    H = 2,
    S = 3,
}

impl Suit {
    pub const fn all() -> [Suit; 4] {
        [Suit::C, Suit::D, Suit::H, Suit::S]
    }
    /// lowercase letter, as it reads inside hand descriptions ("Flush, Ad High")
    pub fn letter(&self) -> char {
        match self {
            Suit::C => 'c',
            Suit::D => 'd',
            Suit::H => 'h',
            Suit::S => 's',
        }
    }
}

/// u8 isomorphism
impl From<u8> for Suit {
    fn from(n: u8) -> Suit {
        match n % 4 {
            0 => Suit::C,
            1 => Suit::D,
            2 => Suit::H,
            _ => Suit::S,
        }
    }
}
impl From<Suit> for u8 {
    fn from(s: Suit) -> u8 {
        s as u8
    }
}

/// u64 injection
/// every card of this suit lit across the 13 rank nibbles
impl From<Suit> for u64 {
    fn from(s: Suit) -> u64 {
        0x0001111111111111 << u8::from(s)
    }
}

/// str isomorphism
impl TryFrom<&str> for Suit {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_uppercase().as_str() {
            "C" => Ok(Suit::C),
            "D" => Ok(Suit::D),
            "H" => Ok(Suit::H),
            "S" => Ok(Suit::S),
            _ => Err(anyhow::anyhow!("invalid suit {:?}", s)),
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Suit::C => "C",
                Suit::D => "D",
                Suit::H => "H",
                Suit::S => "S",
            }
        )
    }
}
