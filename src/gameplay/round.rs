use serde::Deserialize;
use serde::Serialize;

/// Phase of a hand.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Round {
    #[default]
    Ante,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    End,
}

impl Round {
    pub const fn all() -> [Round; 7] {
        [
            Round::Ante,
            Round::Preflop,
            Round::Flop,
            Round::Turn,
            Round::River,
            Round::Showdown,
            Round::End,
        ]
    }
    pub fn next(&self) -> Round {
        match self {
            Round::Ante => Round::Preflop,
            Round::Preflop => Round::Flop,
            Round::Flop => Round::Turn,
            Round::Turn => Round::River,
            Round::River => Round::Showdown,
            Round::Showdown | Round::End => Round::End,
        }
    }
    /// community cards turned face up on entering this round
    pub fn n_revealed(&self) -> usize {
        match self {
            Round::Flop => 3,
            Round::Turn | Round::River => 1,
            _ => 0,
        }
    }
    /// community cards on the table during this round
    pub fn n_board(&self) -> usize {
        match self {
            Round::Ante | Round::Preflop => 0,
            Round::Flop => 3,
            Round::Turn => 4,
            Round::River | Round::Showdown | Round::End => 5,
        }
    }
    pub fn is_betting(&self) -> bool {
        matches!(
            self,
            Round::Preflop | Round::Flop | Round::Turn | Round::River
        )
    }
}

impl TryFrom<&str> for Round {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Round::all()
            .into_iter()
            .find(|r| r.to_string() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown round {:?}", s))
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Round::Ante => write!(f, "ante"),
            Round::Preflop => write!(f, "preflop"),
            Round::Flop => write!(f, "flop"),
            Round::Turn => write!(f, "turn"),
            Round::River => write!(f, "river"),
            Round::Showdown => write!(f, "showdown"),
            Round::End => write!(f, "end"),
        }
    }
}
