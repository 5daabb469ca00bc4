use super::status::Status;
use crate::Chips;
use crate::Position;
use crate::cards::hole::Hole;

/// A seated player's private and public state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    address: String,
    position: Position,
    stack: Chips,
    stake: Chips,
    spent: Chips,
    status: Status,
    hole: Option<Hole>,
    timeout: u32,
    signature: String,
}

impl Seat {
    pub fn new(address: String, position: Position, stack: Chips) -> Seat {
        Seat {
            address,
            position,
            stack,
            stake: 0,
            spent: 0,
            status: Status::Active,
            hole: None,
            timeout: 0,
            signature: String::from(crate::ZERO_SIGNATURE),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
    pub fn position(&self) -> Position {
        self.position
    }
    /// chips behind
    pub fn stack(&self) -> Chips {
        self.stack
    }
    /// chips put in this round, `sumOfBets` on the wire
    pub fn stake(&self) -> Chips {
        self.stake
    }
    /// chips put in this hand
    pub fn spent(&self) -> Chips {
        self.spent
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn hole(&self) -> Option<Hole> {
        self.hole
    }
    pub fn timeout(&self) -> u32 {
        self.timeout
    }
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// move chips from the stack into the pot, going all-in when empty
    pub fn bet(&mut self, bet: Chips) {
        debug_assert!(bet <= self.stack);
        let bet = std::cmp::min(bet, self.stack);
        self.stack -= bet;
        self.stake += bet;
        self.spent += bet;
        if self.stack == 0 && self.status == Status::Active {
            self.status = Status::AllIn;
        }
    }
    pub fn win(&mut self, winnings: Chips) {
        self.stack += winnings;
    }
    pub fn top_up(&mut self, chips: Chips) {
        self.stack += chips;
    }
    /// empty the stack, returning what was in it
    pub fn cash_out(&mut self) -> Chips {
        std::mem::take(&mut self.stack)
    }
    pub fn tick(&mut self) {
        self.timeout += 1;
    }

    pub fn reset_state(&mut self, status: Status) {
        self.status = status;
    }
    pub fn reset_cards(&mut self, hole: Option<Hole>) {
        self.hole = hole;
    }
    pub fn reset_stake(&mut self) {
        self.stake = 0;
    }
    pub fn reset_spent(&mut self) {
        self.spent = 0;
    }
    /// restore committed chips read back from a document
    pub fn reset_bets(&mut self, stake: Chips, spent: Chips) {
        self.stake = stake;
        self.spent = spent;
    }
    pub fn reset_timeout(&mut self, timeout: u32) {
        self.timeout = timeout;
    }
    pub fn reset_signature(&mut self, signature: String) {
        self.signature = signature;
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let hole = self
            .hole
            .map(|h| h.to_string())
            .unwrap_or_else(|| String::from("-- --"));
        write!(
            f,
            "{:<3}{}  {}  {:>24} {:>22}",
            self.position,
            self.status.glyph(),
            hole,
            self.stack,
            self.stake,
        )
    }
}
