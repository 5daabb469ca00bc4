use super::action::Action;
use super::action::ActionKind;
use super::error::Error;
use super::ledger::Ledger;
use super::legal::Legal;
use super::options::Format;
use super::options::Options;
use super::payout::Payouts;
use super::pot::Pot;
use super::record::Record;
use super::request::Receipt;
use super::request::Request;
use super::round::Round;
use super::seat::Seat;
use super::settlement::Settlement;
use super::showdown::Showdown;
use super::status::Status;
use super::winner::Placement;
use super::winner::Winner;
use crate::Chips;
use crate::Position;
use crate::cards::card::Card;
use crate::cards::deck::Deck;
use crate::cards::evaluation::Evaluation;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// The raw parts of a table, as read back from a state document.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub address: String,
    pub format: Format,
    pub options: Options,
    pub seats: Vec<Seat>,
    pub deck: Deck,
    pub board: Vec<Card>,
    pub dealer: Position,
    pub sblind: Option<Position>,
    pub bblind: Option<Position>,
    pub round: Round,
    pub ledger: Ledger,
    pub action_count: u64,
    pub hand_number: u64,
    pub winners: Vec<Winner>,
    pub results: Vec<Placement>,
    pub signature: String,
}

/// Table is the authoritative state of one poker table across hands.
///
/// It owns every seat, the deck and board, and the hand's action log.
/// Its immutable methods are the rules of the game: whose turn it is,
/// what each seat may do, how the chips split. The one mutating entry
/// point is [`Table::apply`], which validates a request against those
/// rules and then plays it on a clone, so a rejected request never
/// leaves a mark.
#[derive(Debug, Clone)]
pub struct Table {
    address: String,
    format: Format,
    options: Options,
    seats: Vec<Seat>,
    deck: Deck,
    board: Vec<Card>,
    dealer: Position,
    sblind: Option<Position>,
    bblind: Option<Position>,
    round: Round,
    ledger: Ledger,
    action_count: u64,
    hand_number: u64,
    winners: Vec<Winner>,
    results: Vec<Placement>,
    signature: String,
    rng: SmallRng,
}

impl Table {
    /// an empty table waiting for joins. the button starts on the last
    /// seat so the first hand's small blind is the lowest seat.
    pub fn new(address: impl Into<String>, format: Format, options: Options) -> anyhow::Result<Self> {
        options.validate()?;
        let mut rng = SmallRng::from_os_rng();
        Ok(Self {
            address: address.into(),
            format,
            dealer: options.max_players,
            options,
            seats: Vec::new(),
            deck: Deck::shuffled(&mut rng),
            board: Vec::new(),
            sblind: None,
            bblind: None,
            round: Round::Ante,
            ledger: Ledger::default(),
            action_count: 0,
            hand_number: 1,
            winners: Vec::new(),
            results: Vec::new(),
            signature: String::from(crate::ZERO_SIGNATURE),
            rng,
        })
    }
    /// reseed and reshuffle, for reproducible tables
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        if !self.ledger.dealt() {
            self.deck = Deck::shuffled(&mut self.rng);
        }
        self
    }
    /// replace the undealt deck
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.deck = deck;
        self
    }

    // accessors

    pub fn address(&self) -> &str {
        &self.address
    }
    pub fn format(&self) -> Format {
        self.format
    }
    pub fn options(&self) -> &Options {
        &self.options
    }
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
    pub fn seat(&self, position: Position) -> Option<&Seat> {
        self.seats.iter().find(|s| s.position() == position)
    }
    pub fn seat_of(&self, address: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.address() == address)
    }
    pub fn deck(&self) -> &Deck {
        &self.deck
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn dealer(&self) -> Position {
        self.dealer
    }
    pub fn sblind(&self) -> Option<Position> {
        self.sblind
    }
    pub fn bblind(&self) -> Option<Position> {
        self.bblind
    }
    pub fn round(&self) -> Round {
        self.round
    }
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
    pub fn action_count(&self) -> u64 {
        self.action_count
    }
    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }
    pub fn winners(&self) -> &[Winner] {
        &self.winners
    }
    pub fn results(&self) -> &[Placement] {
        &self.results
    }
    pub fn signature(&self) -> &str {
        &self.signature
    }
    /// the index the next accepted action will be logged under
    pub fn next_index(&self) -> u64 {
        self.action_count + self.ledger.len() as u64 + 1
    }
    /// an elimination table with a single survivor
    pub fn is_finished(&self) -> bool {
        self.results.iter().any(|p| p.place == 1)
    }
    /// hand one has been dealt, or a later hand has begun
    pub fn is_started(&self) -> bool {
        self.hand_number > 1 || self.ledger.dealt()
    }
    /// the highest stake put in this round
    pub fn high(&self) -> Chips {
        self.seats.iter().map(|s| s.stake()).max().unwrap_or(0)
    }
    /// chips on the table: stacks plus everything committed this hand
    pub fn chips(&self) -> Chips {
        match self.round {
            Round::End => self.seats.iter().map(|s| s.stack()).sum(),
            _ => self.seats.iter().map(|s| s.stack() + s.spent()).sum(),
        }
    }
    pub fn pots(&self) -> Vec<Pot> {
        let spent = self
            .seats
            .iter()
            .map(|s| (s.position(), s.spent()))
            .collect::<Vec<(Position, Chips)>>();
        let contenders = self
            .seats
            .iter()
            .filter(|s| self.is_contender(s))
            .map(|s| s.position())
            .collect::<Vec<Position>>();
        Pot::split(&spent, &contenders)
    }

    // turn order

    pub fn next_to_act(&self) -> Option<Position> {
        match self.round {
            Round::End => None,
            Round::Ante => self.next_in_ante(),
            Round::Showdown => self.next_in_showdown(),
            _ => self.next_in_betting(),
        }
    }
    fn next_in_ante(&self) -> Option<Position> {
        let sblind = self.sblind?;
        let bblind = self.bblind?;
        if !self.ledger.posted_small() {
            Some(sblind)
        } else if !self.ledger.posted_big() {
            Some(bblind)
        } else if self.may_deal() {
            self.orbit(self.after(bblind))
                .find(|p| self.seat(*p).map(|s| self.is_dealt_in(s)).unwrap_or(false))
        } else {
            None
        }
    }
    fn next_in_betting(&self) -> Option<Position> {
        let start = self
            .ledger
            .last_seat_in(self.round)
            .map(|p| self.after(p))
            .unwrap_or_else(|| self.after(self.dealer));
        self.orbit(start)
            .find(|p| self.seat(*p).map(|s| self.is_actor(s)).unwrap_or(false))
    }
    fn next_in_showdown(&self) -> Option<Position> {
        let start = match self.ledger.last_reveal() {
            Some(last) => self.after(last),
            None => self
                .ledger
                .aggressor()
                .unwrap_or_else(|| self.after(self.dealer)),
        };
        self.orbit(start).find(|p| {
            self.seat(*p)
                .map(|s| self.is_contender(s) && s.status() != Status::Showing)
                .unwrap_or(false)
        })
    }

    /// clockwise seat numbers starting at `start`, once around
    fn orbit(&self, start: Position) -> impl Iterator<Item = Position> + use<> {
        let n = self.options.max_players;
        let start = start.saturating_sub(1) % n;
        (0..n).map(move |i| (start + i) % n + 1)
    }
    /// the seat number clockwise of `position`
    fn after(&self, position: Position) -> Position {
        position % self.options.max_players + 1
    }
    fn next_eligible(&self, from: Position) -> Option<Position> {
        self.orbit(self.after(from))
            .find(|p| self.seat(*p).map(Self::is_eligible).unwrap_or(false))
    }

    // seat predicates

    /// may be dealt into, or post a blind for, the next hand
    fn is_eligible(seat: &Seat) -> bool {
        seat.status() == Status::Active && seat.stack() > 0
    }
    /// part of the current hand
    fn is_dealt_in(&self, seat: &Seat) -> bool {
        match self.ledger.dealt() {
            true => {
                seat.hole().is_some()
                    && matches!(
                        seat.status(),
                        Status::Active | Status::AllIn | Status::Showing | Status::Folded
                    )
            }
            false => {
                matches!(seat.status(), Status::Active | Status::AllIn)
                    && seat.stack() + seat.spent() > 0
            }
        }
    }
    /// still able to win chips this hand
    fn is_contender(&self, seat: &Seat) -> bool {
        self.is_dealt_in(seat)
            && matches!(
                seat.status(),
                Status::Active | Status::AllIn | Status::Showing
            )
    }
    /// still able to make betting decisions this hand
    fn is_actor(&self, seat: &Seat) -> bool {
        self.is_contender(seat) && seat.status() == Status::Active && seat.stack() > 0
    }
    /// has something at stake in a live hand
    fn is_involved(&self, seat: &Seat) -> bool {
        match self.round {
            Round::End => false,
            Round::Ante => seat.spent() > 0,
            _ => self.is_contender(seat),
        }
    }
    fn contenders(&self) -> Vec<&Seat> {
        self.seats.iter().filter(|s| self.is_contender(s)).collect()
    }
    fn n_eligible(&self) -> usize {
        self.seats.iter().filter(|s| Self::is_eligible(s)).count()
    }

    // round predicates

    fn may_deal(&self) -> bool {
        self.round == Round::Ante
            && !self.ledger.dealt()
            && self.ledger.posted_small()
            && self.ledger.posted_big()
            && self.seats.iter().filter(|s| self.is_dealt_in(s)).count() >= crate::MIN_SEATS
    }
    /// every actor has matched the high bet and acted since it last went up,
    /// or nobody is left who could change it
    fn is_betting_over(&self) -> bool {
        let high = self.high();
        let actors = self
            .seats
            .iter()
            .filter(|s| self.is_actor(s))
            .collect::<Vec<&Seat>>();
        match actors.len() {
            0 => true,
            1 => actors.iter().all(|s| s.stake() >= high),
            _ => {
                let betting = self.ledger.betting(self.round, self.options.big_blind);
                actors
                    .iter()
                    .all(|s| s.stake() == high && betting.acted.contains(&s.position()))
            }
        }
    }
    fn is_showdown_over(&self) -> bool {
        self.contenders()
            .iter()
            .all(|s| s.status() == Status::Showing)
    }

    // legal actions

    /// every action `position` may take right now
    pub fn legal(&self, position: Position) -> Vec<Legal> {
        let Some(seat) = self.seat(position) else {
            return Vec::new();
        };
        let index = self.next_index();
        let mut options = Vec::new();
        match self.round {
            Round::Ante => options.extend(self.ante_options(seat)),
            Round::Showdown if self.next_to_act() == Some(position) => {
                options.extend(self.showdown_options())
            }
            round if round.is_betting() && self.next_to_act() == Some(position) => {
                options.extend(self.betting_options(seat))
            }
            _ => {}
        }
        if !self.is_involved(seat) {
            options.extend(self.meta_options(seat));
        }
        options
            .into_iter()
            .map(|(kind, min, max)| Legal {
                kind,
                min,
                max,
                index,
            })
            .collect()
    }
    fn ante_options(&self, seat: &Seat) -> Vec<(ActionKind, Chips, Chips)> {
        let mut options = Vec::new();
        let position = Some(seat.position());
        if self.bblind.is_some() && !self.ledger.posted_small() && position == self.sblind {
            let post = std::cmp::min(self.options.small_blind, seat.stack());
            options.push((ActionKind::PostSmallBlind, post, post));
        }
        if self.ledger.posted_small() && !self.ledger.posted_big() && position == self.bblind {
            let post = std::cmp::min(self.options.big_blind, seat.stack());
            options.push((ActionKind::PostBigBlind, post, post));
        }
        if self.may_deal() && self.is_dealt_in(seat) {
            options.push((ActionKind::Deal, 0, 0));
        }
        options
    }
    fn betting_options(&self, seat: &Seat) -> Vec<(ActionKind, Chips, Chips)> {
        let mut options = Vec::new();
        let high = self.high();
        let stack = seat.stack();
        let to_call = high.saturating_sub(seat.stake());
        options.push((ActionKind::Fold, 0, 0));
        if to_call == 0 {
            options.push((ActionKind::Check, 0, 0));
        }
        if to_call > 0 {
            let call = std::cmp::min(to_call, stack);
            options.push((ActionKind::Call, call, call));
        }
        if high == 0 && stack > 0 {
            let bet = std::cmp::min(self.options.big_blind, stack);
            options.push((ActionKind::Bet, bet, stack));
        }
        if high > 0 && stack > to_call {
            let increment = self
                .ledger
                .betting(self.round, self.options.big_blind)
                .increment;
            let raise = std::cmp::min(to_call + increment, stack);
            options.push((ActionKind::Raise, raise, stack));
        }
        if stack > 0 {
            options.push((ActionKind::AllIn, stack, stack));
        }
        options
    }
    fn showdown_options(&self) -> Vec<(ActionKind, Chips, Chips)> {
        let mut options = vec![(ActionKind::Show, 0, 0)];
        if self.seats.iter().any(|s| s.status() == Status::Showing) {
            options.push((ActionKind::Muck, 0, 0));
        }
        options
    }
    fn meta_options(&self, seat: &Seat) -> Vec<(ActionKind, Chips, Chips)> {
        let mut options = Vec::new();
        let cash = self.format == Format::Cash;
        match seat.status() {
            Status::SittingOut if seat.stack() > 0 => options.push((ActionKind::SitIn, 0, 0)),
            Status::SittingOut => {}
            _ => options.push((ActionKind::SitOut, 0, 0)),
        }
        if cash && seat.stack() < self.options.max_buy_in {
            options.push((ActionKind::TopUp, 1, self.options.max_buy_in - seat.stack()));
        }
        if cash && (self.round == Round::End || seat.spent() == 0) {
            options.push((ActionKind::Leave, seat.stack(), seat.stack()));
        }
        if self.round == Round::End
            && !self.is_finished()
            && self.n_eligible_next() >= self.options.min_players
        {
            options.push((ActionKind::NewHand, 0, 0));
        }
        options
    }
    /// seats that would be dealt into a fresh hand
    fn n_eligible_next(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.status() != Status::SittingOut && s.stack() > 0)
            .count()
    }

    /// the action taken for a seat that lets its clock run out:
    /// check, else fold, else post the blind, else show, else deal
    pub fn passive(&self, position: Position) -> Option<Action> {
        let legal = self.legal(position);
        let find = |kind: ActionKind| legal.iter().find(|l| l.kind == kind);
        find(ActionKind::Check)
            .map(|_| Action::Check)
            .or_else(|| find(ActionKind::Fold).map(|_| Action::Fold))
            .or_else(|| find(ActionKind::PostSmallBlind).map(|l| Action::SmallBlind(l.min)))
            .or_else(|| find(ActionKind::PostBigBlind).map(|l| Action::BigBlind(l.min)))
            .or_else(|| find(ActionKind::Show).map(|_| Action::Show))
            .or_else(|| find(ActionKind::Deal).map(|_| Action::Deal))
    }

    // application

    /// validate and apply one request. on error the table is untouched.
    pub fn apply(&mut self, request: Request) -> Result<Receipt, Error> {
        let expected = self.next_index();
        if request.index != expected {
            log::warn!(
                "[table {}] stale index {} from {}, expected {}",
                self.address,
                request.index,
                request.address,
                expected
            );
            return Err(Error::Stale {
                given: request.index,
                expected,
            });
        }
        if let Err(e) = self.validate(&request) {
            log::warn!("[table {}] rejected {}: {}", self.address, request.address, e);
            return Err(e);
        }
        let mut child = self.clone();
        let record = child.act(request)?;
        *self = child;
        Ok(Receipt {
            record,
            round: self.round,
            next_to_act: self.next_to_act(),
        })
    }
    /// apply the passive action for a seat whose clock ran out
    pub fn expire(&mut self, position: Position, timestamp: Option<u64>) -> Result<Receipt, Error> {
        let seat = self
            .seat(position)
            .ok_or_else(|| Error::Corrupt(format!("no seat {}", position)))?;
        let action = self
            .passive(position)
            .ok_or_else(|| Error::illegal(ActionKind::Fold, "nothing to time out"))?;
        let request = Request {
            timestamp,
            ..Request::new(seat.address(), action, self.next_index())
        };
        let receipt = self.apply(request)?;
        if let Some(seat) = self.seats.iter_mut().find(|s| s.position() == position) {
            seat.tick();
        }
        Ok(receipt)
    }

    fn validate(&self, request: &Request) -> Result<(), Error> {
        let kind = request.action.kind();
        if let Action::Join(position, buy_in) = request.action {
            return self.validate_join(&request.address, position, buy_in);
        }
        let seat = self
            .seat_of(&request.address)
            .ok_or_else(|| Error::Unseated(request.address.clone()))?;
        let legal = self.legal(seat.position());
        let Some(bound) = legal.iter().find(|l| l.kind == kind) else {
            let reason = match kind.is_turn_bound() && self.next_to_act() != Some(seat.position()) {
                true => String::from("out of turn"),
                false => format!("not available in {}", self.round),
            };
            return Err(Error::illegal(kind, reason));
        };
        match bound.contains(request.action.amount()) {
            true => Ok(()),
            false => Err(Error::Bounds {
                kind,
                amount: request.action.amount(),
                min: bound.min,
                max: bound.max,
            }),
        }
    }
    fn validate_join(&self, address: &str, position: Position, buy_in: Chips) -> Result<(), Error> {
        if self.seat_of(address).is_some() {
            return Err(Error::illegal(ActionKind::Join, "already seated"));
        }
        if position == 0 || position > self.options.max_players || self.seat(position).is_some() {
            return Err(Error::illegal(
                ActionKind::Join,
                format!("seat {} unavailable", position),
            ));
        }
        if self.format.is_elimination() && self.is_started() {
            return Err(Error::illegal(ActionKind::Join, "registration closed"));
        }
        if buy_in < self.options.min_buy_in || buy_in > self.options.max_buy_in {
            return Err(Error::Bounds {
                kind: ActionKind::Join,
                amount: buy_in,
                min: self.options.min_buy_in,
                max: self.options.max_buy_in,
            });
        }
        Ok(())
    }

    fn act(&mut self, request: Request) -> Result<Record, Error> {
        let position = match request.action {
            Action::Join(position, _) => position,
            _ => self
                .seat_of(&request.address)
                .map(|s| s.position())
                .ok_or_else(|| Error::Unseated(request.address.clone()))?,
        };
        let record = Record {
            address: request.address.clone(),
            seat: position,
            action: request.action,
            round: self.round,
            index: self.next_index(),
            timestamp: request.timestamp,
        };
        match request.action {
            Action::Join(position, chips) => self.sit(request.address, position, chips),
            Action::Leave(_) => self.leave(position)?,
            Action::TopUp(chips) => self.top_up(position, chips)?,
            Action::SitOut => self.seat_mut(position)?.reset_state(Status::SittingOut),
            Action::SitIn => self.sit_in(position)?,
            Action::SmallBlind(chips)
            | Action::BigBlind(chips)
            | Action::Call(chips)
            | Action::Bet(chips)
            | Action::Raise(chips)
            | Action::Shove(chips) => self.seat_mut(position)?.bet(chips),
            Action::Deal => self.deal()?,
            Action::Fold | Action::Muck => self.seat_mut(position)?.reset_state(Status::Folded),
            Action::Show => self.seat_mut(position)?.reset_state(Status::Showing),
            Action::Check => {}
            Action::NewHand => self.commence(),
        }
        if request.action != Action::NewHand {
            self.ledger.push(record.clone());
        }
        log::debug!("[table {}] {}", self.address, record);
        self.rotate_blinds();
        self.advance()?;
        Ok(record)
    }
    fn seat_mut(&mut self, position: Position) -> Result<&mut Seat, Error> {
        self.seats
            .iter_mut()
            .find(|s| s.position() == position)
            .ok_or_else(|| Error::Corrupt(format!("no seat {}", position)))
    }

    fn leave(&mut self, position: Position) -> Result<(), Error> {
        let cashed = self.seat_mut(position)?.cash_out();
        self.seats.retain(|s| s.position() != position);
        log::info!("[table {}] seat {} cashes out {}", self.address, position, cashed);
        Ok(())
    }
    fn sit(&mut self, address: String, position: Position, chips: Chips) {
        let index = self
            .seats
            .iter()
            .position(|s| s.position() > position)
            .unwrap_or(self.seats.len());
        self.seats.insert(index, Seat::new(address, position, chips));
    }
    fn top_up(&mut self, position: Position, chips: Chips) -> Result<(), Error> {
        let seat = self.seat_mut(position)?;
        seat.top_up(chips);
        if seat.status() == Status::Busted {
            seat.reset_state(Status::Active);
        }
        Ok(())
    }
    /// a seat coming back while its old cards are still live stays folded
    fn sit_in(&mut self, position: Position) -> Result<(), Error> {
        let live = self.ledger.dealt() && self.round != Round::End;
        let seat = self.seat_mut(position)?;
        match live && seat.hole().is_some() {
            true => seat.reset_state(Status::Folded),
            false => seat.reset_state(Status::Active),
        }
        Ok(())
    }

    /// blind seats follow the button until they are posted
    fn rotate_blinds(&mut self) {
        if self.round != Round::Ante || self.ledger.dealt() {
            return;
        }
        if !self.ledger.posted_small() {
            self.sblind = match self.n_eligible() >= self.options.min_players {
                true => self.next_eligible(self.dealer),
                false => None,
            };
        }
        if !self.ledger.posted_big() {
            self.bblind = self
                .sblind
                .and_then(|sblind| self.next_eligible(sblind))
                .filter(|bblind| Some(*bblind) != self.sblind);
        }
    }

    /// two passes, one card at a time, starting at the small blind
    fn deal(&mut self) -> Result<(), Error> {
        let start = self
            .sblind
            .ok_or_else(|| Error::Corrupt(String::from("deal without a small blind")))?;
        let order = self
            .orbit(start)
            .filter(|p| self.seat(*p).map(|s| self.is_dealt_in(s)).unwrap_or(false))
            .collect::<Vec<Position>>();
        let n = order.len();
        let cards = self.deck.draw(n * crate::N_HOLE)?;
        for (i, position) in order.into_iter().enumerate() {
            let hole = Hole::from((cards[i], cards[i + n]));
            self.seat_mut(position)?.reset_cards(Some(hole));
        }
        self.round = Round::Preflop;
        log::debug!("[table {}] dealt {} seats", self.address, n);
        Ok(())
    }

    /// move through rounds until someone has a decision to make
    fn advance(&mut self) -> Result<(), Error> {
        loop {
            match self.round {
                Round::Ante | Round::End => return Ok(()),
                _ if self.contenders().len() <= 1 => return self.conclude(),
                Round::Showdown if self.is_showdown_over() => return self.conclude(),
                Round::Showdown => return Ok(()),
                _ if self.is_betting_over() => self.next_round()?,
                _ => return Ok(()),
            }
        }
    }
    fn next_round(&mut self) -> Result<(), Error> {
        for seat in self.seats.iter_mut() {
            seat.reset_stake();
        }
        self.round = self.round.next();
        match self.round.n_revealed() {
            0 => {}
            n => {
                self.deck.burn()?;
                self.board.extend(self.deck.draw(n)?);
            }
        }
        log::debug!(
            "[table {}] {} {}",
            self.address,
            self.round,
            Hand::from(self.board.as_slice())
        );
        Ok(())
    }

    /// pay every pot, then retire empty stacks
    fn conclude(&mut self) -> Result<(), Error> {
        let pots = self.pots();
        let total = pots.iter().map(|p| p.amount).sum::<Chips>();
        let rake = self
            .options
            .rake
            .as_ref()
            .map(|r| r.take(total))
            .unwrap_or(0);
        let contested = self.contenders().len() > 1;
        let settlements = self
            .orbit(self.after(self.dealer))
            .filter_map(|p| self.seat(p))
            .filter(|s| s.spent() > 0 || self.is_contender(s))
            .map(|s| self.settlement(s, contested))
            .collect::<Vec<Settlement>>();
        let (settlements, winners) = Showdown::from((settlements, pots, rake)).settle();
        for settlement in settlements.iter() {
            log::debug!("[table {}] {}", self.address, settlement);
            self.seat_mut(settlement.position)?.win(settlement.reward);
        }
        if let Some(owner) = self.options.rake.as_ref().and_then(|r| r.owner.clone()) {
            if let Some(seat) = self.seats.iter_mut().find(|s| s.address() == owner) {
                seat.win(rake);
            }
        }
        for seat in self.seats.iter_mut() {
            seat.reset_stake();
        }
        for winner in winners.iter() {
            log::info!("[table {}] hand {} {}", self.address, self.hand_number, winner);
        }
        self.winners = winners;
        self.round = Round::End;
        self.eliminate();
        Ok(())
    }
    fn settlement(&self, seat: &Seat, contested: bool) -> Settlement {
        let evaluation = match (contested, seat.status(), seat.hole()) {
            (true, Status::Showing, Some(hole)) => {
                Some(Evaluation::from((hole, self.board.as_slice())))
            }
            _ => None,
        };
        Settlement {
            position: seat.position(),
            address: seat.address().to_string(),
            status: seat.status(),
            hole: seat.hole(),
            risked: seat.spent(),
            reward: 0,
            evaluation,
        }
    }

    /// busted seats finish in reverse order, smaller starting stacks lower
    fn eliminate(&mut self) {
        let mut busted = self
            .seats
            .iter()
            .filter(|s| s.stack() == 0 && s.hole().is_some() && s.status() != Status::Busted)
            .map(|s| (s.spent(), s.position()))
            .collect::<Vec<(Chips, Position)>>();
        busted.sort_unstable();
        let payouts = Payouts::new(self.options.min_buy_in, self.seats.len());
        for (_, position) in busted {
            let entrants = self.seats.len();
            let Some(seat) = self.seats.iter_mut().find(|s| s.position() == position) else {
                continue;
            };
            seat.reset_state(Status::Busted);
            log::info!("[table {}] seat {} busted", self.address, position);
            if self.format.is_elimination() {
                let place = entrants.saturating_sub(self.results.len());
                self.results.push(Placement {
                    place,
                    address: seat.address().to_string(),
                    payout: payouts.at(place),
                });
            }
        }
        if self.format.is_elimination() && !self.is_finished() {
            let alive = self
                .seats
                .iter()
                .filter(|s| s.stack() > 0)
                .collect::<Vec<&Seat>>();
            if let [champion] = alive.as_slice() {
                let payout = payouts.at(1);
                let winner = Winner {
                    address: champion.address().to_string(),
                    position: champion.position(),
                    amount: payout,
                    cards: None,
                    name: String::from(crate::TOURNAMENT_WINNER),
                    description: String::from(crate::TOURNAMENT_WINNER),
                };
                log::info!("[table {}] {} wins the tournament", self.address, winner.address);
                self.results.push(Placement {
                    place: 1,
                    address: winner.address.clone(),
                    payout,
                });
                self.winners = vec![winner];
                self.signature = String::from(crate::ZERO_SIGNATURE);
            }
        }
    }

    /// start the next hand: new button, new deck, same seats
    fn commence(&mut self) {
        self.action_count += self.ledger.len() as u64 + 1;
        self.ledger.clear();
        self.hand_number += 1;
        for seat in self.seats.iter_mut() {
            seat.reset_stake();
            seat.reset_spent();
            seat.reset_cards(None);
            let status = match seat.status() {
                Status::SittingOut => Status::SittingOut,
                _ if seat.stack() == 0 => Status::Busted,
                _ => Status::Active,
            };
            seat.reset_state(status);
        }
        if let Some(dealer) = self.next_eligible(self.dealer) {
            self.dealer = dealer;
        }
        self.deck = Deck::shuffled(&mut self.rng);
        self.board.clear();
        self.winners.clear();
        self.sblind = None;
        self.bblind = None;
        self.round = Round::Ante;
        log::info!(
            "[table {}] hand {} dealer {}",
            self.address,
            self.hand_number,
            self.dealer
        );
    }

    /// every hole and board card came off the deck, and none twice
    pub fn check_deck(&self) -> Result<(), Error> {
        let drawn = Hand::from(self.deck.drawn());
        let mut seen = Hand::empty();
        let holes = self
            .seats
            .iter()
            .filter_map(|s| s.hole())
            .flat_map(|h| h.cards());
        for card in holes.chain(self.board.iter().copied()) {
            if seen.contains(&card) {
                return Err(Error::Corrupt(format!("{} dealt twice", card)));
            }
            if !drawn.contains(&card) {
                return Err(Error::Corrupt(format!("{} dealt but not drawn", card)));
            }
            seen.insert(card);
        }
        Ok(())
    }
}

impl TryFrom<Snapshot> for Table {
    type Error = anyhow::Error;
    fn try_from(snapshot: Snapshot) -> Result<Self, Self::Error> {
        snapshot.options.validate()?;
        let mut seats = snapshot.seats;
        seats.sort_by_key(|s| s.position());
        let max = snapshot.options.max_players;
        if seats
            .iter()
            .any(|s| s.position() == 0 || s.position() > max)
        {
            anyhow::bail!("seat outside 1..={}", max);
        }
        if seats.windows(2).any(|w| w[0].position() == w[1].position()) {
            anyhow::bail!("two players in one seat");
        }
        if snapshot.board.len() > 5 {
            anyhow::bail!("board holds {} cards", snapshot.board.len());
        }
        if snapshot.round != Round::End && snapshot.board.len() != snapshot.round.n_board() {
            anyhow::bail!(
                "{} cards on the board during {}",
                snapshot.board.len(),
                snapshot.round
            );
        }
        let table = Self {
            address: snapshot.address,
            format: snapshot.format,
            options: snapshot.options,
            seats,
            deck: snapshot.deck,
            board: snapshot.board,
            dealer: snapshot.dealer,
            sblind: snapshot.sblind,
            bblind: snapshot.bblind,
            round: snapshot.round,
            ledger: snapshot.ledger,
            action_count: snapshot.action_count,
            hand_number: snapshot.hand_number,
            winners: snapshot.winners,
            results: snapshot.results,
            signature: snapshot.signature,
            rng: SmallRng::from_os_rng(),
        };
        table.check_deck()?;
        Ok(table)
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use colored::Colorize;
        writeln!(
            f,
            "{}",
            format!(
                "{} hand {} {} {}",
                self.address,
                self.hand_number,
                self.round,
                Hand::from(self.board.as_slice())
            )
            .bright_green()
        )?;
        for seat in self.seats.iter() {
            let button = match seat.position() == self.dealer {
                true => "D",
                false => " ",
            };
            writeln!(f, "{} {}", button, seat)?;
        }
        for pot in self.pots() {
            writeln!(f, "  pot {}", pot)?;
        }
        Ok(())
    }
}
