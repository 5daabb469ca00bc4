use super::document::*;
use crate::Chips;
use crate::cards::card::Card;
use crate::cards::deck::Deck;
use crate::cards::hole::Hole;
use crate::gameplay::ActionKind;
use crate::gameplay::Ledger;
use crate::gameplay::Record;
use crate::gameplay::Seat;
use crate::gameplay::Snapshot;
use crate::gameplay::Status;
use crate::gameplay::Table;
use crate::gameplay::Winner;

/// Who a document is rendered for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Viewer {
    /// the authoritative copy: every card, the full deck
    House,
    /// a seated player, or anyone claiming an address
    Player(String),
    /// a spectator
    Public,
}

impl Viewer {
    /// hole cards stay hidden unless they are the viewer's own
    /// or the seat has shown them
    fn sees(&self, seat: &Seat) -> bool {
        match self {
            Viewer::House => true,
            Viewer::Player(address) => {
                address == seat.address() || seat.status() == Status::Showing
            }
            Viewer::Public => seat.status() == Status::Showing,
        }
    }
}

/// Whether `all-in` appears as its own legal action, or only as
/// the top of the `bet`/`raise` range and a stack-sized `call`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Surfacing {
    #[default]
    Explicit,
    Folded,
}

/// Render the table for `viewer`, listing all-in explicitly.
pub fn project(table: &Table, viewer: &Viewer) -> ApiTable {
    project_with(table, viewer, Surfacing::Explicit)
}

/// Render the table for `viewer`.
///
/// The canonical table always holds every card. Masking happens here and
/// only here, so a second render for the same viewer is identical.
pub fn project_with(table: &Table, viewer: &Viewer, surfacing: Surfacing) -> ApiTable {
    let players = table
        .seats()
        .iter()
        .map(|seat| player(table, seat, viewer, surfacing))
        .collect();
    let winners = table
        .winners()
        .iter()
        .map(|winner| ApiWinner {
            address: winner.address.clone(),
            amount: winner.amount,
            cards: match (winner.cards, table.seat(winner.position)) {
                (Some(hole), Some(seat)) => tokens(hole, viewer.sees(seat)),
                (Some(hole), None) => tokens(hole, *viewer == Viewer::House),
                (None, _) => Vec::new(),
            },
            name: winner.name.clone(),
            description: winner.description.clone(),
        })
        .collect();
    ApiTable {
        format: table.format(),
        address: table.address().to_string(),
        game_options: ApiOptions::from(table.options()),
        small_blind_position: table.sblind().unwrap_or(0),
        big_blind_position: table.bblind().unwrap_or(0),
        dealer: table.dealer(),
        players,
        community_cards: table.board().iter().map(|c| c.to_string()).collect(),
        deck: match viewer {
            Viewer::House => table.deck().to_string(),
            _ => String::new(),
        },
        pots: table.pots().iter().map(|p| p.amount).collect(),
        last_acted_seat: table.ledger().last().map(|r| r.seat),
        action_count: table.action_count(),
        hand_number: table.hand_number(),
        next_to_act: table.next_to_act().map(|p| p as i64).unwrap_or(-1),
        previous_actions: table
            .ledger()
            .records()
            .iter()
            .map(ApiRecord::from)
            .collect(),
        round: table.round(),
        winners,
        results: table.results().iter().map(ApiResult::from).collect(),
        signature: table.signature().to_string(),
    }
}

fn player(table: &Table, seat: &Seat, viewer: &Viewer, surfacing: Surfacing) -> ApiPlayer {
    ApiPlayer {
        address: seat.address().to_string(),
        seat: seat.position(),
        stack: seat.stack(),
        is_small_blind: table.sblind() == Some(seat.position()),
        is_big_blind: table.bblind() == Some(seat.position()),
        is_dealer: table.dealer() == seat.position(),
        hole_cards: seat.hole().map(|hole| tokens(hole, viewer.sees(seat))),
        status: seat.status(),
        legal_actions: table
            .legal(seat.position())
            .iter()
            .filter(|l| surfacing == Surfacing::Explicit || l.kind != ActionKind::AllIn)
            .map(ApiLegal::from)
            .collect(),
        sum_of_bets: seat.stake(),
        timeout: seat.timeout(),
        last_action: table.ledger().last_by(seat.position()).map(ApiRecord::from),
        signature: seat.signature().to_string(),
    }
}

fn tokens(hole: Hole, visible: bool) -> Vec<String> {
    match visible {
        true => hole.cards().iter().map(|c| c.to_string()).collect(),
        false => vec![String::from(crate::HIDDEN_CARD); crate::N_HOLE],
    }
}

fn card(token: &str) -> anyhow::Result<Card> {
    match token == crate::HIDDEN_CARD {
        true => Err(anyhow::anyhow!("masked card in a canonical document")),
        false => Card::try_from(token),
    }
}

/// Rebuild the authoritative table from a house document.
///
/// Committed chips are replayed from the action log, since the
/// document only carries each seat's stake for the current round.
impl TryFrom<ApiTable> for Table {
    type Error = anyhow::Error;
    fn try_from(doc: ApiTable) -> Result<Self, Self::Error> {
        let ledger = Ledger::from(
            doc.previous_actions
                .into_iter()
                .map(Record::from)
                .collect::<Vec<Record>>(),
        );
        let mut seats = Vec::with_capacity(doc.players.len());
        for player in doc.players {
            let hole = match player.hole_cards.as_deref() {
                None | Some([]) => None,
                Some(tokens) => {
                    tokens.iter().try_for_each(|t| card(t).map(|_| ()))?;
                    Some(Hole::try_from(tokens)?)
                }
            };
            let spent = ledger
                .records()
                .iter()
                .filter(|r| r.seat == player.seat && r.action.is_wager())
                .map(|r| r.action.amount())
                .sum::<Chips>();
            let mut seat = Seat::new(player.address, player.seat, player.stack);
            seat.reset_state(player.status);
            seat.reset_cards(hole);
            seat.reset_bets(player.sum_of_bets, spent);
            seat.reset_timeout(player.timeout);
            seat.reset_signature(player.signature);
            seats.push(seat);
        }
        let board = doc
            .community_cards
            .iter()
            .map(|t| card(t))
            .collect::<anyhow::Result<Vec<Card>>>()?;
        let mut winners = Vec::with_capacity(doc.winners.len());
        for winner in doc.winners {
            let cards = match winner.cards.as_slice() {
                [] => None,
                tokens => {
                    tokens.iter().try_for_each(|t| card(t).map(|_| ()))?;
                    Some(Hole::try_from(tokens)?)
                }
            };
            winners.push(Winner {
                position: seats
                    .iter()
                    .find(|s: &&Seat| s.address() == winner.address)
                    .map(|s| s.position())
                    .unwrap_or(0),
                address: winner.address,
                amount: winner.amount,
                cards,
                name: winner.name,
                description: winner.description,
            });
        }
        Table::try_from(Snapshot {
            address: doc.address,
            format: doc.format,
            options: doc.game_options.into(),
            seats,
            deck: Deck::try_from(doc.deck.as_str())?,
            board,
            dealer: doc.dealer,
            sblind: Some(doc.small_blind_position).filter(|p| *p > 0),
            bblind: Some(doc.big_blind_position).filter(|p| *p > 0),
            round: doc.round,
            ledger,
            action_count: doc.action_count,
            hand_number: doc.hand_number,
            winners,
            results: doc.results.into_iter().map(Into::into).collect(),
            signature: doc.signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::Action;
    use crate::gameplay::Format;
    use crate::gameplay::Options;
    use crate::gameplay::Request;
    use crate::gameplay::Round;

    const E16: Chips = 10_000_000_000_000_000;

    /// the settled hand as a chain node reported it
    const SETTLED: &str = r#"{
        "type": "cash",
        "address": "0x5beefcc4e98e5f876ef6e94a2291cde322e38d03",
        "gameOptions": {
            "minBuyIn": "10000000000000000",
            "maxBuyIn": "1000000000000000000",
            "maxPlayers": 9,
            "minPlayers": 2,
            "smallBlind": "10000000000000000",
            "bigBlind": "20000000000000000",
            "timeout": 300
        },
        "smallBlindPosition": 1,
        "bigBlindPosition": 2,
        "dealer": 9,
        "players": [
            {
                "address": "0xE8DE79b707BfB7d8217cF0a494370A9cC251602C",
                "seat": 1,
                "stack": "1040000000000000000",
                "isSmallBlind": true,
                "isBigBlind": false,
                "isDealer": false,
                "holeCards": ["TD", "5C"],
                "status": "showing",
                "legalActions": [],
                "sumOfBets": "0",
                "timeout": 0,
                "signature": "0x0000000000000000000000000000000000000000000000000000000000000000"
            },
            {
                "address": "0x38829ceF964019C1E12e6CF36CAad5845B0F012d",
                "seat": 2,
                "stack": "960000000000000000",
                "isSmallBlind": false,
                "isBigBlind": true,
                "isDealer": false,
                "holeCards": ["5D", "5H"],
                "status": "showing",
                "legalActions": [],
                "sumOfBets": "0",
                "timeout": 0,
                "signature": "0x0000000000000000000000000000000000000000000000000000000000000000"
            }
        ],
        "communityCards": ["7D", "3C", "TC", "6D", "8H"],
        "deck": "TD-5D-5C-5H-JC-AC-AH-7D-3C-TC-9S-6D-KS-8H-[2C]-QS-9H-AD-JS-6S-8C-TS-7C-KD-2D-7H-4H-5S-7S-9C-4C-8D-2H-2S-4S-3S-3D-QD-9D-4D-QH-AS-JH-QC-JD-6C-8S-3H-KH-6H-KC-TH",
        "pots": ["80000000000000000"],
        "actionCount": 0,
        "handNumber": 1,
        "nextToAct": -1,
        "previousActions": [
            {"playerId": "0xE8DE79b707BfB7d8217cF0a494370A9cC251602C", "seat": 1, "action": "join", "amount": "1000000000000000000", "round": "ante", "index": 1, "timestamp": 1747964696524},
            {"playerId": "0x38829ceF964019C1E12e6CF36CAad5845B0F012d", "seat": 2, "action": "join", "amount": "1000000000000000000", "round": "ante", "index": 2, "timestamp": 1747964696524},
            {"playerId": "0xE8DE79b707BfB7d8217cF0a494370A9cC251602C", "seat": 1, "action": "post-small-blind", "amount": "10000000000000000", "round": "ante", "index": 3, "timestamp": 1747964696524},
            {"playerId": "0x38829ceF964019C1E12e6CF36CAad5845B0F012d", "seat": 2, "action": "post-big-blind", "amount": "20000000000000000", "round": "ante", "index": 4, "timestamp": 1747964696524},
            {"playerId": "0xE8DE79b707BfB7d8217cF0a494370A9cC251602C", "seat": 1, "action": "deal", "amount": "", "round": "ante", "index": 5, "timestamp": 1747964696524},
            {"playerId": "0xE8DE79b707BfB7d8217cF0a494370A9cC251602C", "seat": 1, "action": "call", "amount": "10000000000000000", "round": "preflop", "index": 6, "timestamp": 1747964696524},
            {"playerId": "0x38829ceF964019C1E12e6CF36CAad5845B0F012d", "seat": 2, "action": "check", "amount": "", "round": "preflop", "index": 7, "timestamp": 1747964696524},
            {"playerId": "0xE8DE79b707BfB7d8217cF0a494370A9cC251602C", "seat": 1, "action": "check", "amount": "", "round": "flop", "index": 8, "timestamp": 1747964696524},
            {"playerId": "0x38829ceF964019C1E12e6CF36CAad5845B0F012d", "seat": 2, "action": "bet", "amount": "20000000000000000", "round": "flop", "index": 9, "timestamp": 1747964696524},
            {"playerId": "0xE8DE79b707BfB7d8217cF0a494370A9cC251602C", "seat": 1, "action": "call", "amount": "20000000000000000", "round": "flop", "index": 10, "timestamp": 1747964696524},
            {"playerId": "0x38829ceF964019C1E12e6CF36CAad5845B0F012d", "seat": 2, "action": "check", "amount": "", "round": "turn", "index": 11, "timestamp": 1747964696524},
            {"playerId": "0xE8DE79b707BfB7d8217cF0a494370A9cC251602C", "seat": 1, "action": "check", "amount": "", "round": "turn", "index": 12, "timestamp": 1747964696524},
            {"playerId": "0x38829ceF964019C1E12e6CF36CAad5845B0F012d", "seat": 2, "action": "check", "amount": "", "round": "river", "index": 13, "timestamp": 1747964696524},
            {"playerId": "0xE8DE79b707BfB7d8217cF0a494370A9cC251602C", "seat": 1, "action": "check", "amount": "", "round": "river", "index": 14, "timestamp": 1747964696524},
            {"playerId": "0x38829ceF964019C1E12e6CF36CAad5845B0F012d", "seat": 2, "action": "show", "amount": "", "round": "showdown", "index": 15, "timestamp": 1747964696524},
            {"playerId": "0xE8DE79b707BfB7d8217cF0a494370A9cC251602C", "seat": 1, "action": "show", "amount": "", "round": "showdown", "index": 16, "timestamp": 1747964696524}
        ],
        "round": "end",
        "winners": [
            {
                "address": "0xE8DE79b707BfB7d8217cF0a494370A9cC251602C",
                "amount": "80000000000000000",
                "cards": ["TD", "5C"],
                "name": "Pair",
                "description": "Pair, 10's"
            }
        ],
        "signature": "0x0000000000000000000000000000000000000000000000000000000000000000"
    }"#;

    fn stacked(top: &str) -> Deck {
        let top = top
            .split('-')
            .map(|s| Card::try_from(s).unwrap())
            .collect::<Vec<Card>>();
        let mut tokens = top
            .iter()
            .copied()
            .chain(Card::all().filter(|c| !top.contains(c)))
            .map(|c| c.to_string())
            .collect::<Vec<String>>();
        tokens[0] = format!("[{}]", tokens[0]);
        Deck::try_from(tokens.join("-").as_str()).unwrap()
    }

    fn play(table: &mut Table, address: &str, action: Action) {
        let index = table.next_index();
        table.apply(Request::new(address, action, index)).unwrap();
    }

    /// heads up on the flop, seat 1 to act
    fn flop() -> Table {
        let deck = stacked("TD-5D-5C-5H-JC-7D-3C-TC-9S-6D-KS-8H");
        let mut table = Table::new("0xtable", Format::Cash, Options::default())
            .unwrap()
            .with_deck(deck);
        play(&mut table, "0xA", Action::Join(1, 100 * E16));
        play(&mut table, "0xB", Action::Join(2, 100 * E16));
        play(&mut table, "0xA", Action::SmallBlind(E16));
        play(&mut table, "0xB", Action::BigBlind(2 * E16));
        play(&mut table, "0xA", Action::Deal);
        play(&mut table, "0xA", Action::Call(E16));
        play(&mut table, "0xB", Action::Check);
        table
    }

    #[test]
    fn restores_a_settled_hand() {
        let doc = serde_json::from_str::<ApiTable>(SETTLED).unwrap();
        let table = Table::try_from(doc).unwrap();
        assert_eq!(table.round(), Round::End);
        assert_eq!(table.next_index(), 17);
        assert_eq!(table.seat(1).unwrap().stack(), 104 * E16);
        assert_eq!(table.seat(1).unwrap().spent(), 4 * E16);
        assert!(
            table
                .legal(1)
                .iter()
                .any(|l| l.kind == ActionKind::NewHand && l.index == 17)
        );
        let view = project(&table, &Viewer::House);
        assert_eq!(view.pots, vec![8 * E16]);
        assert_eq!(view.next_to_act, -1);
        assert_eq!(view.winners.len(), 1);
        assert_eq!(view.winners[0].name, "Pair");
        assert_eq!(view.winners[0].description, "Pair, 10's");
        assert_eq!(view.winners[0].amount, 8 * E16);
        assert_eq!(view.winners[0].cards, vec!["TD", "5C"]);
        assert_eq!(view.players[0].last_action.as_ref().unwrap().index, 16);
        assert_eq!(view.last_acted_seat, Some(1));
    }

    #[test]
    fn players_see_only_their_own_cards() {
        let table = flop();
        let mine = project(&table, &Viewer::Player(String::from("0xA")));
        assert_eq!(mine.players[0].hole_cards, Some(vec![String::from("TD"), String::from("5C")]));
        assert_eq!(mine.players[1].hole_cards, Some(vec![String::from("??"); 2]));
        assert_eq!(mine.deck, "");
        let public = project(&table, &Viewer::Public);
        assert!(
            public
                .players
                .iter()
                .all(|p| p.hole_cards == Some(vec![String::from("??"); 2]))
        );
        assert_eq!(public, project(&table, &Viewer::Public));
        assert_eq!(mine, project(&table, &Viewer::Player(String::from("0xA"))));
    }

    #[test]
    fn shown_cards_are_public() {
        let mut table = flop();
        for _ in 0..3 {
            play(&mut table, "0xA", Action::Check);
            play(&mut table, "0xB", Action::Check);
        }
        assert_eq!(table.round(), Round::Showdown);
        play(&mut table, "0xA", Action::Show);
        let public = project(&table, &Viewer::Public);
        assert_eq!(public.players[0].hole_cards, Some(vec![String::from("TD"), String::from("5C")]));
        assert_eq!(public.players[1].hole_cards, Some(vec![String::from("??"); 2]));
    }

    #[test]
    fn late_joiners_hold_no_cards() {
        let mut table = flop();
        play(&mut table, "0xC", Action::Join(5, 100 * E16));
        let view = project(&table, &Viewer::House);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json["players"][2].get("holeCards").is_none());
        assert_eq!(json["players"][2]["status"], "active");
        assert_eq!(table.next_to_act(), Some(1));
    }

    #[test]
    fn all_in_can_fold_into_raise() {
        let table = flop();
        let explicit = project_with(&table, &Viewer::House, Surfacing::Explicit);
        let folded = project_with(&table, &Viewer::House, Surfacing::Folded);
        let kinds = |view: &ApiTable| {
            view.players[0]
                .legal_actions
                .iter()
                .map(|l| l.action)
                .collect::<Vec<ActionKind>>()
        };
        assert!(kinds(&explicit).contains(&ActionKind::AllIn));
        assert!(!kinds(&folded).contains(&ActionKind::AllIn));
        let bet = folded.players[0]
            .legal_actions
            .iter()
            .find(|l| l.action == ActionKind::Bet)
            .unwrap();
        assert_eq!(bet.max, table.seat(1).unwrap().stack());
    }

    #[test]
    fn house_documents_round_trip() {
        let table = flop();
        let json = serde_json::to_string(&project(&table, &Viewer::House)).unwrap();
        let doc = serde_json::from_str::<ApiTable>(&json).unwrap();
        let restored = Table::try_from(doc).unwrap();
        assert_eq!(
            project(&restored, &Viewer::House),
            project(&table, &Viewer::House)
        );
        assert_eq!(restored.next_to_act(), Some(1));
    }

    #[test]
    fn masked_documents_do_not_restore() {
        let table = flop();
        let mut doc = project(&table, &Viewer::Public);
        doc.deck = table.deck().to_string();
        assert!(Table::try_from(doc).is_err());
    }

    #[test]
    fn masking_holds_through_random_play() {
        use crate::gameplay::Legal;
        use rand::Rng;
        use rand::SeedableRng;
        use rand::rngs::SmallRng;
        let ref mut rng = SmallRng::seed_from_u64(0xDEC0DE);
        let mut table = Table::new("0xtable", Format::Cash, Options::default())
            .unwrap()
            .with_seed(7);
        for (i, address) in ["0xA", "0xB", "0xC"].iter().enumerate() {
            play(&mut table, address, Action::Join(i + 1, 100 * E16));
        }
        let me = Viewer::Player(String::from("0xA"));
        for _ in 0..1_000 {
            let view = project(&table, &me);
            assert_eq!(view, project(&table, &me));
            assert_eq!(view.deck, "");
            for (player, seat) in view.players.iter().zip(table.seats()) {
                let hidden = seat.address() != "0xA" && seat.status() != Status::Showing;
                match (&player.hole_cards, seat.hole()) {
                    (Some(cards), Some(_)) if hidden => {
                        assert_eq!(cards, &vec![String::from("??"); 2])
                    }
                    (Some(cards), Some(hole)) => assert_eq!(cards, &tokens(hole, true)),
                    (None, None) => {}
                    _ => panic!("hole cards out of sync at seat {}", seat.position()),
                }
                assert!(player.legal_actions.iter().all(|l| l.min <= l.max));
            }
            let position = match table.next_to_act() {
                Some(position) => position,
                None => match table
                    .seats()
                    .iter()
                    .find(|s| table.legal(s.position()).iter().any(|l| l.kind == ActionKind::NewHand))
                {
                    Some(seat) => seat.position(),
                    None => break,
                },
            };
            let legal = table
                .legal(position)
                .into_iter()
                .filter(|l| {
                    !matches!(
                        l.kind,
                        ActionKind::SitOut | ActionKind::TopUp | ActionKind::Leave
                    )
                })
                .collect::<Vec<Legal>>();
            let choice = legal[rng.random_range(0..legal.len())];
            let amount = match choice.min == choice.max {
                true => choice.min,
                false => rng.random_range(choice.min..=choice.max),
            };
            let address = table.seat(position).unwrap().address().to_string();
            play(&mut table, &address, Action::from_parts(choice.kind, amount, position));
        }
    }
}
