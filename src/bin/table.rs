//! Table Binary
//!
//! Runs robot tables and inspects table-state documents.
//!
//! Subcommands: simulate, inspect

use clap::Parser;
use pokertable::dto::*;
use pokertable::gameplay::*;
use pokertable::gameroom::*;
use pokertable::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
enum Query {
    #[command(about = "Play robot hands at a fresh table", alias = "sim")]
    Simulate {
        #[arg(long, default_value_t = 3)]
        seats: usize,
        #[arg(long, default_value_t = 10)]
        hands: u64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "cash")]
        format: String,
        #[arg(long)]
        small_blind: Option<Chips>,
        #[arg(long)]
        big_blind: Option<Chips>,
        #[arg(long)]
        buy_in: Option<Chips>,
        #[arg(long, help = "Take seat 1 yourself")]
        human: bool,
        #[arg(long, help = "Turn clock in seconds")]
        clock: Option<u64>,
    },
    #[command(about = "Render a table-state document for a viewer", alias = "view")]
    Inspect {
        #[arg(required = true)]
        path: String,
        #[arg(long, help = "Address to render for, or 'public'; omit for the house view")]
        viewer: Option<String>,
        #[arg(long, help = "Fold all-in into the bet and raise ranges")]
        folded: bool,
    },
}

impl Query {
    async fn run(self) -> anyhow::Result<()> {
        match self {
            Query::Simulate {
                seats,
                hands,
                seed,
                format,
                small_blind,
                big_blind,
                buy_in,
                human,
                clock,
            } => {
                let defaults = Options::default();
                let options = Options {
                    small_blind: small_blind.unwrap_or(defaults.small_blind),
                    big_blind: big_blind.unwrap_or(defaults.big_blind),
                    ..defaults
                };
                let buy_in = buy_in.unwrap_or(options.max_buy_in);
                let lobby = Lobby::default();
                let address = lobby.mint();
                let mut table = Table::new(address.clone(), Format::try_from(format.as_str())?, options)?;
                if let Some(seed) = seed {
                    table = table.with_seed(seed);
                }
                let mut room = Room::from(table).with_hands(hands);
                if let Some(clock) = clock {
                    room = room.with_clock(std::time::Duration::from_secs(clock));
                }
                for position in 1..=seats.clamp(MIN_SEATS, MAX_SEATS) {
                    let address = format!("0x{:040x}", position);
                    match human && position == 1 {
                        true => room.sit(&address, position, buy_in, Human)?,
                        false => room.sit(&address, position, buy_in, Fish)?,
                    }
                }
                let table = lobby.host(room).await.await?;
                lobby.close(&address).await?;
                println!("{}", table);
                for placement in table.results() {
                    println!("{}", placement);
                }
                Ok(())
            }
            Query::Inspect {
                path,
                viewer,
                folded,
            } => {
                let text = std::fs::read_to_string(&path)?;
                let json = serde_json::from_str::<serde_json::Value>(&text)?;
                let data = json
                    .pointer("/result/data")
                    .cloned()
                    .unwrap_or(json);
                let table = Table::try_from(serde_json::from_value::<ApiTable>(data)?)?;
                let viewer = match viewer.as_deref() {
                    None => Viewer::House,
                    Some("public") => Viewer::Public,
                    Some(address) => Viewer::Player(address.to_string()),
                };
                let surfacing = match folded {
                    true => Surfacing::Folded,
                    false => Surfacing::Explicit,
                };
                println!("{}", table);
                println!(
                    "{}",
                    serde_json::to_string_pretty(&project_with(&table, &viewer, surfacing))?
                );
                Ok(())
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log()?;
    kys();
    Query::parse().run().await
}
