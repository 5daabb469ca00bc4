pub mod cards;
pub mod dto;
pub mod gameplay;
#[cfg(feature = "server")]
pub mod gameroom;

/// Chip amounts, in fixed-point micro-units.
pub type Chips = u128;
/// Seat numbers, counted from 1 up to the table's `maxPlayers`.
pub type Position = usize;

// ============================================================================
// TABLE LIMITS
// ============================================================================
/// Largest table the engine seats.
pub const MAX_SEATS: usize = 9;
/// Smallest number of eligible players that can start a hand.
pub const MIN_SEATS: usize = 2;
/// Cards dealt to each player.
pub const N_HOLE: usize = 2;
/// Seconds a seat may take before the room acts for it.
pub const DEFAULT_TIMEOUT: u64 = 300;

// ============================================================================
// TOURNAMENT PAYOUTS
// Percent of the prize pool (minBuyIn × entrants) paid to places 1, 2, 3.
// ============================================================================
pub const PAYOUT_SHARES: [Chips; 3] = [60, 30, 10];

// ============================================================================
// WIRE CONSTANTS
// ============================================================================
/// Placeholder for signatures produced outside this crate.
pub const ZERO_SIGNATURE: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000000";
/// Token shown in place of a hole card the viewer may not see.
pub const HIDDEN_CARD: &str = "??";
/// Winner name and description when everyone else folded.
pub const DEFAULT_WINNER: &str = "Winner by default (others folded)";
/// Winner name and description once a tournament has a single survivor.
pub const TOURNAMENT_WINNER: &str = "Tournament Winner";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("violent interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}
