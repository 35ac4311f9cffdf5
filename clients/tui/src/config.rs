use crate::error::TrainerError;
use crate::trainer::Pacing;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FrontEndKind {
    /// Plain console: cards are printed, answers typed as a line
    Ascii,
    /// Full-screen terminal window
    Terminal,
}

#[derive(Parser, Debug)]
#[command(name = "hilo-trainer", about = "Practice keeping a Hi-Lo running count")]
pub struct Cli {
    /// Front end to play with
    #[arg(long, env = "TRAINER_FRONTEND", value_enum, default_value_t = FrontEndKind::Terminal)]
    pub frontend: FrontEndKind,

    /// Milliseconds each card stays up
    #[arg(long, env = "TRAINER_DEAL_INTERVAL_MS", default_value_t = 2000)]
    pub deal_interval_ms: u64,

    /// Milliseconds to pause after a quiz result
    #[arg(long, env = "TRAINER_RESULT_PAUSE_MS", default_value_t = 1000)]
    pub result_pause_ms: u64,

    /// Milliseconds between input polls while waiting
    #[arg(long, env = "TRAINER_POLL_INTERVAL_MS", default_value_t = 10)]
    pub poll_interval_ms: u64,

    /// Seed for the shuffle, for repeatable decks
    #[arg(long, env = "TRAINER_SEED")]
    pub seed: Option<u64>,

    /// JSON card art pack for the terminal front end
    #[arg(long, env = "TRAINER_CARD_ART")]
    pub card_art: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, env = "TRAINER_LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,
}

impl Cli {
    pub fn pacing(&self) -> Result<Pacing, TrainerError> {
        if self.poll_interval_ms == 0 {
            return Err(TrainerError::Config(
                "poll interval must be at least 1 ms".to_string(),
            ));
        }
        Ok(Pacing {
            deal_interval: Duration::from_millis(self.deal_interval_ms),
            result_pause: Duration::from_millis(self.result_pause_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        })
    }

    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}
