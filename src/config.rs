use clap::Parser;
use thiserror::Error;

pub const DEFAULT_PICKS: usize = 6;

#[derive(Parser, Debug)]
#[command(version, about = "Match the hex pattern to prove you are not a robot", long_about = None)]
pub struct Args {
    /// How many random picks mark the key board (repeats allowed)
    #[arg(short, long, default_value_t = DEFAULT_PICKS)]
    pub picks: usize,

    /// Seed for the key pattern; random when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Run in a window instead of fullscreen
    #[arg(short, long)]
    pub windowed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub picks: usize,
    pub seed: u64,
    pub fullscreen: bool,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--picks must be at least 1, an empty key pattern passes instantly")]
    NoPicks,
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if args.picks == 0 {
            return Err(ConfigError::NoPicks);
        }
        Ok(Self {
            picks: args.picks,
            seed: args.seed.unwrap_or_else(rand::random),
            fullscreen: !args.windowed,
        })
    }
}
