use clap::{
    ArgAction,
    Parser,
};
use log::LevelFilter;

/// Create a private Spotify playlist from a historical Billboard Hot 100 chart
///
/// Requires SPOTIFY_CLIENT_ID, SPOTIFY_CLIENT_SECRET, SPOTIFY_REDIRECT_URI and
/// SPOTIFY_USERNAME to be set in the environment.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// Chart date in YYYY-MM-DD format; prompted for when omitted
    #[arg(short, long)]
    pub date: Option<String>,

    /// Log more detail, repeat for even more
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Warn,
            (false, 0) => LevelFilter::Info,
            (false, 1) => LevelFilter::Debug,
            (false, _) => LevelFilter::Trace,
        }
    }
}
