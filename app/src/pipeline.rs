use std::{
    fmt::{
        self,
        Display,
    },
    process::ExitCode,
};

use anyhow::{
    anyhow,
    ensure,
    Result,
};
use hot100_services::{
    create_playlist,
    find_tracks,
    service::Credentials,
    Catalog,
    ChartDate,
    ChartSource,
};
use log::{
    debug,
    error,
};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    ValidateDate,
    LoadConfig,
    FetchChart,
    AuthCatalog,
    MatchTracks,
    BuildPlaylist,
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::ValidateDate => "Invalid date",
            Stage::LoadConfig => "Configuration error",
            Stage::FetchChart => "Could not get chart",
            Stage::AuthCatalog => "Could not connect to Spotify",
            Stage::MatchTracks => "No songs matched",
            Stage::BuildPlaylist => "Could not build playlist",
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Done { url: String },
    Aborted { at: Stage },
}

impl Outcome {
    pub fn exit_status(&self) -> u8 {
        match self {
            Outcome::Done { .. } => 0,
            Outcome::Aborted { .. } => 1,
        }
    }
}

impl From<&Outcome> for ExitCode {
    fn from(outcome: &Outcome) -> Self { ExitCode::from(outcome.exit_status()) }
}

trait OrAbort<T> {
    fn or_abort(self, stage: Stage) -> Result<T, Stage>;
}

impl<T> OrAbort<T> for Result<T> {
    fn or_abort(self, stage: Stage) -> Result<T, Stage> {
        self.map_err(|e| {
            error!("{stage}: {e:#}");
            stage
        })
    }
}


/// Chart to playlist run; each stage must succeed before the next one starts
pub(crate) struct Pipeline<S, L, A> {
    pub chart: S,
    pub load_config: L,
    pub authenticate: A,
}

impl<S, L, A, C> Pipeline<S, L, A>
where
    S: ChartSource,
    L: FnOnce() -> Result<Credentials>,
    A: FnOnce(&Credentials) -> Result<C>,
    C: Catalog,
{
    pub fn run(self, input: &str) -> Outcome {
        match self.execute(input) {
            Ok(url) => Outcome::Done { url },
            Err(at) => Outcome::Aborted { at },
        }
    }

    fn execute(self, input: &str) -> Result<String, Stage> {
        debug!("Stage {:?}", Stage::ValidateDate);
        let date: ChartDate = input
            .trim()
            .parse()
            .map_err(|_| anyhow!("'{}' is not a valid YYYY-MM-DD date", input.trim()))
            .or_abort(Stage::ValidateDate)?;

        debug!("Stage {:?}", Stage::LoadConfig);
        let creds = (self.load_config)().or_abort(Stage::LoadConfig)?;

        debug!("Stage {:?}", Stage::FetchChart);
        let titles = self
            .chart
            .chart_titles(&date)
            .and_then(|titles| {
                ensure!(!titles.is_empty(), "The chart for {date} has no songs");
                Ok(titles)
            })
            .or_abort(Stage::FetchChart)?;

        debug!("Stage {:?}", Stage::AuthCatalog);
        let catalog = (self.authenticate)(&creds).or_abort(Stage::AuthCatalog)?;

        debug!("Stage {:?}", Stage::MatchTracks);
        let uris = find_tracks(&catalog, &titles, &date)
            .into_iter()
            .map(|track| track.uri)
            .collect::<Vec<_>>();
        if uris.is_empty() {
            return Err(anyhow!("Could not find any songs on Spotify, cannot create playlist"))
                .or_abort(Stage::MatchTracks);
        }

        debug!("Stage {:?}", Stage::BuildPlaylist);
        create_playlist(&catalog, &creds.username, &uris, &date).or_abort(Stage::BuildPlaylist)
    }
}
