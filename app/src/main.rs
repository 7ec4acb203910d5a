use std::process::ExitCode;

use anyhow::{
    Context,
    Result,
};
use clap::Parser;
use hot100_services::service::{
    BillboardChart,
    Credentials,
    SpotifyClient,
};
use log::{
    error,
    info,
};

use crate::{
    args::Args,
    pipeline::{
        Outcome,
        Pipeline,
    },
};

mod args;
mod pipeline;
mod prompt;


fn init_logging(args: &Args) {
    let mut clog = colog::default_builder();
    clog.filter(None, args.log_level());
    clog.init();
}

fn prompt_date() -> Result<String> {
    prompt::ask("Please enter the date you want to look back to (format: YYYY-MM-DD)").context("Failed to read date")
}

fn prompt_redirect(authorize_url: &str) -> Result<String> {
    println!("\nIf no browser opened, visit this url to authorize access:\n\n    {authorize_url}\n");
    prompt::ask("Paste the url you were redirected to").context("Failed to read redirect url")
}

fn main() -> ExitCode {
    let args = Args::parse_from(wild::args_os());
    init_logging(&args);

    #[cfg(debug_assertions)]
    log::debug!("{args:?}");

    let input = match args.date {
        Some(date) => date,
        None => match prompt_date() {
            Ok(date) => date,
            Err(e) => {
                error!("{e:#}");
                return ExitCode::FAILURE;
            },
        },
    };

    let outcome = Pipeline {
        chart: BillboardChart::new(),
        load_config: Credentials::from_env,
        authenticate: |creds: &Credentials| SpotifyClient::connect(creds, prompt_redirect),
    }
    .run(&input);

    if let Outcome::Done { url } = &outcome {
        info!("{}", "-".repeat(60));
        info!("Your playlist has been successfully created!");
        info!("Playlist link: {url}");
        info!("{}", "-".repeat(60));
    }
    ExitCode::from(&outcome)
}
