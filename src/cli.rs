//! Drives the command-line program.

pub use crate::mastodon::client::Error;
use crate::clock::SystemClock;
use crate::conf;
use crate::mastodon::Mastodonian;
use crate::mastodon::service::MastodonService;
use crate::view::{ViewOptions, Viewable};
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use colored::Colorize;
use std::process;

pub fn die(error_code: i32, message: &str) {
    eprintln!("{}", message);
    process::exit(error_code);
}

/// Program configuration.
#[derive(Debug, Parser)]
#[command(version)]
#[command(about = "Answers the age-old question, \"When does a Mastodon user toot the most?\"", long_about = None
)]
pub struct Config {
    #[command(flatten)]
    verbosity: Verbosity,

    /// Mastodon username, without the leading @ or the instance part
    ///
    /// May be omitted when an access token is supplied, in which case the
    /// token's own account is reported on.
    username: Option<String>,

    /// Mastodon instance the account lives on
    #[arg(short, long, default_value = "mastodon.social")]
    instance: String,

    /// Only show the current month's post count
    #[arg(short, long, default_value_t = false)]
    current: bool,

    /// Access token for reading non-public posts
    ///
    /// Falls back to the $MASTODON_ACCESS_TOKEN environment variable when
    /// not given.
    #[arg(short, long)]
    token: Option<String>,
}

impl Config {
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity.clone()
    }

    pub fn username(&self) -> Option<String> {
        self.username.clone()
    }
}

/// Runs the command-line program.
#[derive(Debug)]
pub struct Runner {
    config: Config,
    user: Mastodonian<MastodonService>,
}

impl Runner {
    /// Create a new program runner using the given `config`.
    ///
    /// Resolves the target account up front; returns an error with a
    /// helpful message if the account cannot be resolved.
    pub async fn new(config: Config) -> Result<Runner, Error> {
        let token = conf::access_token(config.token.clone());
        log::info!("looking up account on {}", config.instance);
        let user = Mastodonian::new(&config.instance, config.username(), token).await?;
        Ok(Self { config, user })
    }

    fn user(&self) -> &Mastodonian<MastodonService> {
        &self.user
    }

    /// Run the command-line program using its stored configuration options.
    pub async fn run(&self) {
        let opts = ViewOptions::build().current_only(self.config.current).build();
        let clock = SystemClock::default();

        log::info!("loading posts for @{}", self.user().acct());
        let activity = self.user().activity().await;

        println!("{}", self.user().account().view(&opts, &clock));
        println!("{}", activity.view(&opts, &clock));

        if activity.skipped() > 0 {
            let warning = format!(
                "warning: skipped {} posts with no usable timestamp",
                activity.skipped()
            );
            eprintln!("{}", warning.yellow());
        }
        if let Some(err) = activity.interrupted() {
            let warning =
                format!("warning: post retrieval was interrupted ({err}); totals are a lower bound");
            eprintln!("{}", warning.yellow());
        }
    }
}

/// Runs the command-line program.
pub async fn run(config: Config) {
    env_logger::Builder::new()
        .filter_level(config.verbosity().log_level_filter())
        .init();

    match Runner::new(config).await {
        Ok(runner) => runner.run().await,
        Err(err @ Error::Configuration) => die(2, &err.to_string()),
        Err(err) => die(1, &format!("could not look up account: {err}")),
    }
}
