use clap::Parser;
use utootwhen::cli::Config;

#[tokio::main]
async fn main() {
    let config = Config::parse();
    utootwhen::cli::run(config).await
}
