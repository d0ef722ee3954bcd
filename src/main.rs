#![deny(warnings)]

use clap::Parser;
use color_eyre::eyre::Result;

use gamestui::{
    app::App,
    cli::Cli,
    config::Config,
    fetcher::{MemoryFetcher, RpcFetcher},
    utils::{initialize_logging, initialize_panic_handler},
};

async fn tokio_main() -> Result<()> {
    initialize_logging()?;

    initialize_panic_handler()?;

    let args = Cli::parse();

    if args.offline {
        let config = Config::offline()?;
        let fetcher = MemoryFetcher::sample();
        let mut app = App::new(config, args.tick_rate, args.frame_rate, fetcher)?;
        app.run().await?;
    } else {
        let config = Config::new()?;
        let fetcher = RpcFetcher::new(&config.rpc_url);
        let mut app = App::new(config, args.tick_rate, args.frame_rate, fetcher)?;
        app.run().await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
