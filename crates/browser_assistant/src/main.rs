mod app;
mod cli;
mod config;
mod logging;
mod mcp;
mod session;
mod tools;
mod utils;

#[cfg(test)]
mod tests;

use anyhow::Result;
use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    app::run(args).await
}
