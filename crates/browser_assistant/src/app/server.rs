use crate::cli::Args;
use crate::config::SessionConfig;
use crate::logging::setup_logging;
use crate::mcp::MCPServer;
use crate::session::Session;
use crate::tools::core::ToolRegistry;
use anyhow::Result;
use page_driver::{CdpDriver, LaunchOptions, PageDriver};
use std::sync::Arc;

pub async fn run(args: Args) -> Result<()> {
    setup_logging(args.verbose);

    let config = SessionConfig::from(&args);

    // The active tool set is fixed for the connection's lifetime
    let registry = ToolRegistry::select(config.mode, &config.capabilities);

    let launch = LaunchOptions {
        headless: config.headless,
        executable: config.executable.clone(),
    };
    let session = Session::new(
        config,
        Box::new(move || {
            let launch = launch.clone();
            Box::pin(async move {
                let driver = CdpDriver::launch(launch).await?;
                Ok(Arc::new(driver) as Arc<dyn PageDriver>)
            })
        }),
    );

    let mut server = MCPServer::new(session.clone(), registry);
    server.run().await?;

    // The transport is closed at this point; only now tear down the
    // session so no late protocol message can reference it
    session.close().await
}
