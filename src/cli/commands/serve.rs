use clap::Args;

use crate::config::AppConfig;
use crate::server;

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Interface to bind (overrides SERVER_HOST / API_HOST)")]
    pub host: Option<String>,
    #[arg(long, help = "Port to bind (overrides SERVER_PORT / API_PORT)")]
    pub port: Option<u16>,
}

pub async fn server(config: &AppConfig, args: ServeArgs) -> anyhow::Result<()> {
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);

    let state = server::server_state(config)?;
    let listener = server::bind(&host, port).await?;
    server::serve(listener, state, config.security.enable_cors).await
}

pub async fn api(config: &AppConfig, args: ServeArgs, upstream: Option<String>) -> anyhow::Result<()> {
    let mut config = config.clone();
    if let Some(upstream) = upstream {
        config.api.upstream_url = Some(upstream);
    }
    let host = args.host.unwrap_or_else(|| config.api.host.clone());
    let port = args.port.unwrap_or(config.api.port);

    let state = server::api_state(&config)?;
    let listener = server::bind(&host, port).await?;
    server::serve(listener, state, config.security.enable_cors).await
}
