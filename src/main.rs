use std::{net::IpAddr, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use axum::Server;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todo_graphql::{config::Config, route::create_router, write_schema, AppState};

#[derive(Parser, Debug)]
#[command(name = "todo-graphql", version, about = "GraphQL todo list service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        #[arg(long)]
        host: Option<IpAddr>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Write the GraphQL schema in SDL form
    ExportSchema {
        #[arg(long, short, default_value = "schema.graphql")]
        output: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("todo_graphql=debug,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for ctrl-c");
        return;
    }
    info!("shutting down");
}

// Entry point of the application
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::ExportSchema { output } => {
            write_schema(&output)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
        Command::Serve { host, port } => {
            let mut config = Config::from_env()?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let app = create_router(Arc::new(AppState::new(&config)));
            let addr = config.addr();

            let server = Server::try_bind(&addr)
                .with_context(|| format!("failed to bind {addr}"))?
                .serve(app.into_make_service());
            info!(%addr, "server started");

            server
                .with_graceful_shutdown(shutdown_signal())
                .await
                .context("server error")?;
        }
    }

    Ok(())
}
