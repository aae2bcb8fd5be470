//! kro-lsp binary entry point.
//!
//! Speaks LSP over stdin/stdout by default. With `--lsp-addr` or `--port`
//! it listens on TCP instead.

use clap::Parser;
use tracing_subscriber::EnvFilter;

const DEFAULT_HOST: &str = "127.0.0.1";

#[derive(Parser)]
#[command(name = "kro-lsp")]
#[command(author, version, about = "Language server for kro ResourceGraphDefinition files")]
struct Cli {
    /// Listen for LSP clients on this address (e.g. 127.0.0.1:5001)
    #[arg(long, value_name = "HOST:PORT", conflicts_with = "port")]
    lsp_addr: Option<String>,

    /// Listen for LSP clients on this port on 127.0.0.1
    #[arg(long)]
    port: Option<u16>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn listen_addr(&self) -> Option<String> {
        self.lsp_addr
            .clone()
            .or_else(|| self.port.map(|port| format!("{}:{}", DEFAULT_HOST, port)))
    }
}

fn init_tracing(verbose: bool) {
    // stdout carries LSP frames; logs go to stderr.
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("KRO_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.listen_addr() {
        Some(addr) => kro_lsp::start_tcp_server(&addr).await,
        None => {
            tracing::info!("kro-lsp starting on stdio");
            kro_lsp::start_server().await
        }
    }
}
