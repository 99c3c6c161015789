use clap::Parser;
use fdns_application::use_cases::HandleZoneQueryUseCase;
use fdns_domain::{CliOverrides, SharedSecretKey, ZoneTree};
use fdns_infrastructure::dns::tsig::{parse_algorithm, DEFAULT_ALGORITHM};
use fdns_infrastructure::dns::{DnsServerHandler, TsigAlgorithm, TsigVerifier};
use std::sync::Arc;
use tracing::{info, warn};

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "fdns")]
#[command(version)]
#[command(about = "fdns - Authoritative DNS server for statically configured zones")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// TSIG key used to authenticate requests
    #[arg(long, value_name = "KEYNAME:BASE64SECRET")]
    tsig: Option<SharedSecretKey>,

    /// TSIG algorithm (hmac-sha256, hmac-sha384, hmac-sha512)
    #[arg(long, default_value = DEFAULT_ALGORITHM, value_parser = parse_algorithm)]
    tsig_algorithm: TsigAlgorithm,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
    };
    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting fdns v{}", env!("CARGO_PKG_VERSION"));

    let registration = ZoneTree::from_config(&config).register();
    for name in &registration.candidates {
        if registration.bindings.get(name).is_some() {
            info!(domain = %name, "Adding zone");
        }
    }
    for name in &registration.skipped {
        warn!(domain = %name, "Skipping invalid domain name");
    }
    for name in &registration.overwritten {
        warn!(domain = %name, "Duplicate domain, previous definition replaced");
    }
    if registration.bindings.is_empty() {
        warn!("No zones configured, every query will be refused");
    }

    let use_case = Arc::new(HandleZoneQueryUseCase::new(Arc::new(registration.bindings)));
    let mut handler = DnsServerHandler::new(use_case);

    if let Some(key) = &cli.tsig {
        if let Some(verifier) = TsigVerifier::from_key(key, cli.tsig_algorithm.clone())? {
            info!(key = %key.name, algorithm = ?cli.tsig_algorithm, "TSIG verification enabled");
            handler = handler.with_verifier(verifier);
        }
    }

    server::run_dns_server(handler).await;

    info!("Server shutdown complete");
    Ok(())
}
