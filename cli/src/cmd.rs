use std::io::Write;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use mdig::NetworkExchange;
use mdig::Tracer;
use tracing::info;

use crate::args::GlobalArgs;
use crate::args::TraceArgs;

/// Trace DNS delegation for a domain, from the root servers down
#[derive(Debug, Parser)]
#[command(name = "mdig", version, about)]
struct Cli {
    #[clap(flatten)]
    trace_args: TraceArgs,

    #[clap(flatten)]
    global_args: GlobalArgs,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    cli.global_args.init_tracing()?;

    let config = cli.trace_args.config();
    let exchange = NetworkExchange::new(config.protocol);
    let tracer = Tracer::new(config, exchange);

    let config = tracer.config();
    info!(
        resolver = %config.resolver,
        query_type = %config.query_type,
        address_family = %config.address_family,
        protocol = %config.protocol,
        "starting trace"
    );

    let mut results = tracer.trace(&cli.trace_args.domain).await;
    results.sort_by_key(|result| result.level);

    let mut stdout = std::io::stdout().lock();
    cli.global_args
        .output
        .render(&cli.trace_args.domain, &results, &mut stdout)
        .context("unable to print trace")?;
    stdout.flush().context("unable to flush stdout")?;

    Ok(())
}
