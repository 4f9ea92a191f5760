use clap::Parser;
use content_notifier::config::Config;
use content_notifier::metrics_defs::{self, MetricType};
use metrics_exporter_statsd::StatsdBuilder;
use std::process;
use tracing_subscriber::EnvFilter;

/// Relays content notifications through the mapper to the store writer.
#[derive(Parser)]
#[command(name = "content-notifier", version)]
struct Cli {
    /// Address of the routing layer fronting both collaborators, as `host`
    /// or `host:port`
    #[arg(long, env = "ROUTING_HOST", default_value = "localhost")]
    routing_host: String,

    /// StatsD endpoint for metrics, as `host:port`; metrics are dropped
    /// when unset
    #[arg(long, env = "STATSD_ADDR")]
    statsd_addr: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Some(addr) = &cli.statsd_addr {
        if let Err(e) = install_statsd_recorder(addr) {
            tracing::warn!(
                address = %addr,
                error = %e,
                "statsd recorder not installed, metrics will be dropped"
            );
        }
    }

    let config = match Config::new(&cli.routing_host) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            process::exit(1);
        }
    };

    if let Err(e) = content_notifier::run(config).await {
        tracing::error!(error = %e, "couldn't set up HTTP listener");
        process::exit(1);
    }
}

fn install_statsd_recorder(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (host, port) = addr
        .rsplit_once(':')
        .ok_or("statsd address must be host:port")?;
    let recorder = StatsdBuilder::from(host, port.parse()?)
        .with_queue_size(5000)
        .build(Some("content-notifier"))?;
    metrics::set_global_recorder(recorder)
        .map_err(|_| "global metrics recorder already installed")?;

    for def in metrics_defs::ALL_METRICS {
        match def.metric_type {
            MetricType::Counter => metrics::describe_counter!(def.name, def.description),
            MetricType::Histogram => metrics::describe_histogram!(def.name, def.description),
        }
    }

    Ok(())
}
