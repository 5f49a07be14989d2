use clap::Parser;
use hostcache_domain::{CliOverrides, DomainError};
use tracing::{info, warn};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "hostcache")]
#[command(version = "0.1.0")]
#[command(about = "Cached host name resolution with locality checks")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Live resolution timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Address to report as this host's public IP
    #[arg(long, value_name = "IP")]
    static_ip: Option<String>,

    /// Answer from the cache only; never resolve
    #[arg(long)]
    cached_only: bool,

    /// Host names or addresses to resolve
    #[arg(required = true)]
    hosts: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        resolver_timeout_secs: cli.timeout,
        static_ip: cli.static_ip.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting hostcache v{}", env!("CARGO_PKG_VERSION"));

    let services = di::Services::new(&config)?;

    for host in &cli.hosts {
        let answer = if cli.cached_only {
            match services.facade.resolve_cached_only(host) {
                Ok(address) => address.to_string(),
                Err(DomainError::NotInCache(_)) => "not cached".to_string(),
                Err(DomainError::KnownUnresolvable(_)) => "unresolvable".to_string(),
                Err(e) => format!("error: {}", e),
            }
        } else {
            match services.facade.resolve(host).await {
                Ok(Some(address)) => address.to_string(),
                Ok(None) => "unresolvable".to_string(),
                Err(e) => {
                    warn!(host = %host, error = %e, "Resolution failed");
                    format!("error: {}", e)
                }
            }
        };

        let local = services.classifier.is_local(host).await;
        println!("{host}\t{answer}\tlocal={local}");
    }

    println!("public address\t{}", services.classifier.my_public_ip().await);

    let stats = services.facade.stats();
    println!(
        "cache\tpositive={} negative={} excluded={} hits={} misses={} hit_rate={:.1}% negative_hits={} evictions={} invariant_violations={}",
        stats.positive_entries,
        stats.negative_entries,
        stats.excluded_hosts,
        stats.hits,
        stats.misses,
        stats.hit_rate,
        stats.negative_hits,
        stats.evictions,
        stats.invariant_violations,
    );

    services.facade.shutdown();
    Ok(())
}
