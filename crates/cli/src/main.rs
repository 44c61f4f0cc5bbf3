use clap::Parser;
use ferrous_lookup_domain::{CliOverrides, LookupAnswer, RecordType};
use ferrous_lookup_infrastructure::LookupClient;
use serde::Serialize;
use std::process::ExitCode;
use tracing::{debug, error, info};

mod bootstrap;

#[derive(Parser)]
#[command(name = "ferrous-lookup")]
#[command(version)]
#[command(about = "Ferrous Lookup - CNAME, MX and TXT queries against DNS resolvers")]
struct Cli {
    /// Domain to query
    domain: String,

    /// Record type (CNAME, MX, TXT)
    #[arg(default_value = "MX")]
    record_type: RecordType,

    /// Resolver to query, in order (repeatable); defaults to the system resolvers
    #[arg(short = 's', long = "server", value_name = "IP")]
    servers: Vec<String>,

    /// Overall query timeout in milliseconds
    #[arg(short = 't', long, value_name = "MS")]
    timeout: Option<u64>,

    /// Resolver port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the answer as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    domain: &'a str,
    #[serde(flatten)]
    answer: &'a LookupAnswer,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cli_overrides = CliOverrides {
        query_timeout: cli.timeout,
        port: cli.port,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging);

    debug!(
        domain = %cli.domain,
        record_type = %cli.record_type,
        servers = cli.servers.len(),
        timeout_ms = config.lookup.query_timeout,
        "Starting lookup"
    );

    let client = LookupClient::new(&config.lookup);
    let request = client.build_request(&cli.domain, cli.record_type, &cli.servers)?;

    let answer = client.lookup(&request).await.map_err(|e| {
        error!(domain = %cli.domain, record_type = %cli.record_type, error = %e, "Lookup failed");
        e
    })?;

    if answer.is_empty() {
        info!(
            domain = %request.domain(),
            record_type = %answer.record_type(),
            "No matching records"
        );
    }

    if cli.json {
        let output = JsonOutput {
            domain: request.domain(),
            answer: &answer,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for line in answer.lines() {
            println!("{}", line);
        }
    }

    Ok(())
}
