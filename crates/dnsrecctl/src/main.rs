// # dnsrecctl - DNS record command-line driver
//
// A THIN layer over `dnsrec_core::RecordProvider`:
// - Reads configuration from environment variables
// - Builds the provider through the registry
// - Runs exactly one operation and prints the resulting records
//
// No DNS logic lives here.
//
// ## Configuration
//
// - `NETLIFY_TOKEN`: Netlify personal access token (required)
// - `DNSREC_ZONE`: Zone to operate on, e.g. `example.com` (required)
// - `DNSREC_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// ## Usage
//
// ```bash
// export NETLIFY_TOKEN=nfp_...
// export DNSREC_ZONE=example.com
//
// dnsrecctl list
// dnsrecctl append www A 192.0.2.1 300
// dnsrecctl set _acme-challenge TXT abc123
// dnsrecctl delete _acme-challenge TXT
// ```

use anyhow::Result;
use dnsrec_core::{ProviderConfig, ProviderRegistry, Record, RecordProvider};
use std::env;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

const USAGE: &str = "\
usage: dnsrecctl list
       dnsrecctl append NAME TYPE VALUE [TTL]
       dnsrecctl set NAME TYPE VALUE [TTL]
       dnsrecctl delete NAME TYPE";

/// Exit codes
///
/// - 0: Operation succeeded
/// - 1: Configuration or usage error
/// - 2: Operation failed
#[derive(Debug, Clone, Copy)]
enum CtlExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<CtlExitCode> for ExitCode {
    fn from(code: CtlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    token: String,
    zone: String,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            token: env::var("NETLIFY_TOKEN").unwrap_or_default(),
            zone: env::var("DNSREC_ZONE").unwrap_or_default(),
            log_level: env::var("DNSREC_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            anyhow::bail!(
                "NETLIFY_TOKEN is required. \
                Set it via: export NETLIFY_TOKEN=your_personal_access_token"
            );
        }

        if self.zone.trim().trim_end_matches('.').is_empty() {
            anyhow::bail!(
                "DNSREC_ZONE is required. \
                Set it via: export DNSREC_ZONE=example.com"
            );
        }

        self.level()?;
        Ok(())
    }

    fn level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "DNSREC_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }
}

/// One invocation of the driver
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Append(Record),
    Set(Record),
    Delete(Record),
}

impl Command {
    /// Parse positional arguments (without the program name)
    fn parse(args: &[String]) -> Result<Self> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        match args.as_slice() {
            ["list"] => Ok(Self::List),
            ["append", rest @ ..] => Ok(Self::Append(parse_record(rest)?)),
            ["set", rest @ ..] => Ok(Self::Set(parse_record(rest)?)),
            ["delete", name, record_type] => Ok(Self::Delete(Record::new(
                *name,
                record_type.to_uppercase(),
                "",
            ))),
            _ => anyhow::bail!("{}", USAGE),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Append(_) => "append",
            Self::Set(_) => "set",
            Self::Delete(_) => "delete",
        }
    }
}

/// `NAME TYPE VALUE [TTL]`
fn parse_record(args: &[&str]) -> Result<Record> {
    let (name, record_type, value, ttl) = match args {
        [name, record_type, value] => (name, record_type, value, None),
        [name, record_type, value, ttl] => (name, record_type, value, Some(ttl)),
        _ => anyhow::bail!("{}", USAGE),
    };

    let mut record = Record::new(*name, record_type.to_uppercase(), *value);
    if let Some(ttl) = ttl {
        let secs: u64 = ttl
            .parse()
            .map_err(|_| anyhow::anyhow!("TTL must be a number of seconds. Got: {}", ttl))?;
        record = record.with_ttl(Duration::from_secs(secs));
    }
    Ok(record)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    let log_level = config.level().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    let provider = match build_provider(&config) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Failed to create provider: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CtlExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        match run(provider.as_ref(), &config.zone, &command).await {
            Ok(records) => {
                for record in &records {
                    println!("{}", record);
                }
                CtlExitCode::Success
            }
            Err(e) => {
                error!("{} failed: {:#}", command.name(), e);
                CtlExitCode::RuntimeError
            }
        }
    });

    result.into()
}

fn build_provider(config: &Config) -> Result<Box<dyn RecordProvider>> {
    let registry = ProviderRegistry::new();
    dnsrec_provider_netlify::register(&registry);

    let provider = registry.create_provider(&ProviderConfig::netlify(config.token.clone()))?;
    Ok(provider)
}

/// Run one command against the provider
async fn run(provider: &dyn RecordProvider, zone: &str, command: &Command) -> Result<Vec<Record>> {
    info!(
        "Running {} on zone {} via {}",
        command.name(),
        zone,
        provider.provider_name()
    );

    let records = match command {
        Command::List => provider.list_records(zone).await?,
        Command::Append(record) => {
            provider
                .append_records(zone, std::slice::from_ref(record))
                .await?
        }
        Command::Set(record) => {
            provider
                .set_records(zone, std::slice::from_ref(record))
                .await?
        }
        Command::Delete(record) => {
            provider
                .delete_records(zone, std::slice::from_ref(record))
                .await?
        }
    };

    Ok(records)
}
