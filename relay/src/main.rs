//! Command-line interface for the header relay.
//!
//! Replays a header fixture against a fresh relay and reports every outcome.

use std::path::PathBuf;
use std::process;

use clap::{Arg, ArgAction, Command};

use btc_relay::error::ConfigError;
use btc_relay::fixture::HeaderFixture;
use btc_relay::{
    init_logging, LevelFilter, LogFileConfig, LogRotation, LoggingConfig, Network, Relay,
    RelayConfig, ValidationMode,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> btc_relay::error::Result<()> {
    let matches = Command::new("btc-relay")
        .version(btc_relay::VERSION)
        .about("Replay Bitcoin block headers against a header relay")
        .arg(
            Arg::new("headers")
                .long("headers")
                .value_name("FILE")
                .help("JSON fixture: [{\"header\": hex, \"height\": n}, ...], first entry is genesis")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("JSON relay configuration")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("network")
                .short('n')
                .long("network")
                .value_name("NETWORK")
                .help("Network the headers belong to")
                .value_parser(["mainnet", "testnet", "signet", "regtest"]),
        )
        .arg(
            Arg::new("validation-mode")
                .long("validation-mode")
                .value_name("MODE")
                .help("Validation mode")
                .value_parser(["none", "basic", "full"]),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level")
                .value_parser(["error", "warn", "info", "debug", "trace"]),
        )
        .arg(
            Arg::new("log-dir")
                .long("log-dir")
                .value_name("DIR")
                .help("Also write logs to DIR/relay.log")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log-rotation")
                .long("log-rotation")
                .value_name("POLICY")
                .help("Start a new log file every hour or day instead of appending to relay.log")
                .value_parser(["never", "hourly", "daily"])
                .requires("log-dir"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Disable console logging")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => RelayConfig::from_json_file(path)?,
        None => RelayConfig::default(),
    };

    if let Some(network) = matches.get_one::<String>("network") {
        config.network = match network.as_str() {
            "mainnet" => Network::Bitcoin,
            "testnet" => Network::Testnet,
            "signet" => Network::Signet,
            "regtest" => Network::Regtest,
            _ => unreachable!(),
        };
    }
    if let Some(mode) = matches.get_one::<String>("validation-mode") {
        let mode = mode
            .parse::<ValidationMode>()
            .map_err(|e| ConfigError::InvalidValue("validation_mode", e))?;
        config = config.with_validation_mode(mode);
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config = config.with_log_level(level);
    }
    config.validate()?;

    let level = config
        .log_level
        .parse::<LevelFilter>()
        .map_err(|e| ConfigError::InvalidValue("log_level", e.to_string()))?;
    let rotation = matches
        .get_one::<String>("log-rotation")
        .map(|r| r.parse::<LogRotation>())
        .transpose()
        .map_err(|e| ConfigError::InvalidValue("log_rotation", e))?
        .unwrap_or_default();
    let _guard = init_logging(LoggingConfig {
        level: Some(level),
        console: !matches.get_flag("quiet"),
        file: matches
            .get_one::<PathBuf>("log-dir")
            .map(|dir| LogFileConfig::new(dir).with_rotation(rotation)),
    })?;

    let path = matches.get_one::<PathBuf>("headers").expect("required argument");
    let fixture = HeaderFixture::load(path)?;

    tracing::info!("Network: {:?}", config.network);
    tracing::info!("Validation mode: {:?}", config.validation_mode);
    tracing::info!("Replaying {} headers from {}", fixture.submissions.len(), path.display());

    let mut relay = Relay::new(config);
    let genesis = relay.initialize_hex(&fixture.genesis.header, fixture.genesis.height)?;
    println!("genesis {} at {}", genesis, fixture.genesis.height);

    let mut rejected = 0usize;
    for (index, entry) in fixture.submissions.iter().enumerate() {
        match relay.submit_hex(&entry.header, entry.height) {
            Ok(accepted) => println!("accepted {} at {}", accepted.block_hash, accepted.height),
            Err(e) => {
                rejected += 1;
                tracing::warn!("Submission {} rejected: {}", index + 1, e);
                println!("rejected {}: {} ({})", index + 1, e.code(), e);
            }
        }
    }

    println!(
        "{} submitted, {} accepted, {} rejected, {} headers stored",
        fixture.submissions.len(),
        fixture.submissions.len() - rejected,
        rejected,
        relay.len()
    );
    Ok(())
}
