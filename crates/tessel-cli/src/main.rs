mod cli;
mod commands;

use cli::{BuildParams, DecodeParams, DumpParams, EncodeParams, HashParams, build_cli};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `TESSEL_LOG=debug`.
const LOG_ENV: &str = "TESSEL_LOG";

fn main() {
    init_tracing();
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("build", m)) => {
            let params = BuildParams::from_matches(m);
            commands::build::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("decode", m)) => {
            let params = DecodeParams::from_matches(m);
            commands::decode::run(params.into());
        }
        Some(("encode", m)) => {
            let params = EncodeParams::from_matches(m);
            commands::encode::run(params.into());
        }
        Some(("hash", m)) => {
            let params = HashParams::from_matches(m);
            commands::hash::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
