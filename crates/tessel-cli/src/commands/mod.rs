pub mod build;
pub mod decode;
pub mod dump;
pub mod encode;
pub mod hash;
pub mod schema_loader;

mod error;

#[cfg(test)]
mod commands_tests;

pub use error::CliError;

/// Print `error: <message>` to stderr and exit with status 1.
pub fn exit_with(err: CliError) -> ! {
    eprintln!("error: {}", err);
    std::process::exit(1);
}
