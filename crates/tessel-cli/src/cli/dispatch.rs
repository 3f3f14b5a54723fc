//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs populated from clap matches
//! - `from_matches()` extractors
//! - `From<*Params>` impls bridging dispatch to command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use tessel_format::Endian;

use super::ColorChoice;
use crate::commands::build::BuildArgs;
use crate::commands::decode::DecodeArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::encode::EncodeArgs;
use crate::commands::hash::HashArgs;

pub struct BuildParams {
    pub source_path: PathBuf,
    pub output: PathBuf,
    pub little_endian: bool,
}

impl BuildParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: required_path(m, "source_path"),
            output: required_path(m, "output"),
            little_endian: m.get_flag("little_endian"),
        }
    }
}

impl From<BuildParams> for BuildArgs {
    fn from(p: BuildParams) -> Self {
        Self {
            source_path: p.source_path,
            output: p.output,
            endian: endian(p.little_endian),
        }
    }
}

pub struct DumpParams {
    pub schema_path: PathBuf,
    pub color: ColorChoice,
    pub little_endian: bool,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_path: required_path(m, "schema_path"),
            color: parse_color(m),
            little_endian: m.get_flag("little_endian"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            schema_path: p.schema_path,
            color: p.color.should_colorize(),
            endian: endian(p.little_endian),
        }
    }
}

pub struct DecodeParams {
    pub schema_path: PathBuf,
    pub function: String,
    pub payload: String,
    pub compact: bool,
    pub color: ColorChoice,
    pub little_endian: bool,
}

impl DecodeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_path: required_path(m, "schema_path"),
            function: required_string(m, "function"),
            payload: required_string(m, "payload"),
            compact: m.get_flag("compact"),
            color: parse_color(m),
            little_endian: m.get_flag("little_endian"),
        }
    }
}

impl From<DecodeParams> for DecodeArgs {
    fn from(p: DecodeParams) -> Self {
        Self {
            schema_path: p.schema_path,
            function: p.function,
            payload: p.payload,
            pretty: !p.compact,
            color: p.color.should_colorize(),
            endian: endian(p.little_endian),
        }
    }
}

pub struct EncodeParams {
    pub schema_path: PathBuf,
    pub function: String,
    pub values: String,
    pub frame: bool,
    pub id: u16,
    pub little_endian: bool,
}

impl EncodeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_path: required_path(m, "schema_path"),
            function: required_string(m, "function"),
            values: required_string(m, "values"),
            frame: m.get_flag("frame"),
            id: m.get_one::<u16>("id").copied().unwrap_or(1),
            little_endian: m.get_flag("little_endian"),
        }
    }
}

impl From<EncodeParams> for EncodeArgs {
    fn from(p: EncodeParams) -> Self {
        Self {
            schema_path: p.schema_path,
            function: p.function,
            values: p.values,
            frame: p.frame.then_some(p.id),
            endian: endian(p.little_endian),
        }
    }
}

pub struct HashParams {
    pub strings: Vec<String>,
}

impl HashParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            strings: m
                .get_many::<String>("strings")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
        }
    }
}

impl From<HashParams> for HashArgs {
    fn from(p: HashParams) -> Self {
        Self { strings: p.strings }
    }
}

// Required args are enforced by clap, so the fallbacks never apply.
fn required_path(m: &ArgMatches, id: &str) -> PathBuf {
    m.get_one::<PathBuf>(id).cloned().unwrap_or_default()
}

fn required_string(m: &ArgMatches, id: &str) -> String {
    m.get_one::<String>(id).cloned().unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn endian(little: bool) -> Endian {
    if little { Endian::Little } else { Endian::Big }
}
