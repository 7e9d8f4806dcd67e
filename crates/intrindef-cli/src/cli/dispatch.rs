//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but keep the raw
//! [`ColorChoice`]; the `Into<*Args>` impls resolve it against the terminal.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::input::Input;
use crate::commands::permute::PermuteArgs;
use crate::commands::table::TableArgs;

pub struct CheckParams {
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input_path: m.get_one::<PathBuf>("input_path").cloned(),
            input_text: m.get_one::<String>("input_text").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: Input::new(p.input_path, p.input_text),
            color: p.color.should_colorize(),
        }
    }
}

pub struct AstParams {
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input_path: m.get_one::<PathBuf>("input_path").cloned(),
            input_text: m.get_one::<String>("input_text").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            input: Input::new(p.input_path, p.input_text),
            color: p.color.should_colorize(),
        }
    }
}

pub struct TableParams {
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub json: bool,
    pub color: ColorChoice,
}

impl TableParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input_path: m.get_one::<PathBuf>("input_path").cloned(),
            input_text: m.get_one::<String>("input_text").cloned(),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<TableParams> for TableArgs {
    fn from(p: TableParams) -> Self {
        Self {
            input: Input::new(p.input_path, p.input_text),
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

pub struct PermuteParams {
    pub input_path: Option<PathBuf>,
    pub input_text: Option<String>,
    pub intrinsic: Option<String>,
    pub numbers: Option<Vec<u32>>,
    pub hash_len: Option<usize>,
    pub json: bool,
    pub color: ColorChoice,
}

impl PermuteParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input_path: m.get_one::<PathBuf>("input_path").cloned(),
            input_text: m.get_one::<String>("input_text").cloned(),
            intrinsic: m.get_one::<String>("intrinsic").cloned(),
            numbers: m
                .get_many::<u32>("numbers")
                .map(|values| values.copied().collect()),
            hash_len: m.get_one::<usize>("hash_len").copied(),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<PermuteParams> for PermuteArgs {
    fn from(p: PermuteParams) -> Self {
        Self {
            input: Input::new(p.input_path, p.input_text),
            intrinsic: p.intrinsic,
            numbers: p.numbers,
            hash_len: p.hash_len,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
