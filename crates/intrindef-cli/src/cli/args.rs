//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Declaration file (positional). `-` reads stdin.
pub fn input_path_arg() -> Arg {
    Arg::new("input_path")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Declaration file ('-' for stdin)")
}

/// Inline declaration text (-e/--text).
pub fn input_text_arg() -> Arg {
    Arg::new("input_text")
        .short('e')
        .long("text")
        .value_name("TEXT")
        .conflicts_with("input_path")
        .help("Inline declaration text")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Log verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Raise log verbosity (-v debug, -vv trace)")
}

/// Machine-readable output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of text")
}

/// Restrict output to one intrinsic (-i/--intrinsic).
pub fn intrinsic_arg() -> Arg {
    Arg::new("intrinsic")
        .long("intrinsic")
        .short('i')
        .value_name("NAME")
        .help("Only permute overloads of this intrinsic")
}

/// Values for `num` template parameters (--numbers 2,3,4).
pub fn numbers_arg() -> Arg {
    Arg::new("numbers")
        .long("numbers")
        .value_name("N,..")
        .value_delimiter(',')
        .value_parser(value_parser!(u32))
        .help("Values a 'num' template parameter ranges over [default: 2,3,4]")
}

/// Hash prefix length (--hash-len).
pub fn hash_len_arg() -> Arg {
    Arg::new("hash_len")
        .long("hash-len")
        .value_name("LEN")
        .value_parser(value_parser!(usize))
        .help("Hex characters kept from each permutation hash [default: 6]")
}
