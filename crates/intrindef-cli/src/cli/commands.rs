//! Command builders for the CLI.

use clap::Command;

use super::args::*;

fn with_input_args(cmd: Command) -> Command {
    cmd.arg(input_path_arg())
        .arg(input_text_arg())
        .arg(color_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("intrindef")
        .about("Inspect shading-language intrinsic declaration files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(check_command())
        .subcommand(ast_command())
        .subcommand(table_command())
        .subcommand(permute_command())
}

/// Parse and resolve a declaration file.
pub fn check_command() -> Command {
    with_input_args(
        Command::new("check")
            .about("Validate a declaration file")
            .after_help(
                r#"EXAMPLES:
  intrindef check intrinsics.def
  intrindef check -e 'type f32 fn f(f32)'"#,
            ),
    )
}

/// Print the parsed declarations in canonical form.
pub fn ast_command() -> Command {
    with_input_args(
        Command::new("ast")
            .about("Print the parsed declarations")
            .after_help(
                r#"EXAMPLES:
  intrindef ast intrinsics.def
  intrindef ast -e 'type vec<N: num, T>'"#,
            ),
    )
}

/// Build and print the intrinsic table.
pub fn table_command() -> Command {
    with_input_args(
        Command::new("table")
            .about("Build and print the intrinsic table")
            .after_help(
                r#"EXAMPLES:
  intrindef table intrinsics.def
  intrindef table intrinsics.def --json | jq .overloads"#,
            ),
    )
    .arg(json_arg())
}

/// List concrete permutations of every overload.
pub fn permute_command() -> Command {
    with_input_args(
        Command::new("permute")
            .about("List the concrete permutations of each overload")
            .after_help(
                r#"EXAMPLES:
  intrindef permute intrinsics.def
  intrindef permute intrinsics.def -i clamp
  intrindef permute intrinsics.def --numbers 2,3 --hash-len 8 --json"#,
            ),
    )
    .arg(intrinsic_arg())
    .arg(numbers_arg())
    .arg(hash_len_arg())
    .arg(json_arg())
}
