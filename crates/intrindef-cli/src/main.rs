mod cli;
mod commands;

use cli::{AstParams, CheckParams, PermuteParams, TableParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    commands::logging::init(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("ast", m)) => {
            let params = AstParams::from_matches(m);
            commands::ast::run(params.into());
        }
        Some(("table", m)) => {
            let params = TableParams::from_matches(m);
            commands::table::run(params.into());
        }
        Some(("permute", m)) => {
            let params = PermuteParams::from_matches(m);
            commands::permute::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
