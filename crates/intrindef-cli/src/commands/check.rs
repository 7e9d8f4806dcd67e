use super::input::{Input, open_session};

pub struct CheckArgs {
    pub input: Input,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let session = open_session(&args.input, args.color);

    // Building the table reports unmatchable names the resolver lets through.
    if let Err(e) = session.intrinsic_table() {
        eprintln!("{}", e.render(session.source(), args.color));
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
