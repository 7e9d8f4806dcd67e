//! Build and print the intrinsic table.

use super::input::{Input, fail, open_session};

pub struct TableArgs {
    pub input: Input,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: TableArgs) {
    let session = open_session(&args.input, args.color);

    let table = match session.intrinsic_table() {
        Ok(table) => table,
        Err(e) => {
            eprintln!("{}", e.render(session.source(), args.color));
            std::process::exit(1);
        }
    };

    if args.json {
        let json = serde_json::to_string_pretty(&*table).unwrap_or_else(|e| fail(&e.to_string()));
        println!("{}", json);
    } else {
        print!("{}", intrindef_table::dump(&table));
    }
}
