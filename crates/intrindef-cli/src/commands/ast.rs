//! Print the parsed declarations in canonical form.

use intrindef_compiler::parser;

use super::input::{Input, fail};

pub struct AstArgs {
    pub input: Input,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let (source, origin) = args.input.load().unwrap_or_else(|e| fail(&e.to_string()));

    let ast = match parser::parse(&source, &origin) {
        Ok(ast) => ast,
        Err(e) => {
            eprintln!("{}", e.render(&source, args.color));
            std::process::exit(1);
        }
    };

    print!("{}", ast);
}
