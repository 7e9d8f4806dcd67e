//! List the concrete permutations of each overload.

use std::fmt::Write as _;

use intrindef_compiler::{Permutation, PermuteOptions, Session};
use serde::Serialize;

use super::input::{Input, fail, open_session};

pub struct PermuteArgs {
    pub input: Input,
    pub intrinsic: Option<String>,
    pub numbers: Option<Vec<u32>>,
    pub hash_len: Option<usize>,
    pub json: bool,
    pub color: bool,
}

/// Permutations of one declared overload.
#[derive(Serialize)]
pub struct OverloadPermutations {
    pub intrinsic: String,
    /// Printed declaration.
    pub overload: String,
    pub permutations: Vec<Permutation>,
}

pub fn run(args: PermuteArgs) {
    let mut options = PermuteOptions::new();
    if let Some(numbers) = args.numbers {
        options = options.with_template_numbers(numbers);
    }
    if let Some(len) = args.hash_len {
        options = options.with_hash_len(len);
    }

    let session = open_session(&args.input, args.color).with_options(options);

    let listing = match collect(&session, args.intrinsic.as_deref()) {
        Ok(listing) => listing,
        Err(e) => {
            eprintln!("{}", e.render(session.source(), args.color));
            std::process::exit(1);
        }
    };

    if let Some(name) = &args.intrinsic {
        if listing.is_empty() {
            fail(&format!("no intrinsic named '{}'", name));
        }
    }

    if args.json {
        let json = serde_json::to_string_pretty(&listing).unwrap_or_else(|e| fail(&e.to_string()));
        println!("{}", json);
    } else {
        print!("{}", render(&listing));
    }
}

/// Permute every overload, or only those of the intrinsic called `only`.
pub fn collect(
    session: &Session,
    only: Option<&str>,
) -> intrindef_compiler::Result<Vec<OverloadPermutations>> {
    let sem = session.sem();
    let mut out = Vec::new();
    for (_, intrinsics) in sem.families() {
        for &intrinsic in intrinsics {
            let name = &sem[intrinsic].name;
            if only.is_some_and(|only| only != name.as_str()) {
                continue;
            }
            for &overload in &sem[intrinsic].overloads {
                out.push(OverloadPermutations {
                    intrinsic: name.clone(),
                    overload: sem[overload].description.clone(),
                    permutations: session.permutations(overload)?.as_ref().clone(),
                });
            }
        }
    }
    Ok(out)
}

/// One block per overload: the declaration, then `hash  description` lines.
pub fn render(listing: &[OverloadPermutations]) -> String {
    let mut out = String::new();
    for (i, entry) in listing.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        writeln!(out, "{}", entry.overload).unwrap();
        for perm in &entry.permutations {
            writeln!(out, "  {}  {}", perm.hash, perm.description).unwrap();
        }
    }
    out
}
