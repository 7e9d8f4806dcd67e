use intrindef_compiler::{PermuteOptions, Session};

use super::permute::{collect, render};

const SOURCE: &str = "type f32 type i32 match fi: f32 | i32 fn f<T: fi>(T) -> T fn g(f32)";

fn session() -> Session {
    Session::new(SOURCE, "origin").unwrap()
}

#[test]
fn lists_every_overload() {
    let session = session();

    let listing = collect(&session, None).unwrap();

    insta::assert_snapshot!(render(&listing), @r"
    fn f<T: fi>(T) -> T
      a111d8  fn f(f32) -> f32
      6b06a3  fn f(i32) -> i32

    fn g(f32)
      081b91  fn g(f32)
    ");
}

#[test]
fn filters_by_intrinsic() {
    let session = session();

    let listing = collect(&session, Some("g")).unwrap();

    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].intrinsic, "g");
    assert!(collect(&session, Some("missing")).unwrap().is_empty());
}

#[test]
fn options_reach_the_permuter() {
    let session = Session::new("type f32 type vec<N: num, T> fn f<N: num>(vec<N, f32>)", "origin")
        .unwrap()
        .with_options(PermuteOptions::new().with_template_numbers([3]).with_hash_len(2));

    let listing = collect(&session, None).unwrap();

    let perms: Vec<(&str, &str)> = listing[0]
        .permutations
        .iter()
        .map(|p| (p.hash.as_str(), p.description.as_str()))
        .collect();
    assert_eq!(perms.len(), 1);
    assert_eq!(perms[0].1, "fn f(vec<3, f32>)");
    assert_eq!(perms[0].0.len(), 2);
}
