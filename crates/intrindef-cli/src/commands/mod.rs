pub mod ast;
pub mod check;
pub mod input;
pub mod logging;
pub mod permute;
pub mod table;

#[cfg(test)]
mod permute_tests;
