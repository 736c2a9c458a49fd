pub mod ast;
pub mod check;
pub mod run;
pub mod script_loader;

#[cfg(test)]
mod run_tests;
#[cfg(test)]
mod script_loader_tests;
