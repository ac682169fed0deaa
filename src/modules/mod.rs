pub mod common;
pub mod executor;
pub mod orchestrator;
pub mod rules;
pub mod scanner;
pub mod strategies;

#[cfg(test)]
pub(crate) mod testing;
