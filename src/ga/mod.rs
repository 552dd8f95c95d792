//! Genetic Algorithm framework.
//!
//! A generic, domain-agnostic GA. Users define their problem by
//! implementing [`GaProblem`], which specifies how to evaluate, select,
//! recombine, and mutate individuals. The population is grown from one
//! seed individual and replaced wholesale every generation; the fittest
//! individual ever seen is returned.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, mutation
//!   probability, fitness threshold)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final optimization result with statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod runner;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use types::GaProblem;
