//! Latency sampling and ranking.
//!
//! * [`probe`]: the [`probe::Prober`] abstraction and its ICMP implementation.
//! * [`scanner`]: single scan passes over a target list (extremes, ranking, average).
//! * [`survey`]: the full survey pipeline chaining those passes.

pub mod probe;
pub mod scanner;
pub mod survey;
