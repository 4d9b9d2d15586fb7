//! A weighted draft lottery. Managers hold balls according to a distribution scheme; balls are
//! drawn one at a time, and every ball of a drafted manager leaves the pool before the next pick.
//! Alongside the draw, the exact odds of every manager landing every pick are derived, and can be
//! audited by brute-force enumeration or Monte Carlo simulation.

pub mod comb;
pub mod draw;
pub mod enumerate;
pub mod league;
pub mod linear;
pub mod lottery;
pub mod mc;
pub mod odds;
pub mod participant;
pub mod pool;
pub mod print;
pub mod probs;
pub mod report;
pub mod scheme;

#[doc = include_str!("../../README.md")]
#[cfg(doc)]
fn readme() {}
