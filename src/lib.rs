//! Strategies for the two-player pots game, a match engine, and a randomized
//! regression harness that checks a champion strategy never loses.

pub mod engine;
