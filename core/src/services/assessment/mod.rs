//! Stress assessment module
//!
//! Scores a completed ten-question quiz and builds the result shown to the
//! user. Scoring is pure: no I/O and no state between calls.

mod scorer;


pub use scorer::StressScorer;
