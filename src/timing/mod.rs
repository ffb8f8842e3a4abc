//! Timing: stopwatch, display formatting, periodic ticks.

mod stopwatch;
mod ticker;

pub use stopwatch::{format_elapsed, Stopwatch};
pub use ticker::Ticker;
