//! Testing utilities and harness for swipedeck

pub mod robot;
pub mod test_rule;

pub use robot::*;
pub use test_rule::*;
