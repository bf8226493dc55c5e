//! The three demonstration scenarios, rendered line by line into a
//! [`TextSink`].
mod example;
mod text_sink;

pub use example::*;
pub use text_sink::*;
