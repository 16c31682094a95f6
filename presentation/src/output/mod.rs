//! Output formatting for voting results

pub mod console;
