//! Progress reporting for voting runs

pub mod reporter;
