//! Processor output loaders
//!
//! Provides [`JsonFileOutputLoader`], which implements the
//! [`ProcessorOutputLoader`](nlp_quorum_application::ProcessorOutputLoader) port.

mod json_loader;

pub use json_loader::JsonFileOutputLoader;
