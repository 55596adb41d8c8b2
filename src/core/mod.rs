pub mod date_parser;
pub mod cache;
pub mod orchestrator;
pub mod alerts;
