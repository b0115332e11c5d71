pub mod calendar;
pub mod store;
pub mod timeseries;
pub mod engine;
pub mod ingest_queue;
pub mod orchestrator;
