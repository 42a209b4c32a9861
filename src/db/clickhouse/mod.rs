pub mod client;

pub use client::MetricsWriter;
