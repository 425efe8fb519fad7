// Library root: the load pipeline and the pure filter/presentation model the
// dashboard is built on.

pub mod bootstrap;
pub mod charts;
pub mod config;
pub mod controller;
pub mod derive;
pub mod fetch;
pub mod filter;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
