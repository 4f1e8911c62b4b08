pub mod action_executor;
pub mod collection;
pub mod compose;
pub mod config;
pub mod contract;
pub mod discovery;
pub mod filter;
pub mod history;
pub mod labels;
pub mod launch;
pub mod logging;
pub mod model;
pub mod navigator;
pub mod runtime;
pub mod session;
pub mod store;
pub mod transport;
