pub mod app;
pub mod config;
pub mod effects;
pub mod error;
pub mod event;
pub mod logging;
pub mod model;
pub mod paths;
pub mod session;
pub mod storage;
pub mod store;
pub mod transport;
pub mod view;
