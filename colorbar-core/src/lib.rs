pub mod backend;
pub mod chart;
pub mod cli;
pub mod client;
pub mod conf;
pub mod logging;
pub mod render;
pub mod schedule;
pub mod server;
pub mod watch;
