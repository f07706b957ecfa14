mod pid;
pub mod setup;
#[cfg(test)]
mod tests;

pub use pid::{PidFile, remove_pid};
pub use setup::{SHUTDOWN_TIMEOUT_SECONDS, build_pingora_server, run};
