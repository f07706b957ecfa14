//! Fixed-period background tasks on the Tokio runtime.

mod periodic;
#[cfg(test)]
mod tests;

pub use periodic::{PeriodicTask, TaskHandle};
