//! Traffic client: polls the color endpoint, carrying the per-color
//! fault-injection controls in every request body.

mod controls;
mod error;
mod poller;
#[cfg(test)]
mod tests;

pub use controls::{ColorControl, ColorControls, EMPTY_BODY};
pub use error::ClientError;
pub use poller::{ColorClient, ColorEvent, decode_event};
