// Author: Dustin Pilgrim
// License: MIT

pub mod client;
pub mod convert;
pub mod error;
pub mod protocol;
pub mod subscribe;

pub use client::DisplayConfigClient;
pub use subscribe::{ChangeEvent, Subscription, subscribe};
