// Author: Dustin Pilgrim
// License: MIT

use crate::error::Result;
use crate::placement::ApplyMethod;
use crate::props::Properties;
use crate::wire::{CurrentStateReply, PlacementRecord, ResourcesReply};

/// The display configuration service, seen through its three calls.
///
/// Implementations map transport failures onto [`crate::Error`]:
/// unreachable service, undecodable replies, and stale-serial rejections.
pub trait DisplayService {
    fn get_resources(&self) -> Result<ResourcesReply>;

    fn get_current_state(&self) -> Result<CurrentStateReply>;

    fn apply_monitors_config(
        &self,
        serial: u32,
        method: ApplyMethod,
        logical_monitors: Vec<PlacementRecord>,
        properties: Properties,
    ) -> Result<()>;
}

impl<S: DisplayService + ?Sized> DisplayService for &S {
    fn get_resources(&self) -> Result<ResourcesReply> {
        (**self).get_resources()
    }

    fn get_current_state(&self) -> Result<CurrentStateReply> {
        (**self).get_current_state()
    }

    fn apply_monitors_config(
        &self,
        serial: u32,
        method: ApplyMethod,
        logical_monitors: Vec<PlacementRecord>,
        properties: Properties,
    ) -> Result<()> {
        (**self).apply_monitors_config(serial, method, logical_monitors, properties)
    }
}
