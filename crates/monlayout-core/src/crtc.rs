// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::output::optional_ref;
use crate::props::Properties;
use crate::transform::Transform;
use crate::wire::CrtcRecord;

/// A scanout unit. Geometry is only meaningful while `current_mode` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crtc {
    pub id: u32,
    pub winsys_id: i64,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub current_mode: Option<u32>,
    pub current_transform: Transform,
    pub transforms: Vec<Transform>,
    pub properties: Properties,
}

impl Crtc {
    pub fn from_record(rec: CrtcRecord) -> Result<Self> {
        let (id, winsys_id, x, y, width, height, current_mode, transform, transforms, properties) =
            rec;

        Ok(Self {
            id,
            winsys_id,
            x,
            y,
            width,
            height,
            current_mode: optional_ref("crtc", id, "current mode", current_mode)?,
            current_transform: Transform::from_wire(transform)?,
            transforms: transforms
                .into_iter()
                .map(Transform::from_wire)
                .collect::<Result<_>>()?,
            properties,
        })
    }

    pub fn in_use(&self) -> bool {
        self.current_mode.is_some()
    }
}
