// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

#[cfg(feature = "clap")]
use clap::ValueEnum;

use crate::props::Properties;
use crate::transform::Transform;
use crate::wire::PlacementRecord;

/// One physical monitor assigned to a logical monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorAssignment {
    pub connector: String,
    pub mode_id: String,
    pub properties: Properties,
}

/// A logical monitor to submit. Several assignments form a clone group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalMonitorPlacement {
    pub x: i32,
    pub y: i32,
    pub scale: f64,
    pub transform: Transform,
    pub primary: bool,
    pub monitors: Vec<MonitorAssignment>,
}

impl LogicalMonitorPlacement {
    pub fn to_wire(&self) -> PlacementRecord {
        (
            self.x,
            self.y,
            self.scale,
            self.transform.to_wire(),
            self.primary,
            self.monitors
                .iter()
                .map(|m| (m.connector.clone(), m.mode_id.clone(), m.properties.clone()))
                .collect(),
        )
    }

    pub fn connectors(&self) -> impl Iterator<Item = &str> {
        self.monitors.iter().map(|m| m.connector.as_str())
    }

    pub fn is_clone_group(&self) -> bool {
        self.monitors.len() > 1
    }
}

#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApplyMethod {
    /// Validate only; nothing changes.
    Verify,
    /// Active until the next logout or hotplug.
    #[default]
    Temporary,
    /// Applied and remembered by the service.
    Persistent,
}

impl ApplyMethod {
    pub fn to_wire(self) -> u32 {
        match self {
            ApplyMethod::Verify => 0,
            ApplyMethod::Temporary => 1,
            ApplyMethod::Persistent => 2,
        }
    }

    /// Whether a successful apply makes the snapshot it was planned from stale.
    pub fn invalidates_snapshot(self) -> bool {
        !matches!(self, ApplyMethod::Verify)
    }
}
