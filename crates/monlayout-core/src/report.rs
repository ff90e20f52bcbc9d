// Author: Dustin Pilgrim
// License: MIT

use serde::Serialize;

use crate::props::Properties;
use crate::snapshot::{LayoutMode, Snapshot};
use crate::transform::Transform;

/// Printable view of a snapshot. Building it does no I/O.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateReport {
    pub serial: u32,
    pub max_screen_width: i32,
    pub max_screen_height: i32,
    pub layout_mode: LayoutMode,
    pub monitors: Vec<MonitorReport>,
    pub logical_monitors: Vec<LogicalMonitorReport>,
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorReport {
    pub connector: String,
    pub display_name: Option<String>,
    pub vendor: String,
    pub product: String,
    pub serial: String,
    pub builtin: bool,
    /// `WIDTHxHEIGHT@FREQ`, absent when the monitor shows nothing.
    pub current_mode: Option<String>,
    pub available_modes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicalMonitorReport {
    pub x: i32,
    pub y: i32,
    pub scale: f64,
    pub transform: Transform,
    pub primary: bool,
    pub connectors: Vec<String>,
}

impl StateReport {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let (max_screen_width, max_screen_height) = snapshot.max_screen_size();

        Self {
            serial: snapshot.serial(),
            max_screen_width,
            max_screen_height,
            layout_mode: snapshot.layout_mode(),
            monitors: snapshot
                .monitors()
                .iter()
                .map(|m| MonitorReport {
                    connector: m.spec.connector.clone(),
                    display_name: m.display_name().map(str::to_string),
                    vendor: m.spec.vendor.clone(),
                    product: m.spec.product.clone(),
                    serial: m.spec.serial.clone(),
                    builtin: m.is_builtin(),
                    current_mode: m.current_mode().map(|mode| mode.to_string()),
                    available_modes: m.modes.iter().map(|mode| mode.id.clone()).collect(),
                })
                .collect(),
            logical_monitors: snapshot
                .logical_monitors()
                .iter()
                .map(|lm| LogicalMonitorReport {
                    x: lm.x,
                    y: lm.y,
                    scale: lm.scale,
                    transform: lm.transform,
                    primary: lm.primary,
                    connectors: lm.connectors().map(str::to_string).collect(),
                })
                .collect(),
            properties: snapshot.properties().clone(),
        }
    }
}
