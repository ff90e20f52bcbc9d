// Author: Dustin Pilgrim
// License: MIT
//
// org.gnome.Mutter.DisplayConfig as seen on the bus. Records carry `a{sv}`
// maps as zvariant values; `convert` turns them into the core wire records.

use std::collections::HashMap;

use zvariant::OwnedValue;

pub const BUS_NAME: &str = "org.gnome.Mutter.DisplayConfig";
pub const OBJECT_PATH: &str = "/org/gnome/Mutter/DisplayConfig";
pub const INTERFACE: &str = "org.gnome.Mutter.DisplayConfig";

pub const GET_RESOURCES: &str = "GetResources";
pub const GET_CURRENT_STATE: &str = "GetCurrentState";
pub const APPLY_MONITORS_CONFIG: &str = "ApplyMonitorsConfig";
pub const MONITORS_CHANGED: &str = "MonitorsChanged";

pub type BusProperties = HashMap<String, OwnedValue>;

pub type BusCrtc = (u32, i64, i32, i32, i32, i32, i32, u32, Vec<u32>, BusProperties);

pub type BusOutput = (u32, i64, i32, Vec<u32>, String, Vec<u32>, Vec<u32>, BusProperties);

pub type BusHwMode = (u32, i64, u32, u32, f64, u32);

pub type BusResources = (u32, Vec<BusCrtc>, Vec<BusOutput>, Vec<BusHwMode>, i32, i32);

pub type BusMonitorSpec = (String, String, String, String);

pub type BusMode = (String, i32, i32, f64, f64, Vec<f64>, BusProperties);

pub type BusMonitor = (BusMonitorSpec, Vec<BusMode>, BusProperties);

pub type BusLogicalMonitor = (i32, i32, f64, u32, bool, Vec<BusMonitorSpec>, BusProperties);

pub type BusCurrentState = (u32, Vec<BusMonitor>, Vec<BusLogicalMonitor>, BusProperties);

pub type BusAssignment = (String, String, BusProperties);

pub type BusPlacement = (i32, i32, f64, u32, bool, Vec<BusAssignment>);
