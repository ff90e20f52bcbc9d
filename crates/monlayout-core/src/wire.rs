// Author: Dustin Pilgrim
// License: MIT
//
// Positional records exactly as org.gnome.Mutter.DisplayConfig lays them out.
// Only the entity model reads these; everything downstream uses named fields.

use crate::props::Properties;

/// `(uxiiiiiuaua{sv})`: id, winsys_id, x, y, width, height, current_mode,
/// current_transform, transforms, properties.
pub type CrtcRecord = (u32, i64, i32, i32, i32, i32, i32, u32, Vec<u32>, Properties);

/// `(uxiausauaua{sv})`: id, winsys_id, current_crtc, possible_crtcs, name,
/// modes, clones, properties.
pub type OutputRecord = (u32, i64, i32, Vec<u32>, String, Vec<u32>, Vec<u32>, Properties);

/// `(uxuudu)`: id, winsys_id, width, height, frequency, flags.
pub type HwModeRecord = (u32, i64, u32, u32, f64, u32);

/// `GetResources` reply: serial, crtcs, outputs, modes, max width, max height.
pub type ResourcesReply = (
    u32,
    Vec<CrtcRecord>,
    Vec<OutputRecord>,
    Vec<HwModeRecord>,
    i32,
    i32,
);

/// `(ssss)`: connector, vendor, product, serial.
pub type MonitorSpecRecord = (String, String, String, String);

/// `(siiddada{sv})`: id, width, height, refresh rate, preferred scale,
/// supported scales, properties.
pub type ModeRecord = (String, i32, i32, f64, f64, Vec<f64>, Properties);

/// `((ssss)a(siiddada{sv})a{sv})`
pub type MonitorRecord = (MonitorSpecRecord, Vec<ModeRecord>, Properties);

/// `(iiduba(ssss)a{sv})`: x, y, scale, transform, primary, monitors,
/// properties.
pub type LogicalMonitorRecord = (i32, i32, f64, u32, bool, Vec<MonitorSpecRecord>, Properties);

/// `GetCurrentState` reply: serial, monitors, logical monitors, properties.
pub type CurrentStateReply = (u32, Vec<MonitorRecord>, Vec<LogicalMonitorRecord>, Properties);

/// `(ssa{sv})`: connector, mode id, properties.
pub type MonitorAssignmentRecord = (String, String, Properties);

/// `(iiduba(ssa{sv}))` as submitted to `ApplyMonitorsConfig`.
pub type PlacementRecord = (i32, i32, f64, u32, bool, Vec<MonitorAssignmentRecord>);
