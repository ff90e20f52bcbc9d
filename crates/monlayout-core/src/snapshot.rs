// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashSet;

use serde::Serialize;

use crate::crtc::Crtc;
use crate::error::{Error, Result};
use crate::mode::HwMode;
use crate::monitor::{LogicalMonitor, Monitor};
use crate::output::Output;
use crate::placement::{LogicalMonitorPlacement, MonitorAssignment};
use crate::props::{self, Properties};
use crate::service::DisplayService;
use crate::wire::{CurrentStateReply, ResourcesReply};

/// How many times a fetch is repeated when the two reads disagree on serial.
const FETCH_RETRIES: usize = 1;

/// How logical monitor sizes are derived from their modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum LayoutMode {
    /// Mode size divided by the logical monitor scale.
    #[default]
    Logical,
    /// Mode size as is.
    Physical,
}

/// Display state read at one instant, stamped with the service serial.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    serial: u32,
    crtcs: Vec<Crtc>,
    outputs: Vec<Output>,
    hw_modes: Vec<HwMode>,
    max_screen_width: i32,
    max_screen_height: i32,
    monitors: Vec<Monitor>,
    logical_monitors: Vec<LogicalMonitor>,
    properties: Properties,
}

/// Read the resource listing and the current state and merge them.
///
/// A serial mismatch means the hardware changed between the two reads; the
/// pair is read again once before giving up.
pub fn fetch<S: DisplayService + ?Sized>(service: &S) -> Result<Snapshot> {
    let mut retries = 0;
    loop {
        let resources = service.get_resources()?;
        let state = service.get_current_state()?;

        if resources.0 == state.0 {
            return Snapshot::decode(resources, state);
        }

        if retries == FETCH_RETRIES {
            return Err(Error::InconsistentSnapshot {
                resources: resources.0,
                state: state.0,
            });
        }
        retries += 1;
    }
}

impl Snapshot {
    /// Decode both listings, checking every cross reference.
    pub fn decode(resources: ResourcesReply, state: CurrentStateReply) -> Result<Self> {
        let (_, crtcs, outputs, hw_modes, max_screen_width, max_screen_height) = resources;
        let (serial, monitors, logical_monitors, properties) = state;

        let crtcs: Vec<Crtc> = crtcs
            .into_iter()
            .map(Crtc::from_record)
            .collect::<Result<_>>()?;
        let hw_modes: Vec<HwMode> = hw_modes.into_iter().map(HwMode::from_record).collect();
        let outputs: Vec<Output> = outputs
            .into_iter()
            .map(Output::from_record)
            .collect::<Result<_>>()?;

        let crtc_ids = unique_ids("crtc", crtcs.iter().map(|c| c.id))?;
        let mode_ids = unique_ids("mode", hw_modes.iter().map(|m| m.id))?;
        let output_ids = unique_ids("output", outputs.iter().map(|o| o.id))?;

        for crtc in &crtcs {
            if let Some(mode) = crtc.current_mode {
                require("crtc", crtc.id, "mode", mode, &mode_ids)?;
            }
        }

        let mut names = HashSet::new();
        for out in &outputs {
            if !names.insert(out.name.as_str()) {
                return Err(Error::malformed("output", format!("duplicate name {}", out.name)));
            }
            if let Some(crtc) = out.current_crtc {
                require("output", out.id, "crtc", crtc, &crtc_ids)?;
            }
            for crtc in &out.possible_crtcs {
                require("output", out.id, "crtc", *crtc, &crtc_ids)?;
            }
            for mode in &out.modes {
                require("output", out.id, "mode", *mode, &mode_ids)?;
            }
            for clone in &out.clones {
                require("output", out.id, "clone", *clone, &output_ids)?;
            }
        }

        let monitors: Vec<Monitor> = monitors
            .into_iter()
            .map(Monitor::from_record)
            .collect::<Result<_>>()?;

        let mut connectors = HashSet::new();
        for mon in &monitors {
            if !connectors.insert(mon.connector()) {
                return Err(Error::malformed(
                    "monitor",
                    format!("duplicate connector {}", mon.connector()),
                ));
            }
        }

        let logical_monitors: Vec<LogicalMonitor> = logical_monitors
            .into_iter()
            .map(LogicalMonitor::from_record)
            .collect::<Result<_>>()?;

        let mut assigned = HashSet::new();
        for lm in &logical_monitors {
            for spec in &lm.monitors {
                let Some(mon) = monitors.iter().find(|m| m.spec == *spec) else {
                    return Err(Error::malformed(
                        "logical monitor",
                        format!("unknown monitor {}", spec.connector),
                    ));
                };
                if mon.current_mode().is_none() {
                    return Err(Error::malformed(
                        "logical monitor",
                        format!("monitor {} has no current mode", spec.connector),
                    ));
                }
                if !assigned.insert(spec.connector.as_str()) {
                    return Err(Error::malformed(
                        "logical monitor",
                        format!("monitor {} used twice", spec.connector),
                    ));
                }
            }
        }

        Ok(Self {
            serial,
            crtcs,
            outputs,
            hw_modes,
            max_screen_width,
            max_screen_height,
            monitors,
            logical_monitors,
            properties,
        })
    }

    /// Token identifying the state this snapshot was read from.
    pub fn serial(&self) -> u32 {
        self.serial
    }

    pub fn crtcs(&self) -> &[Crtc] {
        &self.crtcs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn hw_modes(&self) -> &[HwMode] {
        &self.hw_modes
    }

    pub fn max_screen_size(&self) -> (i32, i32) {
        (self.max_screen_width, self.max_screen_height)
    }

    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    pub fn logical_monitors(&self) -> &[LogicalMonitor] {
        &self.logical_monitors
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn crtc(&self, id: u32) -> Option<&Crtc> {
        self.crtcs.iter().find(|c| c.id == id)
    }

    pub fn hw_mode(&self, id: u32) -> Option<&HwMode> {
        self.hw_modes.iter().find(|m| m.id == id)
    }

    pub fn output(&self, id: u32) -> Option<&Output> {
        self.outputs.iter().find(|o| o.id == id)
    }

    pub fn output_by_name(&self, connector: &str) -> Option<&Output> {
        self.outputs.iter().find(|o| o.name == connector)
    }

    pub fn monitor(&self, connector: &str) -> Option<&Monitor> {
        self.monitors.iter().find(|m| m.connector() == connector)
    }

    pub fn layout_mode(&self) -> LayoutMode {
        match self.properties.get("layout-mode").and_then(|v| v.as_i64()) {
            Some(2) => LayoutMode::Physical,
            _ => LayoutMode::Logical,
        }
    }

    pub fn global_scale_required(&self) -> bool {
        props::flag(&self.properties, "global-scale-required")
    }

    /// The live arrangement expressed as placements, one per logical monitor.
    pub fn current_placements(&self) -> Vec<LogicalMonitorPlacement> {
        self.logical_monitors
            .iter()
            .map(|lm| LogicalMonitorPlacement {
                x: lm.x,
                y: lm.y,
                scale: lm.scale,
                transform: lm.transform,
                primary: lm.primary,
                monitors: lm
                    .monitors
                    .iter()
                    .filter_map(|spec| {
                        let mode = self.monitor(&spec.connector)?.current_mode()?;
                        Some(MonitorAssignment {
                            connector: spec.connector.clone(),
                            mode_id: mode.id.clone(),
                            properties: Properties::new(),
                        })
                    })
                    .collect(),
            })
            .collect()
    }
}

fn unique_ids(record: &'static str, ids: impl Iterator<Item = u32>) -> Result<HashSet<u32>> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(Error::malformed(record, format!("duplicate id {id}")));
        }
    }
    Ok(seen)
}

fn require(record: &'static str, id: u32, what: &str, target: u32, ids: &HashSet<u32>) -> Result<()> {
    if ids.contains(&target) {
        Ok(())
    } else {
        Err(Error::malformed(record, format!("{id}: unknown {what} {target}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::PropValue;
    use crate::testing::{FakeService, SnapshotBuilder, current, mode, preferred, wuxga};

    fn two_monitors() -> SnapshotBuilder {
        SnapshotBuilder::new(7)
            .monitor("DP-1", vec![current(wuxga()), mode(1280, 800, 60.0)])
            .monitor("HDMI-1", vec![preferred(mode(3840, 2160, 60.0)), current(wuxga())])
            .logical(0, 0, 1.0, true, &["DP-1"])
            .logical(1920, 0, 1.0, false, &["HDMI-1"])
    }

    #[test]
    fn logical_monitors_reference_existing_modes() {
        let snap = two_monitors().build();

        for lm in snap.logical_monitors() {
            for spec in &lm.monitors {
                let mon = snap.monitor(&spec.connector).unwrap();
                let mode = mon.current_mode().unwrap();
                assert!(mon.modes.iter().any(|m| m.id == mode.id));
            }
        }

        for p in snap.current_placements() {
            for a in &p.monitors {
                assert!(snap.monitor(&a.connector).unwrap().mode(&a.mode_id).is_some());
            }
        }
    }

    #[test]
    fn resource_listing_round_trips_ids_and_order() {
        let (resources, state) = two_monitors().crtcs(3).records();
        let crtc_ids: Vec<u32> = resources.1.iter().map(|c| c.0).collect();
        let output_ids: Vec<u32> = resources.2.iter().map(|o| o.0).collect();
        let mode_ids: Vec<u32> = resources.3.iter().map(|m| m.0).collect();

        let snap = Snapshot::decode(resources, state).unwrap();

        assert_eq!(snap.crtcs().iter().map(|c| c.id).collect::<Vec<_>>(), crtc_ids);
        assert_eq!(snap.outputs().iter().map(|o| o.id).collect::<Vec<_>>(), output_ids);
        assert_eq!(snap.hw_modes().iter().map(|m| m.id).collect::<Vec<_>>(), mode_ids);
        assert_eq!(snap.serial(), 7);
        assert_eq!(snap.max_screen_size(), (8192, 8192));
    }

    #[test]
    fn unknown_crtc_reference_is_malformed() {
        let (mut resources, state) = two_monitors().records();
        resources.2[0].3.push(42);

        let err = Snapshot::decode(resources, state).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { record: "output", .. }));
    }

    #[test]
    fn unknown_mode_reference_is_malformed() {
        let (mut resources, state) = two_monitors().records();
        resources.1[0].6 = 99;

        assert!(matches!(
            Snapshot::decode(resources, state),
            Err(Error::MalformedRecord { record: "crtc", .. })
        ));
    }

    #[test]
    fn duplicate_connector_names_are_malformed() {
        let (mut resources, state) = two_monitors().records();
        resources.2[1].4 = "DP-1".into();

        assert!(Snapshot::decode(resources, state).is_err());
    }

    #[test]
    fn logical_monitor_for_unknown_monitor_is_malformed() {
        let (resources, state) = two_monitors()
            .logical(0, 1200, 1.0, false, &["eDP-1"])
            .records();

        assert!(matches!(
            Snapshot::decode(resources, state),
            Err(Error::MalformedRecord { record: "logical monitor", .. })
        ));
    }

    #[test]
    fn logical_monitor_needs_a_current_mode() {
        let (resources, state) = SnapshotBuilder::new(1)
            .monitor("DP-1", vec![wuxga()])
            .logical(0, 0, 1.0, true, &["DP-1"])
            .records();

        assert!(Snapshot::decode(resources, state).is_err());
    }

    #[test]
    fn fetch_uses_two_reads() {
        let service = FakeService::new(two_monitors());
        let snap = fetch(&service).unwrap();

        assert_eq!(service.reads.get(), 2);
        assert_eq!(snap.serial(), 7);
        assert_eq!(snap.monitors().len(), 2);
    }

    #[test]
    fn fetch_retries_once_on_serial_mismatch() {
        let service = FakeService::new(two_monitors());
        service.skew_resources(&[6]);

        let snap = fetch(&service).unwrap();
        assert_eq!(service.reads.get(), 4);
        assert_eq!(snap.serial(), 7);
    }

    #[test]
    fn fetch_gives_up_after_second_mismatch() {
        let service = FakeService::new(two_monitors());
        service.skew_resources(&[6, 5]);

        assert_eq!(
            fetch(&service),
            Err(Error::InconsistentSnapshot {
                resources: 5,
                state: 7
            })
        );
    }

    #[test]
    fn unreachable_service_is_not_retried() {
        let service = FakeService::new(two_monitors());
        service.unreachable.set(true);

        assert!(matches!(fetch(&service), Err(Error::ServiceUnreachable(_))));
        assert_eq!(service.reads.get(), 0);
    }

    #[test]
    fn layout_properties() {
        let snap = two_monitors().build();
        assert_eq!(snap.layout_mode(), LayoutMode::Logical);
        assert!(!snap.global_scale_required());

        let snap = two_monitors()
            .property("layout-mode", PropValue::UInt(2))
            .property("global-scale-required", PropValue::Bool(true))
            .build();
        assert_eq!(snap.layout_mode(), LayoutMode::Physical);
        assert!(snap.global_scale_required());
    }

    #[test]
    fn current_placements_mirror_live_state() {
        let snap = two_monitors().build();
        let placements = snap.current_placements();

        assert_eq!(placements.len(), 2);
        assert_eq!((placements[1].x, placements[1].y), (1920, 0));
        assert!(placements[0].primary);
        assert_eq!(placements[1].monitors[0].connector, "HDMI-1");
        assert_eq!(placements[1].monitors[0].mode_id, wuxga().0);
    }
}
