// Author: Dustin Pilgrim
// License: MIT
//
// Fixtures shared by the unit tests: a snapshot builder that produces wire
// records, and an in-memory display service.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::placement::ApplyMethod;
use crate::props::{PropValue, Properties};
use crate::service::DisplayService;
use crate::snapshot::Snapshot;
use crate::wire::{
    CrtcRecord, CurrentStateReply, HwModeRecord, LogicalMonitorRecord, ModeRecord, MonitorRecord,
    OutputRecord, PlacementRecord, ResourcesReply,
};

pub(crate) fn mode(width: i32, height: i32, freq: f64) -> ModeRecord {
    (
        format!("{width}x{height}@{freq}"),
        width,
        height,
        freq,
        1.0,
        vec![1.0, 1.25, 1.5, 1.75, 2.0],
        Properties::new(),
    )
}

pub(crate) fn current(mut rec: ModeRecord) -> ModeRecord {
    rec.6.insert("is-current".into(), PropValue::Bool(true));
    rec
}

pub(crate) fn preferred(mut rec: ModeRecord) -> ModeRecord {
    rec.6.insert("is-preferred".into(), PropValue::Bool(true));
    rec
}

pub(crate) fn preferred_scale(mut rec: ModeRecord, scale: f64) -> ModeRecord {
    rec.4 = scale;
    rec
}

pub(crate) fn wuxga() -> ModeRecord {
    mode(1920, 1200, 59.950172424316406)
}

struct MonitorFixture {
    connector: String,
    modes: Vec<ModeRecord>,
    possible_crtcs: Option<Vec<u32>>,
    clones: Vec<String>,
}

pub(crate) struct SnapshotBuilder {
    serial: u32,
    crtcs: Option<u32>,
    monitors: Vec<MonitorFixture>,
    logical: Vec<LogicalMonitorRecord>,
    properties: Properties,
}

impl SnapshotBuilder {
    pub(crate) fn new(serial: u32) -> Self {
        Self {
            serial,
            crtcs: None,
            monitors: Vec::new(),
            logical: Vec::new(),
            properties: Properties::new(),
        }
    }

    pub(crate) fn monitor(mut self, connector: &str, modes: Vec<ModeRecord>) -> Self {
        self.monitors.push(MonitorFixture {
            connector: connector.into(),
            modes,
            possible_crtcs: None,
            clones: Vec::new(),
        });
        self
    }

    /// Number of CRTCs; defaults to one per monitor.
    pub(crate) fn crtcs(mut self, n: u32) -> Self {
        self.crtcs = Some(n);
        self
    }

    pub(crate) fn possible_crtcs(mut self, connector: &str, crtcs: &[u32]) -> Self {
        self.fixture(connector).possible_crtcs = Some(crtcs.to_vec());
        self
    }

    /// `a` lists `b` as a clone (one direction only).
    pub(crate) fn clone_of(mut self, a: &str, b: &str) -> Self {
        self.fixture(a).clones.push(b.into());
        self
    }

    pub(crate) fn clones(self, a: &str, b: &str) -> Self {
        self.clone_of(a, b).clone_of(b, a)
    }

    pub(crate) fn logical(mut self, x: i32, y: i32, scale: f64, primary: bool, connectors: &[&str]) -> Self {
        let specs = connectors.iter().map(|c| spec(c)).collect();
        self.logical
            .push((x, y, scale, 0, primary, specs, Properties::new()));
        self
    }

    pub(crate) fn property(mut self, key: &str, value: PropValue) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    fn fixture(&mut self, connector: &str) -> &mut MonitorFixture {
        self.monitors
            .iter_mut()
            .find(|m| m.connector == connector)
            .expect("fixture monitor must be added first")
    }

    pub(crate) fn records(self) -> (ResourcesReply, CurrentStateReply) {
        let crtc_count = self.crtcs.unwrap_or(self.monitors.len() as u32);
        let crtcs: Vec<CrtcRecord> = (0..crtc_count)
            .map(|id| (id, 100 + i64::from(id), 0, 0, 0, 0, -1, 0, vec![0, 1, 2, 3], Properties::new()))
            .collect();

        let mut hw_modes: Vec<HwModeRecord> = Vec::new();
        let mut outputs: Vec<OutputRecord> = Vec::new();
        for (idx, mon) in self.monitors.iter().enumerate() {
            let mut mode_ids = Vec::new();
            for m in &mon.modes {
                let id = hw_modes.len() as u32;
                hw_modes.push((id, 500 + i64::from(id), m.1 as u32, m.2 as u32, m.3, 0));
                mode_ids.push(id);
            }

            let clones = mon
                .clones
                .iter()
                .filter_map(|c| self.monitors.iter().position(|m| m.connector == *c))
                .map(|i| i as u32)
                .collect();

            outputs.push((
                idx as u32,
                300 + idx as i64,
                -1,
                mon.possible_crtcs
                    .clone()
                    .unwrap_or_else(|| (0..crtc_count).collect()),
                mon.connector.clone(),
                mode_ids,
                clones,
                Properties::new(),
            ));
        }

        let monitors: Vec<MonitorRecord> = self
            .monitors
            .iter()
            .map(|m| (spec(&m.connector), m.modes.clone(), Properties::new()))
            .collect();

        (
            (self.serial, crtcs, outputs, hw_modes, 8192, 8192),
            (self.serial, monitors, self.logical, self.properties),
        )
    }

    pub(crate) fn build(self) -> Snapshot {
        let (resources, state) = self.records();
        Snapshot::decode(resources, state).expect("fixture snapshot decodes")
    }
}

fn spec(connector: &str) -> (String, String, String, String) {
    (
        connector.to_string(),
        "MFR".to_string(),
        format!("Panel {connector}"),
        format!("SN-{connector}"),
    )
}

/// In-memory service. The serial moves on hotplug and on every applying call.
pub(crate) struct FakeService {
    resources: RefCell<ResourcesReply>,
    state: RefCell<CurrentStateReply>,
    skewed_resource_serials: RefCell<VecDeque<u32>>,
    pub(crate) reads: Cell<usize>,
    pub(crate) applied: RefCell<Vec<(u32, ApplyMethod, Vec<PlacementRecord>)>>,
    pub(crate) unreachable: Cell<bool>,
}

impl FakeService {
    pub(crate) fn new(builder: SnapshotBuilder) -> Self {
        let (resources, state) = builder.records();
        Self {
            resources: RefCell::new(resources),
            state: RefCell::new(state),
            skewed_resource_serials: RefCell::new(VecDeque::new()),
            reads: Cell::new(0),
            applied: RefCell::new(Vec::new()),
            unreachable: Cell::new(false),
        }
    }

    pub(crate) fn serial(&self) -> u32 {
        self.state.borrow().0
    }

    /// Something changed the hardware behind our back.
    pub(crate) fn hotplug(&self) {
        let next = self.serial() + 1;
        self.resources.borrow_mut().0 = next;
        self.state.borrow_mut().0 = next;
    }

    /// The next resource reads report these serials instead of the real one.
    pub(crate) fn skew_resources(&self, serials: &[u32]) {
        self.skewed_resource_serials
            .borrow_mut()
            .extend(serials.iter().copied());
    }

    fn reachable(&self) -> Result<()> {
        if self.unreachable.get() {
            return Err(Error::ServiceUnreachable("no session bus".into()));
        }
        Ok(())
    }
}

impl DisplayService for FakeService {
    fn get_resources(&self) -> Result<ResourcesReply> {
        self.reachable()?;
        self.reads.set(self.reads.get() + 1);

        let mut reply = self.resources.borrow().clone();
        if let Some(serial) = self.skewed_resource_serials.borrow_mut().pop_front() {
            reply.0 = serial;
        }
        Ok(reply)
    }

    fn get_current_state(&self) -> Result<CurrentStateReply> {
        self.reachable()?;
        self.reads.set(self.reads.get() + 1);
        Ok(self.state.borrow().clone())
    }

    fn apply_monitors_config(
        &self,
        serial: u32,
        method: ApplyMethod,
        logical_monitors: Vec<PlacementRecord>,
        _properties: Properties,
    ) -> Result<()> {
        self.reachable()?;

        if serial != self.serial() {
            return Err(Error::StaleSerial { serial });
        }

        self.applied
            .borrow_mut()
            .push((serial, method, logical_monitors));

        if method.invalidates_snapshot() {
            self.hotplug();
        }
        Ok(())
    }
}
