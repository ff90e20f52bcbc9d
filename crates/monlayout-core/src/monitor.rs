// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mode::Mode;
use crate::props::{self, Properties};
use crate::transform::Transform;
use crate::wire::{LogicalMonitorRecord, MonitorRecord, MonitorSpecRecord};

/// Identity of a physical monitor as reported by the current-state listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonitorSpec {
    pub connector: String,
    pub vendor: String,
    pub product: String,
    pub serial: String,
}

impl MonitorSpec {
    pub fn from_record(rec: MonitorSpecRecord) -> Self {
        let (connector, vendor, product, serial) = rec;
        Self {
            connector,
            vendor,
            product,
            serial,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monitor {
    pub spec: MonitorSpec,
    pub modes: Vec<Mode>,
    pub properties: Properties,
}

impl Monitor {
    pub fn from_record(rec: MonitorRecord) -> Result<Self> {
        let (spec, modes, properties) = rec;
        let spec = MonitorSpec::from_record(spec);

        let modes: Vec<Mode> = modes
            .into_iter()
            .map(Mode::from_record)
            .collect::<Result<_>>()?;

        if modes.iter().filter(|m| m.is_current()).count() > 1 {
            return Err(Error::malformed(
                "monitor",
                format!("{}: more than one current mode", spec.connector),
            ));
        }

        for (i, mode) in modes.iter().enumerate() {
            if modes[..i].iter().any(|m| m.id == mode.id) {
                return Err(Error::malformed(
                    "monitor",
                    format!("{}: duplicate mode {}", spec.connector, mode.id),
                ));
            }
        }

        Ok(Self {
            spec,
            modes,
            properties,
        })
    }

    pub fn connector(&self) -> &str {
        &self.spec.connector
    }

    pub fn mode(&self, id: &str) -> Option<&Mode> {
        self.modes.iter().find(|m| m.id == id)
    }

    /// The mode producing the image right now, if any.
    pub fn current_mode(&self) -> Option<&Mode> {
        self.modes.iter().find(|m| m.is_current())
    }

    pub fn preferred_mode(&self) -> Option<&Mode> {
        self.modes.iter().find(|m| m.is_preferred())
    }

    /// Mode used when the caller does not pick one.
    pub fn default_mode(&self) -> Option<&Mode> {
        self.current_mode()
            .or_else(|| self.preferred_mode())
            .or_else(|| self.modes.first())
    }

    pub fn display_name(&self) -> Option<&str> {
        props::string(&self.properties, "display-name")
    }

    pub fn is_builtin(&self) -> bool {
        props::flag(&self.properties, "is-builtin")
    }
}

/// A logical monitor as currently configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalMonitor {
    pub x: i32,
    pub y: i32,
    pub scale: f64,
    pub transform: Transform,
    pub primary: bool,
    pub monitors: Vec<MonitorSpec>,
    pub properties: Properties,
}

impl LogicalMonitor {
    pub fn from_record(rec: LogicalMonitorRecord) -> Result<Self> {
        let (x, y, scale, transform, primary, monitors, properties) = rec;

        if !(scale > 0.0) {
            return Err(Error::malformed("logical monitor", format!("scale {scale}")));
        }
        if monitors.is_empty() {
            return Err(Error::malformed("logical monitor", "no monitors"));
        }

        Ok(Self {
            x,
            y,
            scale,
            transform: Transform::from_wire(transform)?,
            primary,
            monitors: monitors.into_iter().map(MonitorSpec::from_record).collect(),
            properties,
        })
    }

    pub fn connectors(&self) -> impl Iterator<Item = &str> {
        self.monitors.iter().map(|m| m.connector.as_str())
    }
}
