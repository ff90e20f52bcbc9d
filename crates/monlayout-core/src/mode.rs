// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::props::{self, Properties};
use crate::wire::{HwModeRecord, ModeRecord};

/// A monitor mode from the current-state listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mode {
    pub id: String,

    /// Physical pixels.
    pub width: u32,
    pub height: u32,

    /// Refresh rate in Hz.
    pub frequency: f64,

    pub preferred_scale: f64,
    pub supported_scales: Vec<f64>,
    pub properties: Properties,
}

impl Mode {
    pub fn from_record(rec: ModeRecord) -> Result<Self> {
        let (id, width, height, frequency, preferred_scale, supported_scales, properties) = rec;

        let width = positive("mode", &id, "width", width)?;
        let height = positive("mode", &id, "height", height)?;

        if !(frequency > 0.0) {
            return Err(Error::malformed("mode", format!("{id}: frequency {frequency}")));
        }
        if !(preferred_scale > 0.0) {
            return Err(Error::malformed("mode", format!("{id}: preferred scale {preferred_scale}")));
        }
        if supported_scales.is_empty() || supported_scales.iter().any(|s| !(*s > 0.0)) {
            return Err(Error::malformed("mode", format!("{id}: bad supported scales")));
        }

        Ok(Self {
            id,
            width,
            height,
            frequency,
            preferred_scale,
            supported_scales,
            properties,
        })
    }

    pub fn is_current(&self) -> bool {
        self.properties.contains_key("is-current")
    }

    pub fn is_preferred(&self) -> bool {
        props::flag(&self.properties, "is-preferred")
    }

    pub fn supports_scale(&self, scale: f64) -> bool {
        self.supported_scales
            .iter()
            .any(|s| (s - scale).abs() < SCALE_EPSILON)
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@{}", self.width, self.height, self.frequency)
    }
}

pub(crate) const SCALE_EPSILON: f64 = 1e-6;

/// A mode from the legacy resource listing, referenced by outputs and CRTCs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HwMode {
    pub id: u32,
    pub winsys_id: i64,
    pub width: u32,
    pub height: u32,
    pub frequency: f64,
    /// Flags as defined by xf86drmMode.h / randr.h.
    pub flags: u32,
}

impl HwMode {
    pub fn from_record(rec: HwModeRecord) -> Self {
        let (id, winsys_id, width, height, frequency, flags) = rec;
        Self {
            id,
            winsys_id,
            width,
            height,
            frequency,
            flags,
        }
    }
}

impl fmt::Display for HwMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@{}", self.width, self.height, self.frequency)
    }
}

fn positive(record: &'static str, id: &str, field: &str, v: i32) -> Result<u32> {
    u32::try_from(v)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| Error::malformed(record, format!("{id}: {field} {v}")))
}
