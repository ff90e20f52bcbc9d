// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::props::{self, Properties};
use crate::wire::OutputRecord;

/// A physical connector with something plugged into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub id: u32,
    pub winsys_id: i64,

    /// CRTC currently driving this output; `None` when disabled.
    pub current_crtc: Option<u32>,
    pub possible_crtcs: Vec<u32>,

    /// Connector name (e.g. "DP-1", "HDMI-1"), unique per snapshot.
    pub name: String,

    /// Ids into the legacy mode listing.
    pub modes: Vec<u32>,

    /// Outputs that may share a CRTC with this one.
    pub clones: Vec<u32>,

    pub properties: Properties,
}

impl Output {
    pub fn from_record(rec: OutputRecord) -> Result<Self> {
        let (id, winsys_id, current_crtc, possible_crtcs, name, modes, clones, properties) = rec;

        Ok(Self {
            id,
            winsys_id,
            current_crtc: optional_ref("output", id, "current crtc", current_crtc)?,
            possible_crtcs,
            name,
            modes,
            clones,
            properties,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.current_crtc.is_some()
    }

    pub fn can_clone(&self, other: &Output) -> bool {
        self.clones.contains(&other.id)
    }

    pub fn vendor(&self) -> Option<&str> {
        props::string(&self.properties, "vendor")
    }

    pub fn product(&self) -> Option<&str> {
        props::string(&self.properties, "product")
    }

    pub fn serial(&self) -> Option<&str> {
        props::string(&self.properties, "serial")
    }

    pub fn display_name(&self) -> Option<&str> {
        props::string(&self.properties, "display-name")
    }

    /// Backlight percentage, `None` when unsupported (-1 on the wire).
    pub fn backlight(&self) -> Option<u8> {
        self.properties
            .get("backlight")
            .and_then(|v| v.as_i64())
            .and_then(|v| u8::try_from(v).ok())
    }

    pub fn is_primary(&self) -> bool {
        props::flag(&self.properties, "primary")
    }

    pub fn is_presentation(&self) -> bool {
        props::flag(&self.properties, "presentation")
    }
}

/// Wire ids use -1 for "none".
pub(crate) fn optional_ref(record: &'static str, id: u32, field: &str, v: i32) -> Result<Option<u32>> {
    match v {
        -1 => Ok(None),
        v => u32::try_from(v)
            .map(Some)
            .map_err(|_| Error::malformed(record, format!("{id}: {field} {v}"))),
    }
}
