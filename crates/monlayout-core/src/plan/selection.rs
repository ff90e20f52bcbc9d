// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

#[cfg(feature = "clap")]
use clap::ValueEnum;

use crate::error::{Error, Result};
use crate::mode::Mode;
use crate::monitor::Monitor;
use crate::snapshot::Snapshot;
use crate::transform::Transform;

#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Arrangement {
    /// One output, alone.
    Single,
    /// Outputs side by side, left to right.
    Extend,
    /// Every output shows the same image.
    Clone,
}

/// What the caller wants for one output. Unset fields fall back to what the
/// snapshot says about the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSelection {
    pub connector: String,

    /// Mode id as listed by the monitor.
    pub mode: Option<String>,
    pub scale: Option<f64>,
    pub transform: Option<Transform>,

    /// Vertical offset in the extended layout.
    pub y: Option<i32>,
    pub primary: bool,
}

impl OutputSelection {
    pub fn new(connector: impl Into<String>) -> Self {
        Self {
            connector: connector.into(),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_y(mut self, y: i32) -> Self {
        self.y = Some(y);
        self
    }

    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }
}

pub(crate) fn monitor<'a>(snapshot: &'a Snapshot, sel: &OutputSelection) -> Result<&'a Monitor> {
    snapshot
        .monitor(&sel.connector)
        .ok_or_else(|| Error::UnknownOutput(sel.connector.clone()))
}

/// The explicitly requested mode, if any.
pub(crate) fn explicit_mode<'a>(mon: &'a Monitor, sel: &OutputSelection) -> Result<Option<&'a Mode>> {
    match &sel.mode {
        None => Ok(None),
        Some(id) => mon.mode(id).map(Some).ok_or_else(|| Error::UnknownMode {
            connector: sel.connector.clone(),
            mode: id.clone(),
        }),
    }
}

pub(crate) fn resolve<'a>(snapshot: &'a Snapshot, sel: &OutputSelection) -> Result<(&'a Monitor, &'a Mode)> {
    let mon = monitor(snapshot, sel)?;
    let mode = match explicit_mode(mon, sel)? {
        Some(mode) => mode,
        None => mon
            .default_mode()
            .ok_or_else(|| Error::InvalidSelection(format!("output {} has no modes", sel.connector)))?,
    };
    Ok((mon, mode))
}

pub(crate) fn scale_for(sel: &OutputSelection, mode: &Mode) -> Result<f64> {
    match sel.scale {
        Some(scale) if mode.supports_scale(scale) => Ok(scale),
        Some(scale) => Err(Error::UnsupportedScale {
            mode: mode.id.clone(),
            scale,
        }),
        None => Ok(mode.preferred_scale),
    }
}

/// Connectors must be distinct and at most one selection may ask to be primary.
pub(crate) fn validate(selections: &[OutputSelection]) -> Result<()> {
    for (i, sel) in selections.iter().enumerate() {
        if selections[..i].iter().any(|s| s.connector == sel.connector) {
            return Err(Error::InvalidSelection(format!(
                "output {} selected twice",
                sel.connector
            )));
        }
    }

    if selections.iter().filter(|s| s.primary).count() > 1 {
        return Err(Error::InvalidSelection("more than one primary output".into()));
    }

    Ok(())
}
