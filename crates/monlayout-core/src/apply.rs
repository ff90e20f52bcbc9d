// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::placement::{ApplyMethod, LogicalMonitorPlacement};
use crate::props::Properties;
use crate::service::DisplayService;

/// Submit placements planned from the snapshot stamped `serial`.
///
/// The service decides validity; a serial that no longer matches its state
/// comes back as [`Error::StaleSerial`] and nothing is applied. After a
/// successful non-verify apply the snapshot must be fetched again.
pub fn apply<S: DisplayService + ?Sized>(
    service: &S,
    serial: u32,
    method: ApplyMethod,
    placements: &[LogicalMonitorPlacement],
    properties: &Properties,
) -> Result<()> {
    check_shape(placements)?;

    service.apply_monitors_config(
        serial,
        method,
        placements.iter().map(LogicalMonitorPlacement::to_wire).collect(),
        properties.clone(),
    )
}

fn check_shape(placements: &[LogicalMonitorPlacement]) -> Result<()> {
    if placements.is_empty() {
        return Err(Error::InvalidSelection("nothing to apply".into()));
    }

    if placements.iter().filter(|p| p.primary).count() > 1 {
        return Err(Error::InvalidSelection("more than one primary logical monitor".into()));
    }

    let mut seen = HashSet::new();
    for p in placements {
        if p.monitors.is_empty() {
            return Err(Error::InvalidSelection(format!(
                "logical monitor at ({}, {}) has no monitors",
                p.x, p.y
            )));
        }
        for connector in p.connectors() {
            if !seen.insert(connector) {
                return Err(Error::InvalidSelection(format!(
                    "output {connector} placed twice"
                )));
            }
        }
    }

    Ok(())
}
