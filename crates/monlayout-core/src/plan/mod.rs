// Author: Dustin Pilgrim
// License: MIT
//
// Turns an arrangement and a list of output selections into logical monitor
// placements. Works on a snapshot only; never talks to the service.

mod clone;
mod controllers;
mod selection;

pub use selection::{Arrangement, OutputSelection};

use crate::error::{Error, Result};
use crate::placement::{LogicalMonitorPlacement, MonitorAssignment};
use crate::props::Properties;
use crate::snapshot::{LayoutMode, Snapshot};

pub fn plan(
    snapshot: &Snapshot,
    arrangement: Arrangement,
    selections: &[OutputSelection],
) -> Result<Vec<LogicalMonitorPlacement>> {
    selection::validate(selections)?;

    match arrangement {
        Arrangement::Single => single(snapshot, selections),
        Arrangement::Extend => extend(snapshot, selections),
        Arrangement::Clone => clone::plan(snapshot, selections),
    }
}

fn single(snapshot: &Snapshot, selections: &[OutputSelection]) -> Result<Vec<LogicalMonitorPlacement>> {
    let [sel] = selections else {
        return Err(Error::InvalidSelection(format!(
            "single arrangement takes exactly one output, got {}",
            selections.len()
        )));
    };

    let (_, mode) = selection::resolve(snapshot, sel)?;

    Ok(vec![LogicalMonitorPlacement {
        x: 0,
        y: 0,
        scale: selection::scale_for(sel, mode)?,
        transform: sel.transform.unwrap_or_default(),
        primary: true,
        monitors: vec![assignment(&sel.connector, &mode.id)],
    }])
}

fn extend(snapshot: &Snapshot, selections: &[OutputSelection]) -> Result<Vec<LogicalMonitorPlacement>> {
    if selections.is_empty() {
        return Err(Error::InvalidSelection("extend arrangement needs an output".into()));
    }

    let primary = selections.iter().position(|s| s.primary).unwrap_or(0);
    let layout = snapshot.layout_mode();
    let global_scale = snapshot.global_scale_required();

    let mut placements: Vec<LogicalMonitorPlacement> = Vec::with_capacity(selections.len());
    let mut x: i32 = 0;

    for (i, sel) in selections.iter().enumerate() {
        let (_, mode) = selection::resolve(snapshot, sel)?;
        let mut scale = selection::scale_for(sel, mode)?;

        if global_scale {
            if let Some(first) = placements.first() {
                if sel.scale.is_some_and(|s| s != first.scale) {
                    return Err(Error::InvalidSelection(format!(
                        "all outputs must use scale {}",
                        first.scale
                    )));
                }
                if !mode.supports_scale(first.scale) {
                    return Err(Error::UnsupportedScale {
                        mode: mode.id.clone(),
                        scale: first.scale,
                    });
                }
                scale = first.scale;
            }
        }

        let transform = sel.transform.unwrap_or_default();

        placements.push(LogicalMonitorPlacement {
            x,
            y: sel.y.unwrap_or(0),
            scale,
            transform,
            primary: i == primary,
            monitors: vec![assignment(&sel.connector, &mode.id)],
        });

        if i + 1 < selections.len() {
            let (width, _) = transform.apply_to(mode.width, mode.height);
            x = advance(width, scale, layout)
                .and_then(|span| x.checked_add(span))
                .ok_or_else(|| {
                    Error::InvalidSelection(format!(
                        "extended layout overflows past output {}",
                        sel.connector
                    ))
                })?;
        }
    }

    let candidates: Vec<Vec<u32>> = selections
        .iter()
        .filter_map(|s| snapshot.output_by_name(&s.connector))
        .map(|o| o.possible_crtcs.clone())
        .collect();

    if !controllers::can_assign(&candidates) {
        return Err(Error::InsufficientControllers(selections.len()));
    }

    Ok(placements)
}

/// Horizontal space a placement takes up in compositor coordinates, or
/// `None` when it does not fit a coordinate.
fn advance(width: u32, scale: f64, layout: LayoutMode) -> Option<i32> {
    let width = f64::from(width);
    let span = match layout {
        LayoutMode::Logical => (width / scale).round(),
        LayoutMode::Physical => width,
    };

    (span.is_finite() && (0.0..=f64::from(i32::MAX)).contains(&span)).then(|| span as i32)
}

fn assignment(connector: &str, mode_id: &str) -> MonitorAssignment {
    MonitorAssignment {
        connector: connector.to_string(),
        mode_id: mode_id.to_string(),
        properties: Properties::new(),
    }
}
