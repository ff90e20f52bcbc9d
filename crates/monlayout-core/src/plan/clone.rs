// Author: Dustin Pilgrim
// License: MIT

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::mode::Mode;
use crate::monitor::Monitor;
use crate::output::Output;
use crate::placement::LogicalMonitorPlacement;
use crate::snapshot::Snapshot;

use super::selection::{self, OutputSelection};
use super::{assignment, controllers};

/// One logical monitor at the origin carrying every selected output.
pub(super) fn plan(snapshot: &Snapshot, selections: &[OutputSelection]) -> Result<Vec<LogicalMonitorPlacement>> {
    if selections.len() < 2 {
        return Err(Error::InvalidSelection(format!(
            "clone arrangement needs at least two outputs, got {}",
            selections.len()
        )));
    }

    let monitors: Vec<&Monitor> = selections
        .iter()
        .map(|s| selection::monitor(snapshot, s))
        .collect::<Result<_>>()?;

    let modes = common_modes(&monitors, selections)?;
    check_compatible(snapshot, selections)?;

    let first = &selections[0];
    let transform = first.transform.unwrap_or_default();
    if selections[1..]
        .iter()
        .any(|s| s.transform.is_some_and(|t| t != transform))
    {
        return Err(Error::InvalidSelection(
            "cloned outputs must share one transform".into(),
        ));
    }

    Ok(vec![LogicalMonitorPlacement {
        x: 0,
        y: 0,
        scale: common_scale(first, &modes)?,
        transform,
        primary: true,
        monitors: selections
            .iter()
            .zip(&modes)
            .map(|(sel, mode)| assignment(&sel.connector, &mode.id))
            .collect(),
    }])
}

/// Picks one mode per monitor, all with the same resolution.
///
/// Explicit modes pin the resolution. Otherwise a mode id every monitor
/// lists wins (largest, then fastest); failing that, the largest resolution
/// every monitor supports, at each monitor's best refresh rate.
fn common_modes<'a>(monitors: &[&'a Monitor], selections: &[OutputSelection]) -> Result<Vec<&'a Mode>> {
    let explicit: Vec<Option<&Mode>> = monitors
        .iter()
        .zip(selections)
        .map(|(mon, sel)| selection::explicit_mode(*mon, sel))
        .collect::<Result<_>>()?;

    let (resolution, prefer) = match explicit.iter().flatten().next().copied() {
        Some(pinned) => {
            if explicit
                .iter()
                .flatten()
                .any(|m| m.resolution() != pinned.resolution())
            {
                return Err(Error::NoCommonMode);
            }
            (pinned.resolution(), Some(pinned.id.as_str()))
        }
        None => {
            if let Some(shared) = shared_mode(monitors) {
                return Ok(shared);
            }
            (shared_resolution(monitors).ok_or(Error::NoCommonMode)?, None)
        }
    };

    monitors
        .iter()
        .zip(explicit)
        .map(|(mon, pinned)| match pinned {
            Some(mode) => Ok(mode),
            None => best_at(*mon, resolution, prefer).ok_or(Error::NoCommonMode),
        })
        .collect()
}

fn rank(a: &Mode, b: &Mode) -> Ordering {
    a.area()
        .cmp(&b.area())
        .then(a.frequency.total_cmp(&b.frequency))
        .then(b.id.cmp(&a.id))
}

fn shared_mode<'a>(monitors: &[&'a Monitor]) -> Option<Vec<&'a Mode>> {
    let (first, rest) = monitors.split_first()?;

    let best = first
        .modes
        .iter()
        .filter(|m| rest.iter().all(|o| o.mode(&m.id).is_some()))
        .max_by(|a, b| rank(a, b))?;

    Some(monitors.iter().filter_map(|mon| mon.mode(&best.id)).collect())
}

fn shared_resolution(monitors: &[&Monitor]) -> Option<(u32, u32)> {
    let (first, rest) = monitors.split_first()?;

    first
        .modes
        .iter()
        .map(Mode::resolution)
        .filter(|res| {
            rest.iter()
                .all(|o| o.modes.iter().any(|m| m.resolution() == *res))
        })
        .max_by_key(|&(w, h)| (u64::from(w) * u64::from(h), w))
}

fn best_at<'a>(mon: &'a Monitor, resolution: (u32, u32), prefer: Option<&str>) -> Option<&'a Mode> {
    let candidates = mon.modes.iter().filter(|m| m.resolution() == resolution);

    if let Some(id) = prefer {
        if let Some(mode) = candidates.clone().find(|m| m.id == id) {
            return Some(mode);
        }
    }

    candidates.max_by(|a, b| rank(a, b))
}

fn common_scale(first: &OutputSelection, modes: &[&Mode]) -> Result<f64> {
    let all_support = |scale: f64| modes.iter().all(|m| m.supports_scale(scale));

    if let Some(scale) = first.scale {
        if all_support(scale) {
            return Ok(scale);
        }
        return Err(Error::UnsupportedScale {
            mode: modes[0].id.clone(),
            scale,
        });
    }

    let preferred = modes[0].preferred_scale;
    if all_support(preferred) {
        return Ok(preferred);
    }
    if all_support(1.0) {
        return Ok(1.0);
    }

    modes[0]
        .supported_scales
        .iter()
        .copied()
        .find(|s| all_support(*s))
        .ok_or_else(|| Error::IncompatibleClone("no scale shared by all modes".into()))
}

/// Clone lists must agree pairwise, and the clone groups they imply must each
/// find a CRTC of their own.
fn check_compatible(snapshot: &Snapshot, selections: &[OutputSelection]) -> Result<()> {
    let outputs: Vec<&Output> = selections
        .iter()
        .filter_map(|s| snapshot.output_by_name(&s.connector))
        .collect();

    for (i, a) in outputs.iter().enumerate() {
        for b in &outputs[i + 1..] {
            if a.can_clone(b) != b.can_clone(a) {
                return Err(Error::IncompatibleClone(format!(
                    "{} and {} disagree on clone compatibility",
                    a.name, b.name
                )));
            }
        }
    }

    // Outputs sharing a group share a CRTC, so a group only offers the CRTCs
    // every member can use.
    let mut groups: Vec<(Vec<&Output>, Vec<u32>)> = Vec::new();
    for out in outputs {
        let joinable = groups.iter_mut().find(|group| {
            group.0.iter().all(|m| m.can_clone(out))
                && group.1.iter().any(|c| out.possible_crtcs.contains(c))
        });

        match joinable {
            Some((members, crtcs)) => {
                crtcs.retain(|c| out.possible_crtcs.contains(c));
                members.push(out);
            }
            None => groups.push((vec![out], out.possible_crtcs.clone())),
        }
    }

    let candidates: Vec<Vec<u32>> = groups.into_iter().map(|(_, crtcs)| crtcs).collect();
    if !controllers::can_assign(&candidates) {
        return Err(Error::IncompatibleClone(format!(
            "{} clone groups but not enough controllers",
            candidates.len()
        )));
    }

    Ok(())
}
