// Author: Dustin Pilgrim
// License: MIT

use monlayout_core::{
    ApplyMethod, Arrangement, DisplayService, OutputSelection, Properties, StateReport, apply,
    fetch, plan,
};
use monlayout_dbus::{DisplayConfigClient, subscribe};

use eventline::{debug, error, info, warn};

use crate::cli::{Args, Cmd};
use crate::config;
use crate::paths;

use super::print;

pub fn run(args: Args) -> Result<(), String> {
    info!("starting monlayout");
    debug!("parsed args: {:?}", args.cmd);

    let config_path = args.config.unwrap_or_else(paths::default_config_path);
    debug!("config: {}", config_path.display());
    let cfg = config::load(&config_path)?;

    let client = DisplayConfigClient::session().map_err(|e| {
        error!("failed to reach display service: {e}");
        format!("{e}\nIs this a GNOME (mutter) session?")
    })?;

    match args.cmd {
        Cmd::State { json } => {
            let snapshot = fetch(&client).map_err(|e| e.to_string())?;
            print::print_state(&StateReport::from_snapshot(&snapshot), json)
        }

        Cmd::Plan {
            arrangement,
            outputs,
            json,
        } => {
            let snapshot = fetch(&client).map_err(|e| e.to_string())?;
            let placements = plan(&snapshot, arrangement, &outputs).map_err(|e| e.to_string())?;
            print::print_placements(&placements, json)
        }

        Cmd::Apply {
            arrangement,
            outputs,
            method,
            verify_first,
        } => run_apply(
            &client,
            arrangement.unwrap_or(cfg.arrangement),
            &outputs,
            method.unwrap_or(cfg.method),
            verify_first,
        ),

        Cmd::Watch { json } => run_watch(&client, json),
    }
}

fn run_apply(
    client: &DisplayConfigClient,
    arrangement: Arrangement,
    outputs: &[OutputSelection],
    method: ApplyMethod,
    verify_first: bool,
) -> Result<(), String> {
    debug!("apply: arrangement={arrangement:?} method={method:?} verify_first={verify_first}");

    let snapshot = fetch(client).map_err(|e| e.to_string())?;
    let placements = plan(&snapshot, arrangement, outputs).map_err(|e| e.to_string())?;
    let props = Properties::new();

    if verify_first && method != ApplyMethod::Verify {
        // Verify leaves the serial valid, so the same snapshot can be applied.
        apply(client, snapshot.serial(), ApplyMethod::Verify, &placements, &props).map_err(|e| {
            warn!("verification failed: {e}");
            format!("verification failed: {e}")
        })?;
        info!("configuration verified (serial {})", snapshot.serial());
    }

    apply(client, snapshot.serial(), method, &placements, &props).map_err(|e| e.to_string())?;

    info!(
        "applied {} logical monitor(s) with {method:?} (serial {})",
        placements.len(),
        snapshot.serial()
    );
    println!("ok");
    Ok(())
}

fn run_watch(client: &DisplayConfigClient, json: bool) -> Result<(), String> {
    let sub = subscribe(client).map_err(|e| e.to_string())?;

    let snapshot = fetch(client).map_err(|e| e.to_string())?;
    print::print_state(&StateReport::from_snapshot(&snapshot), json)?;

    refetch_on_change(client, std::iter::from_fn(|| sub.wait()), |report| {
        print::print_state(report, json)
    })?;

    info!("change stream closed");
    Ok(())
}

/// Fetch and emit a report after every change. A failed fetch is logged and
/// the next change tries again.
fn refetch_on_change<S, C>(
    service: &S,
    changes: impl IntoIterator<Item = C>,
    mut emit: impl FnMut(&StateReport) -> Result<(), String>,
) -> Result<(), String>
where
    S: DisplayService + ?Sized,
{
    for _ in changes {
        debug!("monitors changed; refetching");
        match fetch(service) {
            Ok(snapshot) => emit(&StateReport::from_snapshot(&snapshot))?,
            Err(e) => warn!("refetch after change failed: {e}"),
        }
    }
    Ok(())
}
