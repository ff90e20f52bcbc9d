// Author: Dustin Pilgrim
// License: MIT

use monlayout_core::{LogicalMonitorPlacement, StateReport};
use serde::Serialize;

pub fn print_state(report: &StateReport, json: bool) -> Result<(), String> {
    if json {
        return print_json(report);
    }

    println!("serial: {}", report.serial);
    println!(
        "max screen size: {}x{}",
        report.max_screen_width, report.max_screen_height
    );
    println!("layout mode: {:?}", report.layout_mode);

    if report.monitors.is_empty() {
        println!("(no monitors connected)");
    }

    for m in &report.monitors {
        let name = m.display_name.as_deref().unwrap_or("(unnamed)");
        let builtin = if m.builtin { " [builtin]" } else { "" };
        println!("monitor {}: {name}{builtin}", m.connector);
        println!("  vendor: {}  product: {}  serial: {}", m.vendor, m.product, m.serial);
        match &m.current_mode {
            Some(mode) => println!("  current: {mode}"),
            None => println!("  current: off"),
        }
        println!("  modes: {}", m.available_modes.join(" "));
    }

    for (i, lm) in report.logical_monitors.iter().enumerate() {
        let primary = if lm.primary { " primary" } else { "" };
        println!(
            "logical #{i}: ({}, {}) scale {} transform {}{primary} [{}]",
            lm.x,
            lm.y,
            lm.scale,
            lm.transform,
            lm.connectors.join(", ")
        );
    }

    for (key, value) in &report.properties {
        println!("{key}: {value}");
    }

    Ok(())
}

pub fn print_placements(placements: &[LogicalMonitorPlacement], json: bool) -> Result<(), String> {
    if json {
        return print_json(placements);
    }

    for (i, p) in placements.iter().enumerate() {
        let primary = if p.primary { " primary" } else { "" };
        println!(
            "#{i}: ({}, {}) scale {} transform {}{primary}",
            p.x, p.y, p.scale, p.transform
        );
        for m in &p.monitors {
            println!("  {} {}", m.connector, m.mode_id);
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| format!("encode json: {e}"))?;
    println!("{text}");
    Ok(())
}
