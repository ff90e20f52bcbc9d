// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use monlayout_core::{ApplyMethod, Arrangement};
use rune_cfg::RuneConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub method: ApplyMethod,
    pub arrangement: Arrangement,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            method: ApplyMethod::Temporary,
            arrangement: Arrangement::Extend,
        }
    }
}

pub fn load(path: &Path) -> Result<Config, String> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let rc = RuneConfig::from_file(path).map_err(|e| format!("failed to read config: {e}"))?;

    parse_config(&rc)
}

fn parse_config(rc: &RuneConfig) -> Result<Config, String> {
    let mut cfg = Config::default();

    if !rc.has("monlayout") {
        return Ok(cfg);
    }

    if let Some(method) = rc
        .get_optional::<String>("monlayout.method")
        .map_err(|e| format!("config error at monlayout.method: {e}"))?
    {
        cfg.method =
            parse_method(&method).map_err(|e| format!("config error at monlayout.method: {e}"))?;
    }

    if let Some(arrangement) = rc
        .get_optional::<String>("monlayout.arrangement")
        .map_err(|e| format!("config error at monlayout.arrangement: {e}"))?
    {
        cfg.arrangement = parse_arrangement(&arrangement)
            .map_err(|e| format!("config error at monlayout.arrangement: {e}"))?;
    }

    Ok(cfg)
}

pub fn parse_method(s: &str) -> Result<ApplyMethod, String> {
    match s.trim().to_lowercase().as_str() {
        "verify" => Ok(ApplyMethod::Verify),
        "temporary" => Ok(ApplyMethod::Temporary),
        "persistent" => Ok(ApplyMethod::Persistent),
        other => Err(format!(
            "expected verify|temporary|persistent, got \"{other}\""
        )),
    }
}

pub fn parse_arrangement(s: &str) -> Result<Arrangement, String> {
    match s.trim().to_lowercase().as_str() {
        "single" => Ok(Arrangement::Single),
        "extend" => Ok(Arrangement::Extend),
        "clone" | "mirror" => Ok(Arrangement::Clone),
        other => Err(format!("expected single|extend|clone, got \"{other}\"")),
    }
}
