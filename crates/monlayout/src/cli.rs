// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use monlayout_core::{ApplyMethod, Arrangement, OutputSelection, Transform};

#[derive(Debug, Parser)]
#[command(name = "monlayout", version, about = "Arrange monitors through mutter's DisplayConfig.")]
pub struct Args {
    /// Log to stderr (in addition to the log file)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Override log file path (default: $XDG_STATE_HOME/monlayout/monlayout.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Override config path (default: $XDG_CONFIG_HOME/monlayout/monlayout.rune)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Show monitors, modes and the current layout
    State {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Compute placements without applying them
    Plan {
        arrangement: Arrangement,

        /// CONNECTOR[,mode=ID][,scale=S][,transform=T][,y=N][,primary]
        #[arg(short = 'o', long = "output", value_parser = parse_selection, required = true)]
        outputs: Vec<OutputSelection>,

        #[arg(long)]
        json: bool,
    },

    /// Plan and apply an arrangement
    Apply {
        /// Defaults to monlayout.arrangement from the config
        arrangement: Option<Arrangement>,

        /// CONNECTOR[,mode=ID][,scale=S][,transform=T][,y=N][,primary]
        #[arg(short = 'o', long = "output", value_parser = parse_selection, required = true)]
        outputs: Vec<OutputSelection>,

        /// Defaults to monlayout.method from the config
        #[arg(long, short = 'm')]
        method: Option<ApplyMethod>,

        /// Ask the service to verify the configuration before applying it
        #[arg(long)]
        verify_first: bool,
    },

    /// Print the state again whenever monitors change
    Watch {
        #[arg(long)]
        json: bool,
    },
}

pub fn parse_selection(s: &str) -> Result<OutputSelection, String> {
    let mut parts = s.split(',').map(str::trim);

    let connector = parts.next().filter(|c| !c.is_empty()).ok_or("missing connector name")?;
    let mut sel = OutputSelection::new(connector);

    for part in parts {
        match part.split_once('=') {
            None if part == "primary" => sel.primary = true,
            Some(("mode", v)) => sel.mode = Some(v.to_string()),
            Some(("scale", v)) => {
                let scale: f64 = v.parse().map_err(|_| format!("bad scale \"{v}\""))?;
                if !scale.is_finite() || scale <= 0.0 {
                    return Err(format!("scale must be positive, got {v}"));
                }
                sel.scale = Some(scale);
            }
            Some(("transform", v)) => sel.transform = Some(v.parse::<Transform>()?),
            Some(("y", v)) => sel.y = Some(v.parse().map_err(|_| format!("bad y offset \"{v}\""))?),
            _ => return Err(format!("unknown output option \"{part}\"")),
        }
    }

    Ok(sel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_connector() {
        assert_eq!(parse_selection("DP-1"), Ok(OutputSelection::new("DP-1")));
    }

    #[test]
    fn all_options() {
        let sel = parse_selection("HDMI-1,mode=1920x1200@59.950172424316406,scale=2,transform=90,y=-120,primary")
            .unwrap();

        assert_eq!(sel.connector, "HDMI-1");
        assert_eq!(sel.mode.as_deref(), Some("1920x1200@59.950172424316406"));
        assert_eq!(sel.scale, Some(2.0));
        assert_eq!(sel.transform, Some(Transform::Rotate90));
        assert_eq!(sel.y, Some(-120));
        assert!(sel.primary);
    }

    #[test]
    fn rejects_junk() {
        assert!(parse_selection("").is_err());
        assert!(parse_selection("DP-1,scale=0").is_err());
        assert!(parse_selection("DP-1,colour=red").is_err());
        assert!(parse_selection("DP-1,transform=45").is_err());
    }

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from([
            "monlayout", "apply", "clone", "-o", "DP-1", "-o", "HDMI-1", "--method", "verify",
        ])
        .unwrap();

        match args.cmd {
            Cmd::Apply {
                arrangement,
                outputs,
                method,
                verify_first,
            } => {
                assert_eq!(arrangement, Some(Arrangement::Clone));
                assert_eq!(outputs.len(), 2);
                assert_eq!(method, Some(ApplyMethod::Verify));
                assert!(!verify_first);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
