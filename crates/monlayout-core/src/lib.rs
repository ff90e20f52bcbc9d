// Author: Dustin Pilgrim
// License: MIT

pub mod apply;
pub mod crtc;
pub mod error;
pub mod mode;
pub mod monitor;
pub mod output;
pub mod placement;
pub mod plan;
pub mod props;
pub mod report;
pub mod service;
pub mod snapshot;
pub mod transform;
pub mod wire;

#[cfg(test)]
mod testing;

pub use apply::apply;
pub use crtc::Crtc;
pub use error::{Error, Result};
pub use mode::{HwMode, Mode};
pub use monitor::{LogicalMonitor, Monitor, MonitorSpec};
pub use output::Output;
pub use placement::{ApplyMethod, LogicalMonitorPlacement, MonitorAssignment};
pub use plan::{Arrangement, OutputSelection, plan};
pub use props::{PropValue, Properties};
pub use report::StateReport;
pub use service::DisplayService;
pub use snapshot::{LayoutMode, Snapshot, fetch};
pub use transform::Transform;
