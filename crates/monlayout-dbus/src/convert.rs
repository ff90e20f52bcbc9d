// Author: Dustin Pilgrim
// License: MIT

use monlayout_core::wire::{
    CurrentStateReply, LogicalMonitorRecord, ModeRecord, MonitorRecord, PlacementRecord,
    ResourcesReply,
};
use monlayout_core::{PropValue, Properties};
use zvariant::{OwnedValue, Value};

use crate::protocol::{
    BusAssignment, BusCurrentState, BusLogicalMonitor, BusMode, BusMonitor, BusPlacement,
    BusProperties, BusResources,
};

pub fn properties(props: BusProperties) -> Properties {
    props
        .into_iter()
        .map(|(k, v)| (k, prop_value(&v)))
        .collect()
}

pub fn prop_value(v: &OwnedValue) -> PropValue {
    match &**v {
        Value::Bool(b) => PropValue::Bool(*b),
        Value::U8(n) => PropValue::UInt(u64::from(*n)),
        Value::U16(n) => PropValue::UInt(u64::from(*n)),
        Value::U32(n) => PropValue::UInt(u64::from(*n)),
        Value::U64(n) => PropValue::UInt(*n),
        Value::I16(n) => PropValue::Int(i64::from(*n)),
        Value::I32(n) => PropValue::Int(i64::from(*n)),
        Value::I64(n) => PropValue::Int(*n),
        Value::F64(d) => PropValue::Double(*d),
        Value::Str(s) => PropValue::Str(s.to_string()),
        other => PropValue::Other(format!("{other:?}")),
    }
}

/// Integers go out in the narrowest of `i`/`u`/`x`/`t` that holds them,
/// which is what the service expects for its known keys.
pub fn bus_value(v: &PropValue) -> zbus::Result<OwnedValue> {
    let value = match v {
        PropValue::Bool(b) => Value::from(*b),
        PropValue::Int(i) => match i32::try_from(*i) {
            Ok(i) => Value::from(i),
            Err(_) => Value::from(*i),
        },
        PropValue::UInt(u) => match u32::try_from(*u) {
            Ok(u) => Value::from(u),
            Err(_) => Value::from(*u),
        },
        PropValue::Double(d) => Value::from(*d),
        PropValue::Str(s) | PropValue::Other(s) => Value::from(s.as_str()),
    };
    Ok(OwnedValue::try_from(value)?)
}

pub fn bus_properties(props: &Properties) -> zbus::Result<BusProperties> {
    props
        .iter()
        .map(|(k, v)| Ok((k.clone(), bus_value(v)?)))
        .collect()
}

pub fn resources(reply: BusResources) -> ResourcesReply {
    let (serial, crtcs, outputs, modes, max_width, max_height) = reply;
    (
        serial,
        crtcs
            .into_iter()
            .map(|(id, winsys, x, y, w, h, mode, transform, transforms, props)| {
                (id, winsys, x, y, w, h, mode, transform, transforms, properties(props))
            })
            .collect(),
        outputs
            .into_iter()
            .map(|(id, winsys, crtc, crtcs, name, modes, clones, props)| {
                (id, winsys, crtc, crtcs, name, modes, clones, properties(props))
            })
            .collect(),
        modes,
        max_width,
        max_height,
    )
}

pub fn current_state(reply: BusCurrentState) -> CurrentStateReply {
    let (serial, monitors, logical_monitors, props) = reply;
    (
        serial,
        monitors.into_iter().map(monitor).collect(),
        logical_monitors.into_iter().map(logical_monitor).collect(),
        properties(props),
    )
}

fn monitor(rec: BusMonitor) -> MonitorRecord {
    let (spec, modes, props) = rec;
    (spec, modes.into_iter().map(mode).collect(), properties(props))
}

fn mode(rec: BusMode) -> ModeRecord {
    let (id, w, h, refresh, preferred_scale, scales, props) = rec;
    (id, w, h, refresh, preferred_scale, scales, properties(props))
}

fn logical_monitor(rec: BusLogicalMonitor) -> LogicalMonitorRecord {
    let (x, y, scale, transform, primary, monitors, props) = rec;
    (x, y, scale, transform, primary, monitors, properties(props))
}

pub fn placement(rec: PlacementRecord) -> zbus::Result<BusPlacement> {
    let (x, y, scale, transform, primary, monitors) = rec;
    let monitors = monitors
        .into_iter()
        .map(|(connector, mode_id, props)| -> zbus::Result<BusAssignment> {
            Ok((connector, mode_id, bus_properties(&props)?))
        })
        .collect::<zbus::Result<_>>()?;
    Ok((x, y, scale, transform, primary, monitors))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(v: Value<'_>) -> OwnedValue {
        OwnedValue::try_from(v).unwrap()
    }

    #[test]
    fn maps_known_value_kinds() {
        assert_eq!(prop_value(&owned(Value::Bool(true))), PropValue::Bool(true));
        assert_eq!(prop_value(&owned(Value::I32(-1))), PropValue::Int(-1));
        assert_eq!(prop_value(&owned(Value::U32(2))), PropValue::UInt(2));
        assert_eq!(prop_value(&owned(Value::F64(1.5))), PropValue::Double(1.5));
        assert_eq!(
            prop_value(&owned(Value::from("Dell"))),
            PropValue::Str("Dell".into())
        );
    }

    #[test]
    fn narrow_integers_on_the_way_out() {
        let v = bus_value(&PropValue::UInt(1)).unwrap();
        assert!(matches!(&*v, Value::U32(1)));

        let v = bus_value(&PropValue::Int(-1)).unwrap();
        assert!(matches!(&*v, Value::I32(-1)));
    }

    #[test]
    fn resources_keep_order_and_ids() {
        let mut props = BusProperties::new();
        props.insert("primary".into(), owned(Value::Bool(true)));

        let reply: BusResources = (
            9,
            vec![(0, 1, 0, 0, 1920, 1200, 5, 0, vec![0], BusProperties::new())],
            vec![(
                2,
                3,
                0,
                vec![0],
                "DP-1".into(),
                vec![5],
                vec![],
                props,
            )],
            vec![(5, 6, 1920, 1200, 60.0, 0)],
            8192,
            8192,
        );

        let (serial, crtcs, outputs, modes, ..) = resources(reply);
        assert_eq!(serial, 9);
        assert_eq!(crtcs[0].0, 0);
        assert_eq!(outputs[0].4, "DP-1");
        assert_eq!(outputs[0].7.get("primary"), Some(&PropValue::Bool(true)));
        assert_eq!(modes[0].0, 5);
    }
}
