// Author: Dustin Pilgrim
// License: MIT

use eventline::{debug, warn};
use monlayout_core::wire::{CurrentStateReply, PlacementRecord, ResourcesReply};
use monlayout_core::{ApplyMethod, DisplayService, Error, Properties, Result};
use zbus::blocking::{Connection, Proxy};

use crate::convert;
use crate::error::from_zbus;
use crate::protocol::{
    APPLY_MONITORS_CONFIG, BUS_NAME, BusCurrentState, BusPlacement, BusResources, GET_CURRENT_STATE,
    GET_RESOURCES, INTERFACE, OBJECT_PATH,
};

/// Client for mutter's DisplayConfig interface. Holds no display state; each
/// call goes to the service.
pub struct DisplayConfigClient {
    proxy: Proxy<'static>,
}

impl DisplayConfigClient {
    /// Connect to the session bus.
    pub fn session() -> Result<Self> {
        let conn = Connection::session().map_err(|e| from_zbus("session bus", None, e))?;
        Self::new(&conn)
    }

    pub fn new(conn: &Connection) -> Result<Self> {
        let proxy = Proxy::new(conn, BUS_NAME, OBJECT_PATH, INTERFACE)
            .map_err(|e| from_zbus("proxy", None, e))?;
        Ok(Self { proxy })
    }

    pub fn proxy(&self) -> &Proxy<'static> {
        &self.proxy
    }
}

impl DisplayService for DisplayConfigClient {
    fn get_resources(&self) -> Result<ResourcesReply> {
        let reply: BusResources = self
            .proxy
            .call(GET_RESOURCES, &())
            .map_err(|e| from_zbus(GET_RESOURCES, None, e))?;

        debug!(
            "GetResources: serial={} crtcs={} outputs={} modes={}",
            reply.0,
            reply.1.len(),
            reply.2.len(),
            reply.3.len()
        );
        Ok(convert::resources(reply))
    }

    fn get_current_state(&self) -> Result<CurrentStateReply> {
        let reply: BusCurrentState = self
            .proxy
            .call(GET_CURRENT_STATE, &())
            .map_err(|e| from_zbus(GET_CURRENT_STATE, None, e))?;

        debug!(
            "GetCurrentState: serial={} monitors={} logical_monitors={}",
            reply.0,
            reply.1.len(),
            reply.2.len()
        );
        Ok(convert::current_state(reply))
    }

    fn apply_monitors_config(
        &self,
        serial: u32,
        method: ApplyMethod,
        logical_monitors: Vec<PlacementRecord>,
        properties: Properties,
    ) -> Result<()> {
        let encode = |e: zbus::Error| Error::InvalidSelection(format!("cannot encode property: {e}"));

        let logical_monitors: Vec<BusPlacement> = logical_monitors
            .into_iter()
            .map(convert::placement)
            .collect::<zbus::Result<_>>()
            .map_err(encode)?;
        let properties = convert::bus_properties(&properties).map_err(encode)?;

        debug!(
            "ApplyMonitorsConfig: serial={serial} method={method:?} logical_monitors={}",
            logical_monitors.len()
        );

        let reply: zbus::Result<()> = self.proxy.call(
            APPLY_MONITORS_CONFIG,
            &(serial, method.to_wire(), logical_monitors, properties),
        );

        reply.map_err(|e| {
            let err = from_zbus(APPLY_MONITORS_CONFIG, Some(serial), e);
            warn!("ApplyMonitorsConfig rejected: {err}");
            err
        })
    }
}
