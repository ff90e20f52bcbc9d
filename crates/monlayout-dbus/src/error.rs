// Author: Dustin Pilgrim
// License: MIT

use monlayout_core::Error;

const UNREACHABLE: &[&str] = &[
    "org.freedesktop.DBus.Error.ServiceUnknown",
    "org.freedesktop.DBus.Error.NameHasNoOwner",
    "org.freedesktop.DBus.Error.NoReply",
    "org.freedesktop.DBus.Error.Disconnected",
    "org.freedesktop.DBus.Error.UnknownObject",
];

const ACCESS_DENIED: &str = "org.freedesktop.DBus.Error.AccessDenied";

/// Map a failed call onto the core error kinds.
///
/// `serial` is the serial submitted with an apply; mutter answers a stale
/// one with AccessDenied.
pub fn from_zbus(call: &'static str, serial: Option<u32>, e: zbus::Error) -> Error {
    match e {
        zbus::Error::MethodError(name, desc, _) => {
            let desc = desc.unwrap_or_default();
            match (name.as_str(), serial) {
                (n, _) if UNREACHABLE.contains(&n) => Error::ServiceUnreachable(format!("{call}: {desc}")),
                (ACCESS_DENIED, Some(serial)) if desc.to_ascii_lowercase().contains("stale") => {
                    Error::StaleSerial { serial }
                }
                (n, _) => Error::Rejected(format!("{n}: {desc}")),
            }
        }
        zbus::Error::Variant(e) => Error::MalformedRecord {
            record: call,
            reason: e.to_string(),
        },
        e @ (zbus::Error::InputOutput(_) | zbus::Error::Address(_) | zbus::Error::Handshake(_)) => {
            Error::ServiceUnreachable(format!("{call}: {e}"))
        }
        other => Error::Rejected(format!("{call}: {other}")),
    }
}
