// ─── Identity Derivation ───
// Deterministic offline UUIDs and the hardware fingerprint sent alongside
// auth requests.

use md5::{Digest, Md5};
use sysinfo::{Networks, System};
use uuid::Uuid;

use crate::core::error::{LauncherError, LauncherResult};

/// Derive the offline-mode UUID for a player name.
///
/// MD5 of `OfflinePlayer:<name>` with the version nibble forced to 3 and the
/// variant bits to RFC 4122, matching what vanilla servers compute for
/// offline players. Deterministic per name.
pub fn offline_uuid(name: &str) -> String {
    let digest = Md5::digest(format!("OfflinePlayer:{name}").as_bytes());

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    bytes[6] = (bytes[6] & 0x0F) | 0x30;
    bytes[8] = (bytes[8] & 0x3F) | 0x80;

    Uuid::from_bytes(bytes).to_string()
}

/// Stable fingerprint of this machine: MD5 over the primary MAC address and
/// the hostname, hex encoded.
pub fn hardware_fingerprint() -> LauncherResult<String> {
    let networks = Networks::new_with_refreshed_list();

    // Interface enumeration order is not stable, so sort by name before
    // picking the first interface with a real address.
    let mut interfaces: Vec<_> = networks.iter().collect();
    interfaces.sort_by_key(|(name, _)| name.to_owned());

    let mac = interfaces
        .iter()
        .map(|(_, data)| data.mac_address())
        .find(|mac| mac.0 != [0u8; 6])
        .ok_or_else(|| LauncherError::Fingerprint("no network interface with a MAC address".into()))?;

    let host = System::host_name()
        .ok_or_else(|| LauncherError::Fingerprint("hostname unavailable".into()))?;

    let digest = Md5::digest(format!("{mac}:{host}").as_bytes());
    Ok(hex::encode(digest))
}
