//! Built-in permission catalog with flexible name lookup.
//!
//! The backend annotates manifest permissions from a reference table; this
//! catalog mirrors that behavior for results that arrive without protection
//! levels. Lookup tries the exact name, the lowercase form, and the
//! `android.permission.` prefix added or stripped, and is total: unknown
//! names resolve to `unknown` with a stock description.

use rustc_hash::FxHashMap;

use crate::types::{Permission, ProtectionLevel};

const PREFIX: &str = "android.permission.";

/// Catalog entries for well-known platform permissions
const CATALOG: &[(&str, ProtectionLevel, &str)] = &[
    ("android.permission.CAMERA", ProtectionLevel::Dangerous, "Required to access the camera device"),
    ("android.permission.RECORD_AUDIO", ProtectionLevel::Dangerous, "Allows the app to record audio with the microphone"),
    ("android.permission.ACCESS_FINE_LOCATION", ProtectionLevel::Dangerous, "Allows access to precise location from GPS and network sources"),
    ("android.permission.ACCESS_COARSE_LOCATION", ProtectionLevel::Dangerous, "Allows access to approximate location from network sources"),
    ("android.permission.ACCESS_BACKGROUND_LOCATION", ProtectionLevel::Dangerous, "Allows access to location while the app is in the background"),
    ("android.permission.READ_CONTACTS", ProtectionLevel::Dangerous, "Allows the app to read the user's contacts data"),
    ("android.permission.WRITE_CONTACTS", ProtectionLevel::Dangerous, "Allows the app to modify the user's contacts data"),
    ("android.permission.READ_SMS", ProtectionLevel::Dangerous, "Allows the app to read SMS messages"),
    ("android.permission.SEND_SMS", ProtectionLevel::Dangerous, "Allows the app to send SMS messages"),
    ("android.permission.READ_CALL_LOG", ProtectionLevel::Dangerous, "Allows the app to read the user's call log"),
    ("android.permission.CALL_PHONE", ProtectionLevel::Dangerous, "Allows the app to initiate phone calls without user confirmation"),
    ("android.permission.READ_PHONE_STATE", ProtectionLevel::Dangerous, "Allows read-only access to phone state and identity"),
    ("android.permission.READ_EXTERNAL_STORAGE", ProtectionLevel::Dangerous, "Allows the app to read from external storage"),
    ("android.permission.WRITE_EXTERNAL_STORAGE", ProtectionLevel::Dangerous, "Allows the app to write to external storage"),
    ("android.permission.READ_CALENDAR", ProtectionLevel::Dangerous, "Allows the app to read the user's calendar data"),
    ("android.permission.BODY_SENSORS", ProtectionLevel::Dangerous, "Allows access to data from body sensors"),
    ("android.permission.INTERNET", ProtectionLevel::Normal, "Allows the app to open network sockets"),
    ("android.permission.ACCESS_NETWORK_STATE", ProtectionLevel::Normal, "Allows the app to view network connection information"),
    ("android.permission.ACCESS_WIFI_STATE", ProtectionLevel::Normal, "Allows the app to view Wi-Fi connection information"),
    ("android.permission.BLUETOOTH", ProtectionLevel::Normal, "Allows the app to connect to paired Bluetooth devices"),
    ("android.permission.VIBRATE", ProtectionLevel::Normal, "Allows control of the vibrator"),
    ("android.permission.WAKE_LOCK", ProtectionLevel::Normal, "Allows the app to keep the processor from sleeping"),
    ("android.permission.RECEIVE_BOOT_COMPLETED", ProtectionLevel::Normal, "Allows the app to start after the system finishes booting"),
    ("android.permission.FOREGROUND_SERVICE", ProtectionLevel::Normal, "Allows the app to run foreground services"),
    ("android.permission.POST_NOTIFICATIONS", ProtectionLevel::Dangerous, "Allows the app to post notifications"),
    ("android.permission.NFC", ProtectionLevel::Normal, "Allows the app to communicate over NFC"),
    ("android.permission.WRITE_SETTINGS", ProtectionLevel::Signature, "Allows the app to modify system settings"),
    ("android.permission.SYSTEM_ALERT_WINDOW", ProtectionLevel::Signature, "Allows the app to draw windows on top of other apps"),
    ("android.permission.INSTALL_PACKAGES", ProtectionLevel::Signature, "Allows the app to install packages"),
    ("android.permission.REQUEST_INSTALL_PACKAGES", ProtectionLevel::Signature, "Allows the app to request installation of packages"),
];

const UNKNOWN_DESCRIPTION: &str = "No description available";

/// Lookup table mapping permission name variants to catalog entries
#[derive(Debug)]
pub struct PermissionCatalog {
    lookup: FxHashMap<String, (ProtectionLevel, &'static str)>,
}

impl PermissionCatalog {
    /// Build the catalog with all name variants preloaded
    #[must_use]
    pub fn new() -> Self {
        let mut lookup = FxHashMap::default();

        for &(name, level, description) in CATALOG {
            let entry = (level, description);
            lookup.insert(name.to_string(), entry);
            lookup.insert(name.to_lowercase(), entry);

            if let Some(short) = name.strip_prefix(PREFIX) {
                lookup.insert(short.to_string(), entry);
                lookup.insert(short.to_lowercase(), entry);
            } else if !name.starts_with("android.") {
                let full = format!("{PREFIX}{name}");
                lookup.insert(full.to_lowercase(), entry);
                lookup.insert(full, entry);
            }
        }

        Self { lookup }
    }

    fn find(&self, name: &str) -> Option<(ProtectionLevel, &'static str)> {
        let mut variants = vec![name.to_string(), name.to_lowercase()];
        if let Some(short) = name.strip_prefix(PREFIX) {
            variants.push(short.to_string());
            variants.push(short.to_lowercase());
        } else if !name.starts_with("android.") {
            let full = format!("{PREFIX}{name}");
            variants.push(full.to_lowercase());
            variants.push(full);
        }

        variants
            .iter()
            .find_map(|variant| self.lookup.get(variant).copied())
    }

    /// Resolve a manifest permission name to a full record. The original
    /// name is preserved; unknown names get the stock unknown entry.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Permission {
        match self.find(name) {
            Some((level, description)) => {
                Permission::new(name, level).with_description(description)
            }
            None => Permission::new(name, ProtectionLevel::Unknown)
                .with_description(UNKNOWN_DESCRIPTION),
        }
    }

    /// Fill in protection levels and descriptions the backend left unset.
    /// Fields already present are never overwritten.
    pub fn annotate(&self, permissions: &mut [Permission]) {
        for permission in permissions.iter_mut() {
            if permission.protection_level != ProtectionLevel::Unknown
                && permission.description.is_some()
            {
                continue;
            }
            let resolved = self.resolve(&permission.name);
            if permission.protection_level == ProtectionLevel::Unknown {
                permission.protection_level = resolved.protection_level;
            }
            if permission.description.is_none() {
                permission.description = resolved.description;
            }
        }
    }

    /// Number of loaded lookup variants
    #[allow(dead_code)] // Used in tests
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.lookup.len()
    }
}

impl Default for PermissionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_name_resolves() {
        let catalog = PermissionCatalog::new();
        let p = catalog.resolve("android.permission.CAMERA");
        assert_eq!(p.name, "android.permission.CAMERA");
        assert_eq!(p.protection_level, ProtectionLevel::Dangerous);
        assert!(p.description.is_some());
    }

    #[test]
    fn test_short_name_resolves() {
        let catalog = PermissionCatalog::new();
        let p = catalog.resolve("INTERNET");
        assert_eq!(p.name, "INTERNET");
        assert_eq!(p.protection_level, ProtectionLevel::Normal);
    }

    #[test]
    fn test_lowercase_resolves() {
        let catalog = PermissionCatalog::new();
        let p = catalog.resolve("android.permission.camera");
        assert_eq!(p.protection_level, ProtectionLevel::Dangerous);
    }

    #[test]
    fn test_unknown_name_is_total() {
        let catalog = PermissionCatalog::new();
        let p = catalog.resolve("com.vendor.permission.SECRET_SAUCE");
        assert_eq!(p.protection_level, ProtectionLevel::Unknown);
        assert_eq!(p.description.as_deref(), Some("No description available"));
        assert_eq!(p.name, "com.vendor.permission.SECRET_SAUCE");
    }

    #[test]
    fn test_variant_count_exceeds_catalog() {
        let catalog = PermissionCatalog::new();
        assert!(catalog.entry_count() > CATALOG.len());
    }

    #[test]
    fn test_annotate_fills_only_missing_fields() {
        let catalog = PermissionCatalog::new();
        let mut permissions = vec![
            Permission::new("android.permission.CAMERA", ProtectionLevel::Unknown),
            Permission::new("android.permission.INTERNET", ProtectionLevel::Dangerous)
                .with_description("already described"),
        ];
        catalog.annotate(&mut permissions);

        assert_eq!(permissions[0].protection_level, ProtectionLevel::Dangerous);
        assert!(permissions[0].description.is_some());
        // Backend-provided fields win over the catalog
        assert_eq!(permissions[1].protection_level, ProtectionLevel::Dangerous);
        assert_eq!(permissions[1].description.as_deref(), Some("already described"));
    }
}
