use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static wristband-color configuration for one guest type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestTypeEntry {
    pub prefix: String,
    pub class: String,
}

/// The guest_type -> {prefix, class} mapping. Injected as a value object
/// so the codec and gates never reach into ambient configuration.
#[derive(Debug, Clone, Default)]
pub struct GuestTypeTable {
    entries: HashMap<String, GuestTypeEntry>,
}

impl GuestTypeTable {
    /// The standard event configuration.
    pub fn builtin() -> Self {
        let specs = [
            ("GuestBlue", "GB", "General"),
            ("GuestRed", "GR", "General"),
            ("GuestYellow", "GY", "General"),
            ("GuestPurple", "GP", "General"),
            ("GuestOrange", "GO", "General"),
            ("GuestGreen", "GG", "General"),
            ("GuestWhite", "GW", "General"),
            ("StudentGray", "SG", "Student"),
            ("TestBlue", "TB", "General"),
            ("TestRed", "TR", "General"),
            ("TestYellow", "TY", "General"),
        ];
        let entries = specs
            .into_iter()
            .map(|(guest_type, prefix, class)| {
                (
                    guest_type.to_string(),
                    GuestTypeEntry {
                        prefix: prefix.to_string(),
                        class: class.to_string(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, guest_type: &str) -> Option<&GuestTypeEntry> {
        self.entries.get(guest_type)
    }

    pub fn prefix_of(&self, guest_type: &str) -> Option<&str> {
        self.get(guest_type).map(|e| e.prefix.as_str())
    }

    pub fn class_of(&self, guest_type: &str) -> Option<&str> {
        self.get(guest_type).map(|e| e.class.as_str())
    }
}
