use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Capabilities carried by an authenticated operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Admin,
    Executive,
    Exhibition,
    Reservation,
    Teacher,
}

/// The authenticated operator as consumed by this core. Token issuance
/// lives outside; we only verify and unpack.
#[derive(Debug, Clone)]
pub struct Operator {
    pub id: String,
    pub permissions: HashSet<Capability>,
}

impl Operator {
    pub fn can(&self, capability: Capability) -> bool {
        self.permissions.contains(&capability)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub perms: Vec<Capability>,
}
