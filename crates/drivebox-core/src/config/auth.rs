//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// JWT validation configuration.
///
/// DriveBox does not issue tokens itself; access tokens are signed by the
/// identity service with the shared secret configured here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared with the token issuer.
    pub jwt_secret: String,
    /// Clock-skew leeway applied during expiry validation, in seconds.
    #[serde(default = "default_leeway")]
    pub jwt_leeway_seconds: u64,
}

fn default_leeway() -> u64 {
    30
}
