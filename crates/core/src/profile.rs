//! The signed-in user's cached profile.

use serde::{Deserialize, Serialize};

/// Author name used when no profile is cached.
pub const GUEST_AUTHOR_NAME: &str = "Guest";

/// Profile of the signed-in user, persisted in the local session cache.
///
/// Field names match the JSON the sign-in flow writes under the
/// `userData` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_ref: String,
    pub user_email: String,
    pub user_name: String,
    #[serde(default)]
    pub user_profile_pic: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
}

/// Display name to attribute reviews to.
pub fn author_name(profile: Option<&UserProfile>) -> &str {
    profile
        .map(|p| p.user_name.trim())
        .filter(|name| !name.is_empty())
        .unwrap_or(GUEST_AUTHOR_NAME)
}
