//! Normalized user handed to the authentication host.

use crate::profile::TropipayProfile;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// The subset of a [`TropipayProfile`] the host keeps.
///
/// Absent profile fields are omitted when serialized, except `image`, which is
/// always present and `null` when the profile has no logo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TropipayUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_destination_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kyc_level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_type_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_country_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_in: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_out: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_proof: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_fa_type: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_fa_mode: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_occupation_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_country_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Value>,
}

/// Map a Tropipay profile onto the host's user shape.
///
/// Fields are copied by name. `image` takes the profile `logo` unless it is
/// missing or empty.
pub fn normalize(profile: &TropipayProfile) -> TropipayUser {
    let image = profile
        .logo
        .as_deref()
        .filter(|logo| !logo.is_empty())
        .map(str::to_owned);

    TropipayUser {
        id: profile.id.clone(),
        name: profile.name.clone(),
        surname: profile.surname.clone(),
        email: profile.email.clone(),
        image,
        wallet_id: profile.wallet_id.clone(),
        role: profile.role.clone(),
        nationality: profile.nationality,
        state: profile.state,
        balance: profile.balance.clone(),
        country_destination_id: profile.country_destination_id,
        kyc_level: profile.kyc_level,
        occupation_id: profile.occupation_id,
        client_type_id: profile.client_type_id,
        birth_country_id: profile.birth_country_id,
        province: profile.province.clone(),
        group_id: profile.group_id,
        last_login: profile.last_login.clone(),
        pending_in: profile.pending_in.clone(),
        pending_out: profile.pending_out.clone(),
        lang: profile.lang.clone(),
        short_id: profile.short_id.clone(),
        live_proof: profile.live_proof,
        two_fa_type: profile.two_fa_type,
        two_fa_mode: profile.two_fa_mode,
        other_occupation_detail: profile.other_occupation_detail.clone(),
        merchant_id: profile.merchant_id,
        verified: profile.verified.clone(),
        notes: profile.notes.clone(),
        sex: profile.sex.clone(),
        document_country_id: profile.document_country_id,
        created_at: profile.created_at.clone(),
        updated_at: profile.updated_at.clone(),
        group: profile.group.clone(),
    }
}

impl From<&TropipayProfile> for TropipayUser {
    fn from(profile: &TropipayProfile) -> Self {
        normalize(profile)
    }
}
