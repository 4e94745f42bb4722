//! Tropipay profile payload as returned by `GET /api/users/profile`.
//!
//! The upstream schema is loosely typed, so every field is optional and fields
//! without a stable type are kept as raw JSON. A typed field holding a value of
//! another type reads as absent. Unknown fields land in `extra`.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TropipayProfile {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub surname: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub wallet_id: Option<String>,
    #[serde(rename = "t_c_version")]
    #[serde(deserialize_with = "lenient")]
    pub t_c_version: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub nationality: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub state: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub balance: Option<Number>,
    #[serde(deserialize_with = "lenient")]
    pub country_destination_id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub kyc_level: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub occupation_id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub client_type_id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub is_public_office: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub birth_country_id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub province: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub group_id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub last_login: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub pending_in: Option<Number>,
    #[serde(deserialize_with = "lenient")]
    pub pending_out: Option<Number>,
    #[serde(deserialize_with = "lenient")]
    pub lang: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub short_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub document_type_id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub document_expiration_date: Option<String>,
    pub contracts: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub live_proof: Option<bool>,
    pub need_migration: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub two_fa_type: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub two_fa_mode: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub other_occupation_detail: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub merchant_id: Option<i64>,
    pub error_payment_entity_id: Option<Value>,
    pub error_wallet_id: Option<Value>,
    pub verified: Option<Value>,
    pub notes: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub sex: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub document_country_id: Option<i64>,
    pub business_id: Option<Value>,
    pub business_user_type: Option<Value>,
    pub business_percent: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub affiliate_earnings: Option<Number>,
    pub affiliate_sync: Option<Value>,
    pub relation_type: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub subscribed_campaign: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub updated_at: Option<String>,
    pub group: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub business: Option<TropipayBusiness>,
    #[serde(deserialize_with = "lenient")]
    pub user_detail: Option<TropipayUserDetail>,
    #[serde(deserialize_with = "lenient")]
    pub logo: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub operation: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub preauthorized: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub has_expired_document: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub crisp_sign_email: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub amount_limit_charge_cards: Option<Number>,

    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Business account attached to merchant profiles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TropipayBusiness {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub user_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub public_name: Option<String>,
    #[serde(rename = "type")]
    pub business_type: Option<Value>,
    pub category: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub address: Option<String>,
    pub postal_code: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub province: Option<String>,
    pub country_destination_id: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub web_site: Option<String>,
    pub industry: Option<Value>,
    pub business_services: Option<Value>,
    pub is_a_financial_institution: Option<Value>,
    pub registration_type_id: Option<Value>,
    pub creation_date: Option<Value>,
    pub aprove_date: Option<Value>,
    pub net_worth_type_id: Option<Value>,
    pub estimated_monthly_volume: Option<Value>,
    pub source_of_income: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub state: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub amount_employees_id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub merchant_email: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub merchant_phone: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub merchant_company: Option<String>,
    pub ticket: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub updated_at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub merchant_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TropipayUserDetail {
    #[serde(deserialize_with = "lenient")]
    pub logo: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub background_img: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub web: Option<String>,
}

/// Read a field as `T`, treating null or a value of another type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
}

impl TropipayProfile {
    /// `name` and `surname` joined by a space, `None` when both are blank
    pub fn full_name(&self) -> Option<String> {
        let full = [self.name.as_deref(), self.surname.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        (!full.is_empty()).then_some(full)
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.last_login.as_deref())
    }

    pub fn created_at_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at.as_deref())
    }

    pub fn updated_at_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.updated_at.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_profile_payload() {
        let json = r#"{
            "id": "a1b2c3",
            "name": "Ana",
            "surname": "Pérez",
            "email": "ana@example.com",
            "walletId": "w-9",
            "t_c_version": "2.1",
            "nationality": null,
            "balance": 12550,
            "pendingIn": 0,
            "kycLevel": 4,
            "isPublicOffice": false,
            "liveProof": true,
            "documentExpirationDate": null,
            "verified": 1,
            "group": {"id": 3, "name": "standard"},
            "userDetail": {"logo": "https://cdn.example.com/a.png", "backgroundImg": null, "web": ""},
            "business": {"id": 7, "publicName": "Ana Store", "type": 2, "state": 1, "merchantId": 77},
            "logo": "https://cdn.example.com/a.png",
            "crispSignEmail": "sig"
        }"#;

        let profile: TropipayProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id.as_deref(), Some("a1b2c3"));
        assert_eq!(profile.wallet_id.as_deref(), Some("w-9"));
        assert_eq!(profile.t_c_version.as_deref(), Some("2.1"));
        assert!(profile.nationality.is_none());
        assert_eq!(profile.balance, Some(Number::from(12550)));
        assert_eq!(profile.kyc_level, Some(4));
        assert_eq!(profile.live_proof, Some(true));
        assert_eq!(profile.verified, Some(serde_json::json!(1)));
        assert_eq!(profile.group.as_ref().unwrap()["name"], "standard");

        let detail = profile.user_detail.as_ref().unwrap();
        assert!(detail.background_img.is_none());
        assert_eq!(detail.web.as_deref(), Some(""));

        let business = profile.business.as_ref().unwrap();
        assert_eq!(business.public_name.as_deref(), Some("Ana Store"));
        assert_eq!(business.business_type, Some(serde_json::json!(2)));
        assert_eq!(business.merchant_id, Some(77));

        assert!(profile.extra.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let profile: TropipayProfile = serde_json::from_value(serde_json::json!({
            "id": "1",
            "referralCode": "XYZ",
            "limits": {"daily": 1000}
        }))
        .unwrap();

        assert_eq!(profile.extra.get("referralCode").unwrap(), "XYZ");
        assert_eq!(profile.extra["limits"]["daily"], 1000);
    }

    #[test]
    fn test_mistyped_fields_read_as_absent() {
        let profile: TropipayProfile = serde_json::from_value(serde_json::json!({
            "id": 17,
            "kycLevel": "4",
            "state": 1.0,
            "liveProof": "yes",
            "business": "none",
            "userDetail": {"logo": 5, "web": "https://ana.example.com"},
            "logo": "http://x/y.png",
            "lang": "es"
        }))
        .unwrap();

        assert!(profile.id.is_none());
        assert!(profile.kyc_level.is_none());
        assert!(profile.state.is_none());
        assert!(profile.live_proof.is_none());
        assert!(profile.business.is_none());
        let detail = profile.user_detail.as_ref().unwrap();
        assert!(detail.logo.is_none());
        assert_eq!(detail.web.as_deref(), Some("https://ana.example.com"));
        assert_eq!(profile.logo.as_deref(), Some("http://x/y.png"));
        assert_eq!(profile.lang.as_deref(), Some("es"));
    }

    #[test]
    fn test_empty_object_is_a_valid_profile() {
        let profile: TropipayProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, TropipayProfile::default());
    }

    #[test]
    fn test_fractional_amounts_are_preserved() {
        let profile: TropipayProfile =
            serde_json::from_value(serde_json::json!({ "balance": 10.5 })).unwrap();
        assert_eq!(serde_json::to_value(&profile).unwrap()["balance"], 10.5);
    }

    #[test]
    fn test_full_name() {
        let profile = TropipayProfile {
            name: Some("Ana".to_string()),
            surname: Some(" Pérez ".to_string()),
            ..TropipayProfile::default()
        };
        assert_eq!(profile.full_name().as_deref(), Some("Ana Pérez"));

        let surname_only = TropipayProfile {
            name: Some("".to_string()),
            surname: Some("Pérez".to_string()),
            ..TropipayProfile::default()
        };
        assert_eq!(surname_only.full_name().as_deref(), Some("Pérez"));

        assert!(TropipayProfile::default().full_name().is_none());
    }

    #[test]
    fn test_timestamps() {
        let profile = TropipayProfile {
            last_login: Some("2023-04-05T10:20:30.000Z".to_string()),
            created_at: Some("not a date".to_string()),
            ..TropipayProfile::default()
        };

        assert_eq!(
            profile.last_login_at(),
            Some(Utc.with_ymd_and_hms(2023, 4, 5, 10, 20, 30).unwrap())
        );
        assert!(profile.created_at_time().is_none());
        assert!(profile.updated_at_time().is_none());
    }
}
