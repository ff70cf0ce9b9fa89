use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::catalog::FlatCatalog;

// ============================================================================
// ID Type
// ============================================================================

/// Opaque identifier assigned by the delivery service on creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryId(pub String);

impl DeliveryId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Building {
    Requizza,
    Hydra,
    Hercules,
    Firenze,
    Brichwood,
}

impl Building {
    pub const ALL: [Building; 5] = [
        Building::Requizza,
        Building::Hydra,
        Building::Hercules,
        Building::Firenze,
        Building::Brichwood,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Building::Requizza => "Requizza",
            Building::Hydra => "Hydra",
            Building::Hercules => "Hercules",
            Building::Firenze => "Firenze",
            Building::Brichwood => "Brichwood",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == name)
    }
}

impl fmt::Display for Building {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeliveryStatus {
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    #[default]
    Delivered,
}

impl DeliveryStatus {
    pub const ALL: [DeliveryStatus; 2] = [DeliveryStatus::OutForDelivery, DeliveryStatus::Delivered];

    pub fn label(&self) -> &'static str {
        match self {
            DeliveryStatus::OutForDelivery => "Out for Delivery",
            DeliveryStatus::Delivered => "Delivered",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 2] = [PaymentStatus::Paid, PaymentStatus::Unpaid];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Unpaid => "Unpaid",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A single pharmacy delivery to a building flat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    #[serde(rename = "_id")]
    pub id: DeliveryId,
    pub building: Building,
    pub flat_number: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(default)]
    pub delivery_status: DeliveryStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Delivery {
    /// Timestamp the record is dated and timed by: `deliveryTime`, else `createdAt`
    pub fn effective_time(&self) -> Option<DateTime<Utc>> {
        self.delivery_time.or(self.created_at)
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

/// The service may echo the form value back as text or store an empty form as
/// `null`; all of these read as an amount.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    match Option::<RawAmount>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(RawAmount::Number(n)) => Ok(n),
        Some(RawAmount::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| serde::de::Error::custom(format!("invalid amount: {s}")))
        }
    }
}

/// Render an amount the way the form shows it: no trailing `.0` for whole values
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        amount.to_string()
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// Body of `POST /api/deliveries`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeliveryDto {
    pub building: Building,
    pub flat_number: String,
    pub amount: f64,
    pub delivery_status: DeliveryStatus,
    pub delivery_time: DateTime<Utc>,
    pub payment_status: PaymentStatus,
}

impl NewDeliveryDto {
    /// New records always start as Delivered and Unpaid, timed at `now`
    pub fn from_draft(draft: ValidatedDraft, now: DateTime<Utc>) -> Self {
        Self {
            building: draft.building,
            flat_number: draft.flat_number,
            amount: draft.amount,
            delivery_status: DeliveryStatus::Delivered,
            delivery_time: now,
            payment_status: PaymentStatus::Unpaid,
        }
    }
}

/// Body of `PUT /api/deliveries/{id}`; absent fields are left untouched by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<Building>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_status: Option<DeliveryStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

impl DeliveryPatch {
    /// Status change. Going out for delivery restarts the timer baseline with a
    /// stamp strictly later than `previous`.
    pub fn status_change(
        status: DeliveryStatus,
        previous: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        let delivery_time = match status {
            DeliveryStatus::OutForDelivery => Some(fresh_stamp(previous, now)),
            DeliveryStatus::Delivered => None,
        };
        Self {
            delivery_status: Some(status),
            delivery_time,
            ..Self::default()
        }
    }

    pub fn payment(status: PaymentStatus) -> Self {
        Self {
            payment_status: Some(status),
            ..Self::default()
        }
    }

    /// Edit form: only the fields the form owns
    pub fn details(draft: ValidatedDraft) -> Self {
        Self {
            building: Some(draft.building),
            flat_number: Some(draft.flat_number),
            amount: Some(draft.amount),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// Millisecond precision survives a JSON round trip through the service.
fn fresh_stamp(previous: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    let now = now.trunc_subsecs(3);
    match previous {
        Some(prev) if now <= prev => prev.trunc_subsecs(3) + Duration::milliseconds(1),
        _ => now,
    }
}

// ============================================================================
// Draft and validation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a building")]
    MissingBuilding,
    #[error("Please select a flat number")]
    MissingFlatNumber,
    #[error("Flat {flat} does not belong to {building}")]
    UnknownFlat { building: Building, flat: String },
    #[error("Amount must be a non-negative number, got \"{0}\"")]
    InvalidAmount(String),
}

/// Add/edit form state, values kept as typed
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryDraft {
    pub building: Option<Building>,
    pub flat_number: String,
    pub amount: String,
}

impl Default for DeliveryDraft {
    fn default() -> Self {
        Self {
            building: Some(Building::Requizza),
            flat_number: String::new(),
            amount: String::new(),
        }
    }
}

/// Draft that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    pub building: Building,
    pub flat_number: String,
    pub amount: f64,
}

impl DeliveryDraft {
    pub fn from_delivery(delivery: &Delivery) -> Self {
        Self {
            building: Some(delivery.building),
            flat_number: delivery.flat_number.clone(),
            amount: format_amount(delivery.amount),
        }
    }

    /// Switching building invalidates the chosen flat
    pub fn select_building(&mut self, building: Option<Building>) {
        if self.building != building {
            self.flat_number.clear();
        }
        self.building = building;
    }

    pub fn validate(&self, catalog: &FlatCatalog) -> Result<ValidatedDraft, ValidationError> {
        let building = self.building.ok_or(ValidationError::MissingBuilding)?;

        let flat = self.flat_number.trim();
        if flat.is_empty() {
            return Err(ValidationError::MissingFlatNumber);
        }
        if !catalog.contains(building, flat) {
            return Err(ValidationError::UnknownFlat {
                building,
                flat: flat.to_string(),
            });
        }

        Ok(ValidatedDraft {
            building,
            flat_number: flat.to_string(),
            amount: parse_amount(&self.amount)?,
        })
    }
}

/// Empty input counts as zero
pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(ValidationError::InvalidAmount(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, h, m, s).unwrap()
    }

    #[test]
    fn test_deserialize_service_record() {
        let json = r#"{
            "_id": "6650f1c2a1",
            "building": "Hydra",
            "flatNumber": "202",
            "amount": "149.5",
            "deliveryStatus": "Out for Delivery",
            "paymentStatus": "Paid",
            "deliveryTime": "2026-10-16T09:30:00.000Z",
            "createdAt": "2026-10-16T09:00:00.000Z",
            "__v": 0
        }"#;
        let d: Delivery = serde_json::from_str(json).unwrap();
        assert_eq!(d.id.as_str(), "6650f1c2a1");
        assert_eq!(d.building, Building::Hydra);
        assert_eq!(d.amount, 149.5);
        assert_eq!(d.delivery_status, DeliveryStatus::OutForDelivery);
        assert!(d.is_paid());
        assert_eq!(d.effective_time(), Some(ts(9, 30, 0)));
    }

    #[test]
    fn test_missing_delivery_time_falls_back_to_created_at() {
        let json = r#"{"_id":"a","building":"Firenze","flatNumber":"401","amount":10,
            "deliveryStatus":"Delivered","paymentStatus":"Unpaid",
            "createdAt":"2026-10-16T08:15:00Z"}"#;
        let d: Delivery = serde_json::from_str(json).unwrap();
        assert_eq!(d.amount, 10.0);
        assert_eq!(d.effective_time(), Some(ts(8, 15, 0)));
    }

    #[test]
    fn test_null_amount_reads_as_zero() {
        let json = r#"[
            {"_id":"a","building":"Hydra","flatNumber":"201","amount":null,
             "deliveryStatus":"Delivered","paymentStatus":"Unpaid"},
            {"_id":"b","building":"Hydra","flatNumber":"202","amount":"",
             "deliveryStatus":"Delivered","paymentStatus":"Paid"}
        ]"#;
        let list: Vec<Delivery> = serde_json::from_str(json).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].amount, 0.0);
        assert_eq!(list[1].amount, 0.0);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{"_id":"a","building":"Hydra","flatNumber":"201",
            "deliveryStatus":"Lost","paymentStatus":"Unpaid"}"#;
        assert!(serde_json::from_str::<Delivery>(json).is_err());
    }

    #[test]
    fn test_new_delivery_defaults() {
        let draft = ValidatedDraft {
            building: Building::Hercules,
            flat_number: "302".into(),
            amount: 80.0,
        };
        let dto = NewDeliveryDto::from_draft(draft, ts(10, 0, 0));
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["building"], "Hercules");
        assert_eq!(value["flatNumber"], "302");
        assert_eq!(value["deliveryStatus"], "Delivered");
        assert_eq!(value["paymentStatus"], "Unpaid");
        assert!(value["deliveryTime"].is_string());
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let value = serde_json::to_value(DeliveryPatch::payment(PaymentStatus::Paid)).unwrap();
        assert_eq!(value, serde_json::json!({ "paymentStatus": "Paid" }));

        let value = serde_json::to_value(DeliveryPatch::status_change(
            DeliveryStatus::Delivered,
            Some(ts(9, 0, 0)),
            ts(10, 0, 0),
        ))
        .unwrap();
        assert_eq!(value, serde_json::json!({ "deliveryStatus": "Delivered" }));
    }

    #[test]
    fn test_out_for_delivery_stamps_fresh_time() {
        let patch = DeliveryPatch::status_change(
            DeliveryStatus::OutForDelivery,
            Some(ts(9, 0, 0)),
            ts(10, 0, 0),
        );
        assert_eq!(patch.delivery_time, Some(ts(10, 0, 0)));

        // Same instant, or a clock that went backwards, still moves forward.
        let prev = ts(10, 0, 0);
        let patch = DeliveryPatch::status_change(DeliveryStatus::OutForDelivery, Some(prev), prev);
        assert!(patch.delivery_time.unwrap() > prev);
        let patch =
            DeliveryPatch::status_change(DeliveryStatus::OutForDelivery, Some(prev), ts(9, 59, 0));
        assert!(patch.delivery_time.unwrap() > prev);
    }

    #[test]
    fn test_validate_requires_building_and_flat() {
        let catalog = FlatCatalog::default();

        let mut draft = DeliveryDraft::default();
        assert_eq!(draft.validate(&catalog), Err(ValidationError::MissingFlatNumber));

        draft.building = None;
        draft.flat_number = "101".into();
        assert_eq!(draft.validate(&catalog), Err(ValidationError::MissingBuilding));
    }

    #[test]
    fn test_validate_flat_must_belong_to_building() {
        let catalog = FlatCatalog::default();
        let draft = DeliveryDraft {
            building: Some(Building::Hydra),
            flat_number: "101".into(),
            amount: "20".into(),
        };
        assert!(matches!(
            draft.validate(&catalog),
            Err(ValidationError::UnknownFlat { building: Building::Hydra, .. })
        ));
    }

    #[test]
    fn test_validate_amount() {
        let catalog = FlatCatalog::default();
        let mut draft = DeliveryDraft {
            building: Some(Building::Requizza),
            flat_number: "103".into(),
            amount: String::new(),
        };
        assert_eq!(draft.validate(&catalog).unwrap().amount, 0.0);

        draft.amount = " 250.75 ".into();
        assert_eq!(draft.validate(&catalog).unwrap().amount, 250.75);

        draft.amount = "-5".into();
        assert!(matches!(draft.validate(&catalog), Err(ValidationError::InvalidAmount(_))));

        draft.amount = "abc".into();
        assert!(matches!(draft.validate(&catalog), Err(ValidationError::InvalidAmount(_))));
    }

    #[test]
    fn test_select_building_clears_flat() {
        let mut draft = DeliveryDraft {
            building: Some(Building::Requizza),
            flat_number: "101".into(),
            amount: "5".into(),
        };
        draft.select_building(Some(Building::Requizza));
        assert_eq!(draft.flat_number, "101");
        draft.select_building(Some(Building::Brichwood));
        assert!(draft.flat_number.is_empty());
        assert_eq!(draft.amount, "5");
    }

    #[test]
    fn test_draft_from_delivery() {
        let d = Delivery {
            id: DeliveryId::new("x"),
            building: Building::Firenze,
            flat_number: "403".into(),
            amount: 120.0,
            delivery_status: DeliveryStatus::Delivered,
            payment_status: PaymentStatus::Unpaid,
            delivery_time: None,
            created_at: None,
        };
        let draft = DeliveryDraft::from_delivery(&d);
        assert_eq!(draft.building, Some(Building::Firenze));
        assert_eq!(draft.amount, "120");
        assert_eq!(format_amount(12.5), "12.5");
    }
}
