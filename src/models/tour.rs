use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub type TourId = i64;
pub type PropertyId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TourBooking {
    pub id: TourId,
    pub property_id: PropertyId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub tour_date: NaiveDate,
    pub tour_time: TourTime,
    pub message: String,
    pub status: TourStatus,
    pub created_at: DateTime<Utc>,
}

impl TourBooking {
    pub fn is_active(&self) -> bool {
        self.status != TourStatus::Cancelled
    }

    pub fn occupies(&self, property_id: PropertyId, date: NaiveDate, time: TourTime) -> bool {
        self.is_active()
            && self.property_id == property_id
            && self.tour_date == date
            && self.tour_time == time
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TourStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl TourStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TourStatus::Pending => "pending",
            TourStatus::Confirmed => "confirmed",
            TourStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "confirmed" => TourStatus::Confirmed,
            "cancelled" => TourStatus::Cancelled,
            _ => TourStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TourTime {
    #[serde(rename = "9:00 AM")]
    NineAm,
    #[serde(rename = "10:00 AM")]
    TenAm,
    #[serde(rename = "11:00 AM")]
    ElevenAm,
    #[serde(rename = "12:00 PM")]
    Noon,
    #[serde(rename = "1:00 PM")]
    OnePm,
    #[serde(rename = "2:00 PM")]
    TwoPm,
    #[serde(rename = "3:00 PM")]
    ThreePm,
    #[serde(rename = "4:00 PM")]
    FourPm,
    #[serde(rename = "5:00 PM")]
    FivePm,
}

impl TourTime {
    pub const ALL: [TourTime; 9] = [
        TourTime::NineAm,
        TourTime::TenAm,
        TourTime::ElevenAm,
        TourTime::Noon,
        TourTime::OnePm,
        TourTime::TwoPm,
        TourTime::ThreePm,
        TourTime::FourPm,
        TourTime::FivePm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TourTime::NineAm => "9:00 AM",
            TourTime::TenAm => "10:00 AM",
            TourTime::ElevenAm => "11:00 AM",
            TourTime::Noon => "12:00 PM",
            TourTime::OnePm => "1:00 PM",
            TourTime::TwoPm => "2:00 PM",
            TourTime::ThreePm => "3:00 PM",
            TourTime::FourPm => "4:00 PM",
            TourTime::FivePm => "5:00 PM",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.as_str() == s.trim())
    }

    pub fn start_time(&self) -> NaiveTime {
        let hour = match self {
            TourTime::NineAm => 9,
            TourTime::TenAm => 10,
            TourTime::ElevenAm => 11,
            TourTime::Noon => 12,
            TourTime::OnePm => 13,
            TourTime::TwoPm => 14,
            TourTime::ThreePm => 15,
            TourTime::FourPm => 16,
            TourTime::FivePm => 17,
        };
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
    }
}

impl std::fmt::Display for TourTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// All optional: a missing field is a validation error, not a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTourRequest {
    #[serde(default, deserialize_with = "property_id_or_text")]
    pub property_id: Option<PropertyId>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub tour_date: Option<String>,
    pub tour_time: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdOrText {
    Id(PropertyId),
    Text(String),
}

// Form inputs post the id as text; blank text counts as missing.
fn property_id_or_text<'de, D>(deserializer: D) -> Result<Option<PropertyId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IdOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdOrText::Id(id)) => Ok(Some(id)),
        Some(IdOrText::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(IdOrText::Text(text)) => text.trim().parse().map(Some).map_err(|_| {
            serde::de::Error::custom(format!("propertyId must be an integer, got {text:?}"))
        }),
    }
}

#[derive(Debug, Clone)]
pub struct TourDraft {
    pub property_id: PropertyId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub tour_date: NaiveDate,
    pub tour_time: TourTime,
    pub message: String,
    pub status: TourStatus,
    pub created_at: DateTime<Utc>,
}

impl TourDraft {
    pub fn into_booking(self, id: TourId) -> TourBooking {
        TourBooking {
            id,
            property_id: self.property_id,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            tour_date: self.tour_date,
            tour_time: self.tour_time,
            message: self.message,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

// `id` is accepted but never applied. `createdAt` is not patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPatch {
    pub id: Option<TourId>,
    pub property_id: Option<PropertyId>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub tour_date: Option<NaiveDate>,
    pub tour_time: Option<TourTime>,
    pub message: Option<String>,
    pub status: Option<TourStatus>,
}

impl TourPatch {
    pub fn status(status: TourStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn apply(self, booking: &mut TourBooking) {
        if let Some(v) = self.property_id {
            booking.property_id = v;
        }
        if let Some(v) = self.customer_name {
            booking.customer_name = v;
        }
        if let Some(v) = self.customer_email {
            booking.customer_email = v;
        }
        if let Some(v) = self.customer_phone {
            booking.customer_phone = v;
        }
        if let Some(v) = self.tour_date {
            booking.tour_date = v;
        }
        if let Some(v) = self.tour_time {
            booking.tour_time = v;
        }
        if let Some(v) = self.message {
            booking.message = v;
        }
        if let Some(v) = self.status {
            booking.status = v;
        }
    }
}
