use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::dates::{is_calendar_date, DATE_FORMAT};

/// Lifecycle status of a shipment order.
///
/// The serialized labels match the backend documents exactly, spaces included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Posted,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "In Progress")]
    InProgress,
    Dispatched,
    Completed,
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Posted,
        OrderStatus::OnHold,
        OrderStatus::InProgress,
        OrderStatus::Dispatched,
        OrderStatus::Completed,
        OrderStatus::Canceled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Posted => "Posted",
            OrderStatus::OnHold => "On Hold",
            OrderStatus::InProgress => "In Progress",
            OrderStatus::Dispatched => "Dispatched",
            OrderStatus::Completed => "Completed",
            OrderStatus::Canceled => "Canceled",
        }
    }

    /// Only orders that have left the lot earn broker fees toward the target.
    pub fn counts_toward_target(&self) -> bool {
        matches!(self, OrderStatus::Dispatched | OrderStatus::Completed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A shipment order as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub order_id: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub pickup_start: String,
    #[serde(default)]
    pub pickup_end: String,
    #[serde(default)]
    pub dispatch_day: String,
    #[serde(default)]
    pub booking_date: String,
    #[serde(default)]
    pub broker_fee: f64,
    #[serde(default)]
    pub total_price: f64,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(deserialize_with = "deserialize_created_at")]
    pub created_at: DateTime<Utc>,
}

/// The backend stamps `createdAt` as a bare `YYYY-MM-DD` day; those read as
/// midnight UTC. Full RFC 3339 timestamps are accepted as well.
fn deserialize_created_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(stamp) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(stamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(&raw, DATE_FORMAT)
        .map(|day| Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)))
        .map_err(|_| de::Error::custom(format!("invalid createdAt {raw:?}")))
}

/// The editable part of an order, as submitted from the order form.
///
/// Used both to create an order and to replace the fields of an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    pub order_id: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub pickup_start: String,
    #[serde(default)]
    pub pickup_end: String,
    #[serde(default)]
    pub dispatch_day: String,
    #[serde(default)]
    pub booking_date: String,
    #[serde(default)]
    pub broker_fee: f64,
    #[serde(default)]
    pub total_price: f64,
}

/// Payload for creating a new order on behalf of its owner.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: String,
    pub user_email: Option<String>,
    pub form: OrderForm,
}

impl OrderForm {
    pub fn new(order_id: impl Into<String>, status: OrderStatus) -> Self {
        Self {
            order_id: order_id.into(),
            status,
            customer_name: String::new(),
            phone_number: String::new(),
            pickup_start: String::new(),
            pickup_end: String::new(),
            dispatch_day: String::new(),
            booking_date: String::new(),
            broker_fee: 0.0,
            total_price: 0.0,
        }
    }

    pub fn customer(mut self, name: impl Into<String>, phone: impl Into<String>) -> Self {
        self.customer_name = name.into();
        self.phone_number = phone.into();
        self
    }

    pub fn pickup_window(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.pickup_start = start.into();
        self.pickup_end = end.into();
        self
    }

    pub fn dispatch_on(mut self, day: impl Into<String>) -> Self {
        self.dispatch_day = day.into();
        self
    }

    pub fn booked_on(mut self, day: impl Into<String>) -> Self {
        self.booking_date = day.into();
        self
    }

    pub fn fees(mut self, broker_fee: f64, total_price: f64) -> Self {
        self.broker_fee = broker_fee;
        self.total_price = total_price;
        self
    }

    /// Every text and date field is required. Dates must be real `YYYY-MM-DD`
    /// days and amounts finite and non-negative.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("orderId", &self.order_id),
            ("customerName", &self.customer_name),
            ("phoneNumber", &self.phone_number),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{field} is required"));
            }
        }
        let dates = [
            ("pickupStart", &self.pickup_start),
            ("pickupEnd", &self.pickup_end),
            ("dispatchDay", &self.dispatch_day),
            ("bookingDate", &self.booking_date),
        ];
        for (field, value) in dates {
            if value.is_empty() {
                return Err(format!("{field} is required"));
            }
            if !is_calendar_date(value) {
                return Err(format!("{field} must be a YYYY-MM-DD date, got {value:?}"));
            }
        }
        let amounts = [("brokerFee", self.broker_fee), ("totalPrice", self.total_price)];
        for (field, amount) in amounts {
            if !amount.is_finite() || amount < 0.0 {
                return Err(format!("{field} must be a non-negative amount, got {amount}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
impl OrderForm {
    /// A form with every required field filled in.
    pub(crate) fn complete(order_id: &str, status: OrderStatus) -> Self {
        OrderForm::new(order_id, status)
            .customer("Test Customer", "555-0100")
            .pickup_window("2024-05-01", "2024-05-03")
            .dispatch_on("2024-05-02")
            .booked_on("2024-04-25")
    }
}

impl Order {
    pub fn from_form(
        id: impl Into<String>,
        user_id: impl Into<String>,
        user_email: Option<String>,
        form: OrderForm,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut order = Self {
            id: id.into(),
            order_id: String::new(),
            status: form.status,
            customer_name: String::new(),
            phone_number: String::new(),
            pickup_start: String::new(),
            pickup_end: String::new(),
            dispatch_day: String::new(),
            booking_date: String::new(),
            broker_fee: 0.0,
            total_price: 0.0,
            user_id: user_id.into(),
            user_email,
            created_at,
        };
        order.apply_form(form);
        order
    }

    /// Replaces every editable field. Identity, owner and creation time are kept.
    pub fn apply_form(&mut self, form: OrderForm) {
        self.order_id = form.order_id;
        self.status = form.status;
        self.customer_name = form.customer_name;
        self.phone_number = form.phone_number;
        self.pickup_start = form.pickup_start;
        self.pickup_end = form.pickup_end;
        self.dispatch_day = form.dispatch_day;
        self.booking_date = form.booking_date;
        self.broker_fee = form.broker_fee;
        self.total_price = form.total_price;
    }

    /// The current editable fields, e.g. to pre-fill an edit form.
    pub fn to_form(&self) -> OrderForm {
        OrderForm {
            order_id: self.order_id.clone(),
            status: self.status,
            customer_name: self.customer_name.clone(),
            phone_number: self.phone_number.clone(),
            pickup_start: self.pickup_start.clone(),
            pickup_end: self.pickup_end.clone(),
            dispatch_day: self.dispatch_day.clone(),
            booking_date: self.booking_date.clone(),
            broker_fee: self.broker_fee,
            total_price: self.total_price,
        }
    }

    /// Broker fee with unusable values counted as zero.
    pub fn broker_fee_or_zero(&self) -> f64 {
        if self.broker_fee.is_finite() && self.broker_fee > 0.0 {
            self.broker_fee
        } else {
            0.0
        }
    }
}
