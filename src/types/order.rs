//! Order types and normalization.
//!
//! Raw order records from the order API carry integer lamport amounts, a
//! numeric status code and metadata as an embedded JSON string. [`Order`]
//! is the normalized view the UI consumes: decoded status, display-unit
//! amounts, computed end/remaining times.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::display_from_lamports;
use super::machine::MachineInfo;
use crate::error::SdkError;

/// Order lifecycle status.
///
/// The numeric codes are fixed by the backend; any other value is rejected
/// at decode time rather than mapped to an undefined name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order placed, device still provisioning.
    Preparing,
    /// Device is running and rented time remains.
    Available,
    /// Rental period ended normally.
    Completed,
    /// Provisioning or execution failed.
    Failed,
    /// Order was refunded before the period ended.
    Refunded,
}

impl OrderStatus {
    /// Returns the display name for this status.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Preparing => "Preparing",
            Self::Available => "Available",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Refunded => "Refunded",
        }
    }

    /// Returns true while the seller has not yet been paid out.
    #[must_use]
    pub const fn is_pending_settlement(&self) -> bool {
        matches!(self, Self::Preparing | Self::Available)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<OrderStatus> for u8 {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Preparing => 0,
            OrderStatus::Available => 1,
            OrderStatus::Completed => 2,
            OrderStatus::Failed => 3,
            OrderStatus::Refunded => 4,
        }
    }
}

impl TryFrom<u8> for OrderStatus {
    type Error = SdkError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Preparing),
            1 => Ok(Self::Available),
            2 => Ok(Self::Completed),
            3 => Ok(Self::Failed),
            4 => Ok(Self::Refunded),
            _ => Err(SdkError::Validation(format!(
                "unknown order status code: {}",
                value
            ))),
        }
    }
}

/// Task form details from the purchase dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaskForm {
    /// User-supplied task name.
    #[serde(rename = "taskName", default)]
    pub task_name: Option<String>,
}

/// Metadata embedded in an order record.
///
/// Free-form JSON written when the order is placed; the machine address is
/// injected by the SDK so the device can be recovered from the order alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OrderMetadata {
    /// On-chain machine account the order was placed against.
    #[serde(rename = "machinePublicKey", default)]
    pub machine_public_key: Option<String>,

    /// Purchase form details.
    #[serde(rename = "formData", default)]
    pub form_data: Option<TaskForm>,

    /// Device details snapshotted at purchase time.
    #[serde(rename = "MachineInfo", alias = "machineInfo", default)]
    pub machine_info: Option<MachineInfo>,

    /// Any remaining metadata fields, preserved as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A raw order record as returned by the order API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawOrder {
    /// Order identifier.
    pub id: String,

    /// Buyer wallet address (base58).
    #[serde(default)]
    pub buyer: Option<String>,

    /// Seller wallet address (base58).
    #[serde(default)]
    pub seller: Option<String>,

    /// Hourly price in lamports.
    pub price: u64,

    /// Total amount in lamports.
    pub total: u64,

    /// Rental start time.
    pub start_time: DateTime<Utc>,

    /// Time the order was placed; falls back to the start time when absent.
    #[serde(default)]
    pub order_time: Option<DateTime<Utc>>,

    /// Rental duration in hours.
    pub duration: i64,

    /// Numeric status code.
    pub status: u8,

    /// Metadata as an embedded JSON string.
    #[serde(default)]
    pub metadata: Option<String>,

    /// Refund time; the backend sends the zero time when not refunded.
    #[serde(default)]
    pub refund_time: Option<DateTime<Utc>>,
}

/// A normalized order ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Order identifier.
    pub id: String,

    /// Buyer wallet address.
    pub buyer: Option<String>,

    /// Seller wallet address.
    pub seller: Option<String>,

    /// Hourly price in display units.
    pub price: Decimal,

    /// Total amount in display units.
    pub total: Decimal,

    /// Decoded status.
    pub status: OrderStatus,

    /// Rental start time.
    pub start_time: DateTime<Utc>,

    /// Start time plus the purchased duration, independent of actual
    /// on-chain state.
    pub end_time: DateTime<Utc>,

    /// Duration in hours; forced to zero for failed orders.
    pub duration_hours: i64,

    /// Time left until `end_time`; present only while the order is
    /// available and the end time has not passed.
    pub remaining_time: Option<Duration>,

    /// Remaining whole hours (rounded up, at least one) while available.
    pub remaining_duration_hours: Option<i64>,

    /// Unused hours credited back by a refund: the displayed duration
    /// minus the hours consumed before the refund (rounded up). Computed
    /// from the zeroed duration for failed orders, so it can be negative.
    pub refund_duration_hours: Option<i64>,

    /// Parsed metadata, when present.
    pub metadata: Option<OrderMetadata>,
}

impl Order {
    /// Normalizes a raw record against the current wall clock.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown status code or unparseable metadata.
    pub fn from_raw(raw: &RawOrder) -> Result<Self, SdkError> {
        Self::from_raw_at(raw, Utc::now())
    }

    /// Normalizes a raw record against an explicit `now`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown status code or unparseable metadata.
    pub fn from_raw_at(raw: &RawOrder, now: DateTime<Utc>) -> Result<Self, SdkError> {
        let status = OrderStatus::try_from(raw.status)?;

        let metadata = match raw.metadata.as_deref() {
            Some(s) if !s.is_empty() => Some(serde_json::from_str::<OrderMetadata>(s).map_err(
                |e| SdkError::Serialization(format!("order metadata is not valid JSON: {}", e)),
            )?),
            _ => None,
        };

        // The end time is always start + purchased duration, even for
        // failed orders whose displayed duration is zeroed below. The
        // duration is backend-supplied and unconstrained, so the addition
        // must not panic on a corrupt record.
        let end_time = Duration::try_hours(raw.duration)
            .and_then(|d| raw.start_time.checked_add_signed(d))
            .ok_or_else(|| {
                SdkError::Validation(format!(
                    "order duration out of range: {} hours",
                    raw.duration
                ))
            })?;

        let duration_hours = if status == OrderStatus::Failed {
            0
        } else {
            raw.duration
        };

        let (remaining_time, remaining_duration_hours) =
            if status == OrderStatus::Available && now < end_time {
                let remaining = end_time - now;
                (Some(remaining), Some(ceil_hours(remaining).max(1)))
            } else {
                (None, None)
            };

        let refund_duration_hours = match raw.refund_time {
            Some(refund_time) if refund_time.timestamp() != 0 => {
                let order_time = raw.order_time.unwrap_or(raw.start_time);
                let consumed = ceil_hours(refund_time - order_time);
                let refunded = duration_hours.checked_sub(consumed).ok_or_else(|| {
                    SdkError::Validation(format!(
                        "refund time {} is inconsistent with order time {}",
                        refund_time, order_time
                    ))
                })?;
                Some(refunded)
            }
            _ => None,
        };

        Ok(Self {
            id: raw.id.clone(),
            buyer: raw.buyer.clone(),
            seller: raw.seller.clone(),
            price: display_from_lamports(raw.price),
            total: display_from_lamports(raw.total),
            status,
            start_time: raw.start_time,
            end_time,
            duration_hours,
            remaining_time,
            remaining_duration_hours,
            refund_duration_hours,
            metadata,
        })
    }
}

/// Rounds a duration up to whole hours.
fn ceil_hours(d: Duration) -> i64 {
    let secs = d.num_seconds();
    // Stable equivalent of `i64::div_ceil(secs, 3600)`, which is unstable.
    let q = secs / 3600;
    let r = secs % 3600;
    if r > 0 {
        q + 1
    } else {
        q
    }
}

/// Pending and received earnings over a set of orders, in lamports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Earnings {
    /// Totals of orders still preparing or running.
    pub pending: u64,

    /// Totals of completed orders.
    pub received: u64,
}

/// Sums raw order totals into pending and received buckets.
///
/// Preparing and Available orders count as pending, Completed as received;
/// failed and refunded orders contribute to neither.
#[must_use]
pub fn summarize_earnings(orders: &[RawOrder]) -> Earnings {
    let mut earnings = Earnings::default();
    for order in orders {
        match OrderStatus::try_from(order.status) {
            Ok(status) if status.is_pending_settlement() => {
                earnings.pending = earnings.pending.saturating_add(order.total);
            }
            Ok(OrderStatus::Completed) => {
                earnings.received = earnings.received.saturating_add(order.total);
            }
            // Failed, refunded and unrecognized codes contribute nothing.
            _ => {}
        }
    }
    earnings
}

/// A status filter option for order list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    /// Human-readable label.
    pub label: &'static str,

    /// Wire value sent to the order API; `"all"` means no filter.
    pub value: &'static str,
}

/// Returns the status filter table rendered by order list views.
#[must_use]
pub const fn status_filter_options() -> [FilterOption; 6] {
    [
        FilterOption {
            label: "All Status",
            value: "all",
        },
        FilterOption {
            label: "Preparing",
            value: "0",
        },
        FilterOption {
            label: "Available",
            value: "1",
        },
        FilterOption {
            label: "Completed",
            value: "2",
        },
        FilterOption {
            label: "Failed",
            value: "3",
        },
        FilterOption {
            label: "Refunded",
            value: "4",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw_order(status: u8, duration: i64) -> RawOrder {
        RawOrder {
            id: "order-1".to_string(),
            buyer: Some("buyer".to_string()),
            seller: Some("seller".to_string()),
            price: 1_000_000_000,
            total: 10_000_000_000,
            start_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            order_time: None,
            duration,
            status,
            metadata: None,
            refund_time: None,
        }
    }

    #[test]
    fn test_status_decode_all_known() {
        for (code, name) in [
            (0u8, "Preparing"),
            (1, "Available"),
            (2, "Completed"),
            (3, "Failed"),
            (4, "Refunded"),
        ] {
            let status = OrderStatus::try_from(code).expect("should decode");
            assert_eq!(status.name(), name);
            assert_eq!(u8::from(status), code);
        }
    }

    #[test]
    fn test_status_decode_unknown_rejected() {
        for code in [5u8, 42, 255] {
            assert!(matches!(
                OrderStatus::try_from(code),
                Err(SdkError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_end_time_is_start_plus_duration() {
        let raw = raw_order(1, 10);
        let now = raw.start_time + Duration::hours(2);
        let order = Order::from_raw_at(&raw, now).expect("should normalize");
        assert_eq!(order.end_time, raw.start_time + Duration::hours(10));
    }

    #[test]
    fn test_remaining_time_defined_iff_before_end() {
        let raw = raw_order(1, 10);

        let before_end = raw.start_time + Duration::hours(4);
        let order = Order::from_raw_at(&raw, before_end).expect("should normalize");
        assert_eq!(order.remaining_time, Some(Duration::hours(6)));
        assert_eq!(order.remaining_duration_hours, Some(6));

        let after_end = raw.start_time + Duration::hours(11);
        let order = Order::from_raw_at(&raw, after_end).expect("should normalize");
        assert!(order.remaining_time.is_none());
        assert!(order.remaining_duration_hours.is_none());
    }

    #[test]
    fn test_remaining_duration_at_least_one_hour() {
        let raw = raw_order(1, 10);
        let now = raw.start_time + Duration::hours(9) + Duration::minutes(40);
        let order = Order::from_raw_at(&raw, now).expect("should normalize");
        assert_eq!(order.remaining_duration_hours, Some(1));
    }

    #[test]
    fn test_failed_order_duration_zeroed() {
        let raw = raw_order(3, 10);
        let now = raw.start_time + Duration::hours(1);
        let order = Order::from_raw_at(&raw, now).expect("should normalize");
        assert_eq!(order.duration_hours, 0);
        assert!(order.remaining_time.is_none());
        // End time still reflects the purchased duration.
        assert_eq!(order.end_time, raw.start_time + Duration::hours(10));
    }

    #[test]
    fn test_non_available_has_no_remaining_time() {
        for status in [0u8, 2, 4] {
            let raw = raw_order(status, 10);
            let now = raw.start_time + Duration::hours(1);
            let order = Order::from_raw_at(&raw, now).expect("should normalize");
            assert!(order.remaining_time.is_none(), "status {}", status);
        }
    }

    #[test]
    fn test_price_converted_to_display_units() {
        let raw = raw_order(1, 10);
        let now = raw.start_time;
        let order = Order::from_raw_at(&raw, now).expect("should normalize");
        assert_eq!(order.price, Decimal::from(1));
        assert_eq!(order.total, Decimal::from(10));
    }

    #[test]
    fn test_refund_duration() {
        let mut raw = raw_order(4, 10);
        raw.order_time = Some(raw.start_time);
        // Refunded 3h30m in: 4 hours consumed after rounding up.
        raw.refund_time = Some(raw.start_time + Duration::minutes(210));
        let order =
            Order::from_raw_at(&raw, raw.start_time + Duration::hours(5)).expect("should normalize");
        assert_eq!(order.refund_duration_hours, Some(6));
    }

    #[test]
    fn test_out_of_range_duration_rejected() {
        // A corrupt or hostile record can carry any i64; normalization
        // must report it instead of aborting on date arithmetic.
        // 3e9 hours fits in a `Duration` but lands past chrono's last
        // representable date.
        for duration in [i64::MAX, i64::MIN, 3_000_000_000] {
            let raw = raw_order(1, duration);
            assert!(
                matches!(
                    Order::from_raw_at(&raw, raw.start_time),
                    Err(SdkError::Validation(_))
                ),
                "duration {}",
                duration
            );
        }
    }

    #[test]
    fn test_out_of_range_duration_rejected_from_wire() {
        let raw: RawOrder = serde_json::from_value(serde_json::json!({
            "Id": "order-1",
            "Price": 1_000_000_000u64,
            "Total": 10_000_000_000u64,
            "StartTime": "2024-05-01T12:00:00Z",
            "Duration": i64::MAX,
            "Status": 1,
        }))
        .expect("should deserialize");
        assert!(matches!(
            Order::from_raw_at(&raw, raw.start_time),
            Err(SdkError::Validation(_))
        ));
    }

    #[test]
    fn test_failed_order_refund_uses_zeroed_duration() {
        let mut raw = raw_order(3, 10);
        raw.order_time = Some(raw.start_time);
        raw.refund_time = Some(raw.start_time + Duration::hours(2));
        let order = Order::from_raw_at(&raw, raw.start_time + Duration::hours(3))
            .expect("should normalize");
        assert_eq!(order.duration_hours, 0);
        // Credited hours come from the zeroed displayed duration.
        assert_eq!(order.refund_duration_hours, Some(-2));
    }

    #[test]
    fn test_zero_refund_time_ignored() {
        let mut raw = raw_order(1, 10);
        raw.refund_time = Some(Utc.timestamp_opt(0, 0).unwrap());
        let order = Order::from_raw_at(&raw, raw.start_time).expect("should normalize");
        assert!(order.refund_duration_hours.is_none());
    }

    #[test]
    fn test_metadata_parsed() {
        let mut raw = raw_order(1, 10);
        raw.metadata = Some(
            r#"{"machinePublicKey":"abc","formData":{"taskName":"train"},"MachineInfo":{"GPU":"RTX 4090"}}"#
                .to_string(),
        );
        let order = Order::from_raw_at(&raw, raw.start_time).expect("should normalize");
        let metadata = order.metadata.expect("should have metadata");
        assert_eq!(metadata.machine_public_key.as_deref(), Some("abc"));
        assert_eq!(
            metadata
                .form_data
                .and_then(|f| f.task_name)
                .as_deref(),
            Some("train")
        );
        assert_eq!(
            metadata.machine_info.and_then(|m| m.gpu).as_deref(),
            Some("RTX 4090")
        );
    }

    #[test]
    fn test_bad_metadata_rejected() {
        let mut raw = raw_order(1, 10);
        raw.metadata = Some("not json".to_string());
        assert!(matches!(
            Order::from_raw_at(&raw, raw.start_time),
            Err(SdkError::Serialization(_))
        ));
    }

    #[test]
    fn test_summarize_earnings() {
        let mut preparing = raw_order(0, 1);
        preparing.total = 60;
        let mut available = raw_order(1, 1);
        available.total = 40;
        let mut completed = raw_order(2, 1);
        completed.total = 50;
        let mut refunded = raw_order(4, 1);
        refunded.total = 999;
        let mut unknown = raw_order(9, 1);
        unknown.total = 777;

        let earnings = summarize_earnings(&[preparing, available, completed, refunded, unknown]);
        assert_eq!(earnings.pending, 100);
        assert_eq!(earnings.received, 50);
    }

    #[test]
    fn test_status_filter_options_cover_all_statuses() {
        let options = status_filter_options();
        assert_eq!(options.len(), 6);
        assert_eq!(options[0].value, "all");
        for (option, code) in options.iter().skip(1).zip(0u8..) {
            let status: u8 = option
                .value
                .parse()
                .expect("filter value should be numeric");
            assert_eq!(status, code);
            assert_eq!(
                OrderStatus::try_from(code).expect("should decode").name(),
                option.label
            );
        }
    }
}
