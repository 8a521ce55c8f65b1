//! Machine (rental device) types.
//!
//! Machines are not independently modeled by the order API; their details
//! arrive embedded in order metadata written at purchase time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Device details embedded in order metadata.
///
/// The backend has emitted both `machineInfo` and `MachineInfo` casings over
/// time, so the fields carry aliases for each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct MachineInfo {
    /// Machine UUID as 32 hex digits.
    #[serde(rename = "UUID", alias = "Uuid", default)]
    pub uuid: Option<String>,

    /// Provider wallet address (base58).
    #[serde(default)]
    pub provider: Option<String>,

    /// Public IP of the device.
    #[serde(rename = "IP", alias = "Ip", default)]
    pub ip: Option<String>,

    /// Console port of the device.
    #[serde(default)]
    pub port: Option<u16>,

    /// GPU model string.
    #[serde(rename = "GPU", alias = "Gpu", default)]
    pub gpu: Option<String>,

    /// CPU model string.
    #[serde(rename = "CPU", alias = "Cpu", default)]
    pub cpu: Option<String>,

    /// RAM description.
    #[serde(rename = "RAM", alias = "Ram", default)]
    pub ram: Option<String>,

    /// Disk size in GB.
    #[serde(default)]
    pub disk: Option<u64>,

    /// Hourly price in display units.
    #[serde(default)]
    pub price: Option<Decimal>,

    /// Maximum rentable duration in hours.
    #[serde(default)]
    pub max_duration: Option<u64>,
}
