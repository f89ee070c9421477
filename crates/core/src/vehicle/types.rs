use serde::{Deserialize, Serialize};

/// Drivetrain category of a vehicle.
///
/// Decides which range lookups a resolve needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineType {
    /// Pure battery electric.
    #[serde(rename = "BEV")]
    BatteryElectric,
    /// Plug-in hybrid: both electric and fuel range.
    #[serde(rename = "PHEV")]
    PlugInHybrid,
    /// Combustion engine or any other non-electric drivetrain.
    #[serde(rename = "CEV")]
    CombustionOrOtherNonElectric,
}

impl EngineType {
    /// Whether this drivetrain reports an electric range.
    pub fn has_electric_range(&self) -> bool {
        matches!(self, Self::BatteryElectric | Self::PlugInHybrid)
    }

    /// Whether this drivetrain reports a fuel range.
    pub fn has_fuel_range(&self) -> bool {
        matches!(self, Self::CombustionOrOtherNonElectric | Self::PlugInHybrid)
    }
}

/// Range of a vehicle in kilometers.
///
/// `RangeInfo::default()` (both absent) is what a failed range lookup yields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeInfo {
    pub electric: Option<u32>,
    pub gasoline: Option<u32>,
}

impl RangeInfo {
    pub fn electric_only(electric: u32) -> Self {
        Self {
            electric: Some(electric),
            gasoline: None,
        }
    }

    pub fn fuel_only(gasoline: u32) -> Self {
        Self {
            electric: None,
            gasoline: Some(gasoline),
        }
    }

    pub fn hybrid(electric: u32, gasoline: u32) -> Self {
        Self {
            electric: Some(electric),
            gasoline: Some(gasoline),
        }
    }

    /// True when neither range is known.
    pub fn is_empty(&self) -> bool {
        self.electric.is_none() && self.gasoline.is_none()
    }
}

/// Model name and drivetrain, fetched before anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicData {
    pub model: String,
    pub engine: EngineType,
}

/// One labelled picture of a vehicle (e.g. "front", "left").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureView {
    pub view: String,
    pub url: String,
}

impl PictureView {
    pub fn new(view: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            url: url.into(),
        }
    }
}

/// The composed record for one vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub vin: String,
    pub model: String,
    pub engine: EngineType,
    /// Front view, silhouette, or empty when neither could be fetched.
    pub picture: String,
    pub range: RangeInfo,
}
