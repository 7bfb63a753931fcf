//! Chart colours

/// Accent for the highlighted country (gold)
pub const HIGHLIGHT: &str = "#FFD700";
/// Aggregate reference line
pub const AGGREGATE: &str = "#0033A0";
/// 2022 markers (light steel blue)
pub const BASELINE: &str = "#B0C4DE";
/// 2024 markers (steel blue)
pub const LATEST: &str = "#4682B4";
/// Internet access markers
pub const INTERNET: &str = "#CD29AF";
/// Dumbbell connectors (light grey)
pub const CONNECTOR: &str = "#D3D3D3";
/// Non-negative change annotation (forest green)
pub const GAIN: &str = "#228B22";
/// Negative change annotation (crimson)
pub const LOSS: &str = "#DC143C";

pub const MARKER_OUTLINE: &str = "white";
pub const MAP_BORDER: &str = "darkgray";
pub const MAP_LAND: &str = "rgb(243, 243, 243)";
pub const MAP_COUNTRY_LINE: &str = "rgb(204, 204, 204)";
pub const GRID: &str = "#EBF0F8";
pub const BACKGROUND: &str = "white";
