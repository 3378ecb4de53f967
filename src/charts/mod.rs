//! Chart catalogue, configuration builders and the rebuild registry.
//!
//! Every supported chart is bound to a fixed canvas id. A page renders any
//! subset of them; charts whose canvas is absent are skipped.

use serde::Serialize;

pub mod backend;
pub mod config;
pub mod rebuilder;
#[cfg(test)]
mod recording;

pub use backend::{ChartBackend, ChartDefaults, ChartError, ChartHandle};
pub use config::{build_chart, AxisPolicy, ChartConfig, Stacking};
pub use rebuilder::{ChartRebuilder, ChartRegistry, RebuildSummary};
#[cfg(test)]
pub(crate) use recording::RecordingBackend;

/// Chart type tag understood by the charting library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    Line,
    Bar,
    Pie,
    Doughnut,
    Radar,
    PolarArea,
    Scatter,
    Bubble,
}

/// Every chart the dashboard knows how to draw, in rebuild order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
    Radar,
    Area,
    Mixed,
    HorizontalBar,
    Polar,
    Pie,
    StackedBar,
    GroupedBar,
    MultiAxisLine,
    Scatter,
    Bubble,
    RadarCompare,
    PolarMini,
}

impl ChartKind {
    pub const ALL: [ChartKind; 16] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Doughnut,
        ChartKind::Radar,
        ChartKind::Area,
        ChartKind::Mixed,
        ChartKind::HorizontalBar,
        ChartKind::Polar,
        ChartKind::Pie,
        ChartKind::StackedBar,
        ChartKind::GroupedBar,
        ChartKind::MultiAxisLine,
        ChartKind::Scatter,
        ChartKind::Bubble,
        ChartKind::RadarCompare,
        ChartKind::PolarMini,
    ];

    pub fn canvas_id(self) -> &'static str {
        match self {
            Self::Line => "lineChart",
            Self::Bar => "barChart",
            Self::Doughnut => "doughnutChart",
            Self::Radar => "radarChart",
            Self::Area => "areaChart",
            Self::Mixed => "mixedChart",
            Self::HorizontalBar => "horizontalBarChart",
            Self::Polar => "polarChart",
            Self::Pie => "pieChart",
            Self::StackedBar => "stackedBarChart",
            Self::GroupedBar => "groupedBarChart",
            Self::MultiAxisLine => "multiAxisLineChart",
            Self::Scatter => "scatterChart",
            Self::Bubble => "bubbleChart",
            Self::RadarCompare => "radarCompareChart",
            Self::PolarMini => "polarMiniChart",
        }
    }

    pub fn chart_type(self) -> ChartType {
        match self {
            Self::Line | Self::Area | Self::MultiAxisLine => ChartType::Line,
            Self::Bar | Self::Mixed | Self::HorizontalBar | Self::StackedBar | Self::GroupedBar => {
                ChartType::Bar
            }
            Self::Doughnut => ChartType::Doughnut,
            Self::Radar | Self::RadarCompare => ChartType::Radar,
            Self::Polar | Self::PolarMini => ChartType::PolarArea,
            Self::Pie => ChartType::Pie,
            Self::Scatter => ChartType::Scatter,
            Self::Bubble => ChartType::Bubble,
        }
    }

    /// Card heading on the dashboard page.
    pub fn title(self) -> &'static str {
        match self {
            Self::Line => "Revenue",
            Self::Bar => "Orders",
            Self::Doughnut => "Segments",
            Self::Radar => "Performance",
            Self::Area => "Growth",
            Self::Mixed => "Sales vs Target",
            Self::HorizontalBar => "Top Products",
            Self::Polar => "Quality Profile",
            Self::Pie => "Category Share",
            Self::StackedBar => "Channel Mix",
            Self::GroupedBar => "Regional Sales",
            Self::MultiAxisLine => "Revenue & Conversion",
            Self::Scatter => "Price vs Rating",
            Self::Bubble => "Market Segments",
            Self::RadarCompare => "Team Comparison",
            Self::PolarMini => "Traffic Sources",
        }
    }
}
