//! Per-chart configuration objects.
//!
//! Each builder produces the `{ type, data, options }` object handed to the
//! charting library's constructor. Colours come from the palette; sample
//! data is fixed except for the scatter chart, which is re-randomised on
//! every build.

use rand::Rng;
use serde::Serialize;
use serde_json::{json, Value};
use theme_palettes::Palette;

use super::{ChartKind, ChartType};

const MONTHS: [&str; 7] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"];
const QUARTERS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];

/// Number of random points in the scatter chart.
pub const SCATTER_POINTS: usize = 40;

/// Configuration for one chart instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: Value,
    pub options: Value,
}

/// How Y axes are laid out on an XY chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AxisPolicy {
    /// One linear Y axis shared by every dataset
    #[default]
    Shared,
    /// `y1` on the left and `y2` on the right, one per dataset. The right
    /// axis draws no gridlines over the chart area.
    DualIndependent,
}

/// How multiple bar datasets share a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stacking {
    /// Side by side
    #[default]
    Grouped,
    /// Accumulated on top of each other
    Stacked,
}

/// Build the configuration for `kind` under `palette`.
pub fn build_chart<R: Rng>(kind: ChartKind, palette: &Palette, rng: &mut R) -> ChartConfig {
    let c = palette;
    let (data, options) = match kind {
        ChartKind::Line => (
            json!({
                "labels": MONTHS,
                "datasets": [{
                    "label": "Revenue ($k)",
                    "data": [12, 19, 14, 22, 28, 24, 31],
                    "borderColor": c.primary,
                    "backgroundColor": c.primary_fill,
                    "pointBackgroundColor": c.primary,
                    "pointBorderColor": c.surface,
                    "pointRadius": 5,
                    "tension": 0.35,
                    "fill": true,
                    "borderWidth": 2
                }]
            }),
            base_options(c),
        ),
        ChartKind::Bar => (
            json!({
                "labels": MONTHS,
                "datasets": [{
                    "label": "Orders",
                    "data": [120, 180, 160, 210, 240, 200, 260],
                    "backgroundColor": c.primary_fill,
                    "borderColor": c.primary,
                    "borderWidth": 2,
                    "borderRadius": 6
                }]
            }),
            base_options(c),
        ),
        ChartKind::Doughnut => {
            let mut options = base_options(c);
            options["cutout"] = json!("60%");
            (
                json!({
                    "labels": ["A", "B", "C", "D", "E", "F"],
                    "datasets": [{
                        "data": [28, 22, 18, 14, 10, 8],
                        "backgroundColor": &c.series()[..6],
                        "borderColor": c.surface,
                        "borderWidth": 2
                    }]
                }),
                options,
            )
        }
        ChartKind::Radar => (
            json!({
                "labels": ["Quality", "Performance", "Reliability", "Security", "Support"],
                "datasets": [{
                    "label": "Performance",
                    "data": [85, 75, 90, 80, 85],
                    "borderColor": c.primary,
                    "backgroundColor": c.primary_fill,
                    "pointBackgroundColor": c.primary,
                    "pointBorderColor": c.surface,
                    "pointRadius": 4
                }]
            }),
            radial_options(c, Some(100), true),
        ),
        ChartKind::Area => (
            json!({
                "labels": MONTHS,
                "datasets": [{
                    "label": "Growth",
                    "data": [50, 65, 78, 92, 110, 135, 155],
                    "borderColor": c.secondary,
                    "backgroundColor": "rgba(156, 163, 175, 0.3)",
                    "pointBackgroundColor": c.secondary,
                    "pointBorderColor": c.surface,
                    "pointRadius": 4,
                    "tension": 0.4,
                    "fill": true,
                    "borderWidth": 2
                }]
            }),
            base_options(c),
        ),
        ChartKind::Mixed => (
            json!({
                "labels": MONTHS,
                "datasets": [
                    {
                        "type": "bar",
                        "label": "Actual Sales",
                        "data": [100, 140, 120, 180, 200, 170, 210],
                        "backgroundColor": c.primary_fill,
                        "borderColor": c.primary,
                        "borderWidth": 2,
                        "borderRadius": 4
                    },
                    {
                        "type": "line",
                        "label": "Target",
                        "data": [150, 150, 150, 200, 200, 200, 250],
                        "borderColor": c.accent,
                        "backgroundColor": "transparent",
                        "borderWidth": 2,
                        "pointBackgroundColor": c.accent,
                        "tension": 0.4
                    }
                ]
            }),
            base_options(c),
        ),
        ChartKind::HorizontalBar => {
            let mut options = base_options(c);
            options["indexAxis"] = json!("y");
            (
                json!({
                    "labels": ["Laptop", "Phone", "Tablet", "Keyboard", "Monitor"],
                    "datasets": [{
                        "label": "Sales",
                        "data": [450, 380, 320, 250, 180],
                        "backgroundColor": [c.primary, c.secondary, c.accent, c.info, c.success],
                        "borderColor": c.grid,
                        "borderWidth": 1,
                        "borderRadius": 4
                    }]
                }),
                options,
            )
        }
        ChartKind::Polar => (
            json!({
                "labels": ["Quality", "Performance", "Reliability", "Security", "Support"],
                "datasets": [{
                    "data": [85, 75, 90, 80, 85],
                    "backgroundColor": &c.series()[..5],
                    "borderColor": c.grid,
                    "borderWidth": 1
                }]
            }),
            radial_options(c, None, true),
        ),
        ChartKind::Pie => (
            json!({
                "labels": ["A", "B", "C", "D", "E"],
                "datasets": [{
                    "data": [30, 22, 18, 16, 14],
                    "backgroundColor": [c.primary, c.secondary, c.accent, c.success, c.warning],
                    "borderColor": c.surface,
                    "borderWidth": 2
                }]
            }),
            base_options(c),
        ),
        ChartKind::StackedBar => {
            let mut options = base_options(c);
            options["scales"] = xy_scales(c, AxisPolicy::Shared, Stacking::Stacked);
            (
                json!({
                    "labels": MONTHS,
                    "datasets": [
                        bar_dataset("Web", &[12, 14, 16, 13, 18, 20, 22], &c.primary_fill, &c.primary),
                        bar_dataset("Retail", &[8, 9, 11, 10, 12, 14, 15], "rgba(34,197,94,.25)", &c.success),
                        bar_dataset("Partners", &[4, 5, 6, 6, 7, 7, 8], "rgba(245,158,11,.25)", &c.warning)
                    ]
                }),
                options,
            )
        }
        ChartKind::GroupedBar => (
            json!({
                "labels": QUARTERS,
                "datasets": [
                    bar_dataset("EMEA", &[120, 150, 170, 190], &c.primary_fill, &c.primary),
                    bar_dataset("AMER", &[130, 140, 160, 200], "rgba(163,190,140,.25)", "#84cc16"),
                    bar_dataset("APAC", &[90, 110, 130, 160], "rgba(251,146,60,.25)", &c.accent)
                ]
            }),
            base_options(c),
        ),
        ChartKind::MultiAxisLine => {
            let mut options = base_options(c);
            options["scales"] = xy_scales(c, AxisPolicy::DualIndependent, Stacking::Grouped);
            (
                json!({
                    "labels": MONTHS,
                    "datasets": [
                        {
                            "label": "Revenue ($k)",
                            "data": [12, 15, 18, 22, 26, 31, 35],
                            "yAxisID": "y1",
                            "borderColor": c.primary,
                            "backgroundColor": c.primary_fill,
                            "tension": 0.35,
                            "fill": true,
                            "borderWidth": 2
                        },
                        {
                            "label": "Conversion (%)",
                            "data": [2.1, 2.3, 2.6, 2.8, 3.0, 3.2, 3.4],
                            "yAxisID": "y2",
                            "borderColor": c.accent,
                            "backgroundColor": "transparent",
                            "tension": 0.35,
                            "pointBackgroundColor": c.accent
                        }
                    ]
                }),
                options,
            )
        }
        ChartKind::Scatter => {
            let points: Vec<Value> = (0..SCATTER_POINTS)
                .map(|_| {
                    json!({
                        "x": rng.gen_range(10.0..100.0),
                        "y": rng.gen_range(1.0..5.0)
                    })
                })
                .collect();
            let mut options = base_options(c);
            options["scales"] = json!({
                "x": {
                    "title": { "display": true, "text": "Price (£)" },
                    "ticks": { "color": c.fg },
                    "grid": { "color": c.grid }
                },
                "y": {
                    "title": { "display": true, "text": "Rating" },
                    "ticks": { "color": c.fg },
                    "grid": { "color": c.grid }
                }
            });
            (
                json!({
                    "datasets": [{
                        "label": "Products",
                        "data": points,
                        "backgroundColor": c.primary
                    }]
                }),
                options,
            )
        }
        ChartKind::Bubble => {
            let mut options = base_options(c);
            options["scales"] = json!({
                "x": { "ticks": { "color": c.fg }, "grid": { "color": c.grid } },
                "y": { "ticks": { "color": c.fg }, "grid": { "color": c.grid }, "beginAtZero": true }
            });
            (
                json!({
                    "datasets": [{
                        "label": "Segments",
                        "data": [
                            { "x": 10, "y": 20, "r": 6 },
                            { "x": 15, "y": 10, "r": 8 },
                            { "x": 25, "y": 30, "r": 12 },
                            { "x": 32, "y": 22, "r": 10 },
                            { "x": 40, "y": 18, "r": 14 }
                        ],
                        "backgroundColor": c.secondary
                    }]
                }),
                options,
            )
        }
        ChartKind::RadarCompare => (
            json!({
                "labels": ["Quality", "Speed", "Reliability", "Security", "Support"],
                "datasets": [
                    {
                        "label": "Team A",
                        "data": [80, 75, 85, 70, 90],
                        "borderColor": c.primary,
                        "backgroundColor": c.primary_fill,
                        "pointBackgroundColor": c.primary
                    },
                    {
                        "label": "Team B",
                        "data": [70, 82, 78, 80, 75],
                        "borderColor": c.accent,
                        "backgroundColor": "rgba(251,146,60,.25)",
                        "pointBackgroundColor": c.accent
                    }
                ]
            }),
            radial_options(c, Some(100), false),
        ),
        ChartKind::PolarMini => (
            json!({
                "labels": ["Email", "Paid", "Social", "Organic", "Referrals"],
                "datasets": [{
                    "data": [22, 18, 15, 30, 15],
                    "backgroundColor": [c.primary, c.secondary, c.accent, c.success, c.warning],
                    "borderColor": c.grid
                }]
            }),
            json!({
                "responsive": true,
                "maintainAspectRatio": false,
                "scales": {
                    "r": { "ticks": { "color": c.fg }, "grid": { "color": c.grid } }
                }
            }),
        ),
    };

    ChartConfig {
        chart_type: kind.chart_type(),
        data,
        options,
    }
}

/// Options shared by every XY chart: shared Y axis, themed ticks, grid,
/// legend and tooltip.
pub fn base_options(c: &Palette) -> Value {
    json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "scales": xy_scales(c, AxisPolicy::Shared, Stacking::Grouped),
        "plugins": {
            "legend": { "labels": { "color": c.fg } },
            "tooltip": tooltip(c)
        }
    })
}

/// Scale configuration for an XY chart.
pub fn xy_scales(c: &Palette, axes: AxisPolicy, stacking: Stacking) -> Value {
    let stacked = stacking == Stacking::Stacked;
    let mut x = json!({
        "ticks": { "color": c.fg },
        "grid": { "color": c.grid, "drawBorder": false }
    });
    if stacked {
        x["stacked"] = json!(true);
    }

    match axes {
        AxisPolicy::Shared => {
            let mut y = json!({
                "ticks": { "color": c.fg },
                "grid": { "color": c.grid }
            });
            if stacked {
                y["stacked"] = json!(true);
            } else {
                y["beginAtZero"] = json!(true);
            }
            json!({ "x": x, "y": y })
        }
        AxisPolicy::DualIndependent => json!({
            "x": x,
            "y1": {
                "type": "linear",
                "position": "left",
                "stacked": stacked,
                "ticks": { "color": c.fg },
                "grid": { "color": c.grid }
            },
            "y2": {
                "type": "linear",
                "position": "right",
                "stacked": stacked,
                "ticks": { "color": c.fg },
                "grid": { "drawOnChartArea": false }
            }
        }),
    }
}

fn radial_options(c: &Palette, max: Option<u32>, with_tooltip: bool) -> Value {
    let mut r = json!({
        "ticks": { "color": c.fg },
        "grid": { "color": c.grid },
        "beginAtZero": true
    });
    if let Some(max) = max {
        r["max"] = json!(max);
    }

    let mut plugins = json!({ "legend": { "labels": { "color": c.fg } } });
    if with_tooltip {
        plugins["tooltip"] = tooltip(c);
    }

    json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "scales": { "r": r },
        "plugins": plugins
    })
}

fn tooltip(c: &Palette) -> Value {
    json!({
        "backgroundColor": c.bg,
        "titleColor": c.fg,
        "bodyColor": c.fg,
        "borderColor": c.grid,
        "borderWidth": 1
    })
}

fn bar_dataset(label: &str, data: &[u32], fill: &str, border: &str) -> Value {
    json!({
        "label": label,
        "data": data,
        "backgroundColor": fill,
        "borderColor": border,
        "borderWidth": 2,
        "borderRadius": 4
    })
}
