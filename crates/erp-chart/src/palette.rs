use plotters::style::RGBColor;

/// Color, legend label and axis description for one plotted series.
#[derive(Debug, Clone, Copy)]
pub struct SeriesStyle {
    pub label: &'static str,
    pub axis_label: &'static str,
    pub color: RGBColor,
}

pub const COMPONENT_LENGTH: SeriesStyle = SeriesStyle {
    label: "Component Length",
    axis_label: "Component Length (meters)",
    color: RGBColor(31, 119, 180),
};

pub const COIL_WEIGHT: SeriesStyle = SeriesStyle {
    label: "Coil Weight",
    axis_label: "Coil Length",
    color: RGBColor(255, 127, 14),
};

pub const COMPONENT_WASTE: SeriesStyle = SeriesStyle {
    label: "Component Waste",
    axis_label: "Component Waste (meters)",
    color: RGBColor(44, 160, 44),
};

/// Line and marker color of the summary chart.
pub const SUMMARY_LINE: RGBColor = RGBColor(31, 119, 180);

/// Mesh line color.
pub const GRID: RGBColor = RGBColor(210, 210, 210);

pub const FONT_FAMILY: &str = "sans-serif";
