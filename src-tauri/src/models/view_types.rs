use serde::Serialize;

/// The three mutually exclusive page sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    Upload,
    Loading,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Danger,
    Success,
}

impl StatusTone {
    pub fn from_is_fake(is_fake: bool) -> Self {
        if is_fake {
            StatusTone::Danger
        } else {
            StatusTone::Success
        }
    }

    /// Class list applied to the status box.
    pub fn class_name(self) -> &'static str {
        match self {
            StatusTone::Danger => "status-box danger",
            StatusTone::Success => "status-box success",
        }
    }

    /// Colour of the AI slice of the chart.
    pub fn accent(self) -> &'static str {
        match self {
            StatusTone::Danger => "#ff4d4d",
            StatusTone::Success => "#4A90E2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressUpdate {
    pub percent: u8,
    /// `None` leaves the caption as it is.
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusView {
    pub label: String,
    pub tone: StatusTone,
    pub class_name: String,
}

/// Chart.js configuration for the probability doughnut. Serialises to the
/// object literal Chart.js expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub cutout: String,
    pub responsive: bool,
    pub plugins: ChartPlugins,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPlugins {
    pub legend: ChartLegend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLegend {
    pub display: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewMedia {
    pub kind: MediaKind,
    pub url: String,
    pub alt: String,
}

/// Everything the result section displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub status: StatusView,
    pub center_percent: String,
    pub ai_value: String,
    pub organic_value: String,
    pub chart: ChartSpec,
    pub preview: Option<PreviewMedia>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub state: ViewState,
    pub file_name: Option<String>,
    pub progress: u8,
}
