use crate::models::detect_types::DetectionResponse;
use crate::models::view_types::{
    ChartData, ChartDataset, ChartLegend, ChartOptions, ChartPlugins, ChartSpec, MediaKind,
    PreviewMedia, ResultView, StatusTone, StatusView, ViewState,
};
use crate::services::view::View;
use reqwest::Url;

pub const AI_LABEL: &str = "AI Generated";
pub const ORGANIC_LABEL: &str = "Organic";
pub const ORGANIC_COLOR: &str = "#89ec91";
pub const PREVIEW_ALT: &str = "Analyzed Media";

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "webm"];

/// Turns a detection response into the result section.
#[derive(Debug, Clone)]
pub struct ResultRenderer {
    uploads_url: Url,
}

impl ResultRenderer {
    pub fn new(uploads_url: Url) -> Self {
        Self { uploads_url }
    }

    pub fn build(&self, response: &DetectionResponse) -> ResultView {
        let result = &response.result;
        let tone = StatusTone::from_is_fake(result.is_fake);

        ResultView {
            status: StatusView {
                label: result.label.clone(),
                tone,
                class_name: tone.class_name().to_string(),
            },
            center_percent: format_percent(Some(result.ai_probability)),
            ai_value: format_percent(Some(result.ai_probability)),
            organic_value: format_percent(result.organic_probability),
            chart: probability_chart(
                result.ai_probability,
                result.organic_probability.unwrap_or(0.0),
                tone,
            ),
            preview: response
                .filename
                .as_deref()
                .and_then(|name| self.preview(name)),
        }
    }

    pub fn render<V: View + ?Sized>(&self, view: &V, response: &DetectionResponse) -> ResultView {
        let result_view = self.build(response);
        view.show_section(ViewState::Result);
        view.show_result(&result_view);
        result_view
    }

    fn preview(&self, filename: &str) -> Option<PreviewMedia> {
        let url = match preview_url(&self.uploads_url, filename) {
            Some(url) => url,
            None => {
                tracing::warn!("cannot build preview URL for {:?}", filename);
                return None;
            }
        };
        Some(PreviewMedia {
            kind: media_kind(filename),
            url: url.to_string(),
            alt: PREVIEW_ALT.to_string(),
        })
    }
}

/// Appends `filename` as one percent-encoded path segment.
pub fn preview_url(uploads_url: &Url, filename: &str) -> Option<Url> {
    let mut url = uploads_url.clone();
    url.path_segments_mut().ok()?.pop_if_empty().push(filename);
    Some(url)
}

pub fn media_kind(filename: &str) -> MediaKind {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Video
    } else {
        MediaKind::Image
    }
}

pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}%", v),
        _ => "--%".to_string(),
    }
}

pub fn probability_chart(ai: f64, organic: f64, tone: StatusTone) -> ChartSpec {
    let ai = chart_value(ai);
    let organic = chart_value(organic);
    if (ai + organic - 100.0).abs() > 0.5 {
        tracing::warn!(
            "probabilities do not add up to 100 (ai={}, organic={})",
            ai,
            organic
        );
    }

    ChartSpec {
        kind: "doughnut".to_string(),
        data: ChartData {
            labels: vec![AI_LABEL.to_string(), ORGANIC_LABEL.to_string()],
            datasets: vec![ChartDataset {
                data: vec![ai, organic],
                background_color: vec![tone.accent().to_string(), ORGANIC_COLOR.to_string()],
                border_width: 0,
            }],
        },
        options: ChartOptions {
            cutout: "80%".to_string(),
            responsive: true,
            plugins: ChartPlugins {
                legend: ChartLegend { display: false },
            },
        },
    }
}

// Chart.js cannot draw negative or NaN slices.
fn chart_value(v: f64) -> f64 {
    if v.is_finite() && v >= 0.0 {
        v
    } else {
        tracing::warn!("dropping invalid chart value {}", v);
        0.0
    }
}
