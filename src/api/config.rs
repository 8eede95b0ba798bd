use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::core::MAX_TICK_BINS;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    AxisTitleLocation, Color, FontWeight, LineStrokeStyle, MarkerShape, TitleRotation,
};

/// Order in which the row-shading pass walks the y ticks.
///
/// Tick 0 is the bottom row, so `TopDown` follows reading order and a group
/// header always precedes its own members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingOrder {
    /// From the top tick down to tick 0.
    #[default]
    TopDown,
    /// From tick 0 upward.
    BottomUp,
}

/// What happens to override keys that name no known option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownOptionPolicy {
    /// Drop the key and log a warning.
    #[default]
    Ignore,
    /// Fail with `ChartError::UnknownOption`.
    Reject,
}

/// Style overrides of one forest plot.
///
/// Every field has a documented default; JSON documents may override any
/// subset of them (see `from_json_str`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestPlotConfig {
    pub ci_line_width: f64,
    pub ci_line_color: Color,
    pub marker_shape: MarkerShape,
    /// Marker area in square points.
    pub marker_size: f64,
    pub marker_color: Color,
    pub reference_line_x: f64,
    pub reference_line_style: LineStrokeStyle,
    pub reference_line_color: Color,
    pub reference_line_width: f64,
    pub font_family: String,
    pub tick_label_size: f64,
    pub annotation_font_size: f64,
    /// Header of the right-hand p-value column; `None` draws no header.
    pub pvalue_title: Option<String>,
    pub pvalue_title_weight: FontWeight,
    pub pvalue_title_size: f64,
    pub group_label_weight: FontWeight,
    pub group_label_size: f64,
    pub table_header_weight: FontWeight,
    pub table_header_size: f64,
    pub ylabel_size: f64,
    pub ylabel_weight: FontWeight,
    pub ylabel_location: AxisTitleLocation,
    pub ylabel_rotation: TitleRotation,
    pub xlabel_size: f64,
    pub xlabel_weight: FontWeight,
    pub xtick_count: usize,
    pub xtick_size: f64,
    pub row_color: Color,
    pub row_alpha: f64,
    /// Right-side placements sit at `x_upper * (1 + annotation_rel_pad)`.
    pub annotation_rel_pad: f64,
    pub shading_order: ShadingOrder,
}

impl Default for ForestPlotConfig {
    fn default() -> Self {
        Self {
            ci_line_width: 0.5,
            ci_line_color: Color::BLACK,
            marker_shape: MarkerShape::Square,
            marker_size: 20.0,
            marker_color: Color::NAVY,
            reference_line_x: 0.0,
            reference_line_style: LineStrokeStyle::Solid,
            reference_line_color: Color::BLACK,
            reference_line_width: 0.8,
            font_family: "monospace".to_owned(),
            tick_label_size: 10.0,
            annotation_font_size: 10.0,
            pvalue_title: Some("P-value".to_owned()),
            pvalue_title_weight: FontWeight::Bold,
            pvalue_title_size: 10.0,
            group_label_weight: FontWeight::Bold,
            group_label_size: 10.0,
            table_header_weight: FontWeight::Bold,
            table_header_size: 10.0,
            ylabel_size: 12.0,
            ylabel_weight: FontWeight::Bold,
            ylabel_location: AxisTitleLocation::Top,
            ylabel_rotation: TitleRotation::Horizontal,
            xlabel_size: 10.0,
            xlabel_weight: FontWeight::Bold,
            xtick_count: 5,
            xtick_size: 9.0,
            row_color: Color::BLACK,
            row_alpha: 0.08,
            annotation_rel_pad: 0.05,
            shading_order: ShadingOrder::TopDown,
        }
    }
}

impl ForestPlotConfig {
    /// Loads overrides from a JSON object on top of the defaults.
    pub fn from_json_str(input: &str, policy: UnknownOptionPolicy) -> ChartResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| ChartError::Config(format!("failed to parse config json: {e}")))?;
        let Value::Object(overrides) = value else {
            return Err(ChartError::Config(
                "config json must be an object".to_owned(),
            ));
        };
        Self::from_overrides(overrides, policy)
    }

    /// Applies named overrides, resolving unknown keys per `policy`.
    pub fn from_overrides(
        mut overrides: Map<String, Value>,
        policy: UnknownOptionPolicy,
    ) -> ChartResult<Self> {
        let known = Self::known_options()?;
        let unknown: Vec<String> = overrides
            .keys()
            .filter(|key| !known.contains(key))
            .cloned()
            .collect();
        for key in unknown {
            match policy {
                UnknownOptionPolicy::Reject => return Err(ChartError::UnknownOption(key)),
                UnknownOptionPolicy::Ignore => {
                    warn!(option = %key, "ignoring unknown forest plot option");
                    overrides.remove(&key);
                }
            }
        }

        let config: Self = serde_json::from_value(Value::Object(overrides))
            .map_err(|e| ChartError::Config(format!("invalid option value: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Names of every recognized option.
    pub fn known_options() -> ChartResult<Vec<String>> {
        match serde_json::to_value(Self::default()) {
            Ok(Value::Object(defaults)) => Ok(defaults.keys().cloned().collect()),
            Ok(_) => Err(ChartError::Config(
                "default config did not serialize to an object".to_owned(),
            )),
            Err(e) => Err(ChartError::Config(format!(
                "failed to serialize default config: {e}"
            ))),
        }
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Config(format!("failed to serialize config: {e}")))
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("ci_line_width", self.ci_line_width),
            ("marker_size", self.marker_size),
            ("reference_line_width", self.reference_line_width),
            ("tick_label_size", self.tick_label_size),
            ("annotation_font_size", self.annotation_font_size),
            ("pvalue_title_size", self.pvalue_title_size),
            ("group_label_size", self.group_label_size),
            ("table_header_size", self.table_header_size),
            ("ylabel_size", self.ylabel_size),
            ("xlabel_size", self.xlabel_size),
            ("xtick_size", self.xtick_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::Config(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        if !self.reference_line_x.is_finite() {
            return Err(ChartError::Config(
                "`reference_line_x` must be finite".to_owned(),
            ));
        }
        if !self.row_alpha.is_finite() || !(0.0..=1.0).contains(&self.row_alpha) {
            return Err(ChartError::Config(
                "`row_alpha` must be finite and in [0, 1]".to_owned(),
            ));
        }
        if !self.annotation_rel_pad.is_finite() || self.annotation_rel_pad < 0.0 {
            return Err(ChartError::Config(
                "`annotation_rel_pad` must be finite and >= 0".to_owned(),
            ));
        }
        if !(1..=MAX_TICK_BINS).contains(&self.xtick_count) {
            return Err(ChartError::Config(format!(
                "`xtick_count` must be in [1, {MAX_TICK_BINS}]"
            )));
        }
        if self.font_family.trim().is_empty() {
            return Err(ChartError::Config(
                "`font_family` must not be empty".to_owned(),
            ));
        }
        for color in [
            self.ci_line_color,
            self.marker_color,
            self.reference_line_color,
            self.row_color,
        ] {
            color
                .validate()
                .map_err(|e| ChartError::Config(e.to_string()))?;
        }
        Ok(())
    }

    /// Fill used for shaded rows.
    #[must_use]
    pub fn row_fill(&self) -> Color {
        self.row_color.with_alpha(self.row_alpha)
    }
}

/// Per-plot switches, separate from style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestPlotOptions {
    /// Left-align primary labels against a common edge set by the widest one.
    pub flush: bool,
    pub despine: bool,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    /// Verbatim x tick labels; `None` uses the automatic locator.
    pub xticks: Option<Vec<String>>,
}

impl Default for ForestPlotOptions {
    fn default() -> Self {
        Self {
            flush: true,
            despine: true,
            xlabel: None,
            ylabel: None,
            xticks: None,
        }
    }
}

impl ForestPlotOptions {
    #[must_use]
    pub fn with_flush(mut self, flush: bool) -> Self {
        self.flush = flush;
        self
    }

    #[must_use]
    pub fn with_despine(mut self, despine: bool) -> Self {
        self.despine = despine;
        self
    }

    #[must_use]
    pub fn with_xlabel(mut self, xlabel: impl Into<String>) -> Self {
        self.xlabel = Some(xlabel.into());
        self
    }

    #[must_use]
    pub fn with_ylabel(mut self, ylabel: impl Into<String>) -> Self {
        self.ylabel = Some(ylabel.into());
        self
    }

    #[must_use]
    pub fn with_xticks<I, S>(mut self, xticks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.xticks = Some(xticks.into_iter().map(Into::into).collect());
        self
    }
}
