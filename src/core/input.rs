use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One input variable, in reading order (the first record is drawn on top).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForestRecord {
    pub label: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub estimate: Option<f64>,
    /// Half-width of the confidence interval around `estimate`.
    #[serde(default, alias = "moerror")]
    pub margin_of_error: Option<f64>,
    #[serde(default, alias = "ll")]
    pub lower_limit: Option<f64>,
    #[serde(default, alias = "hl")]
    pub upper_limit: Option<f64>,
    /// Already formatted p-value text.
    #[serde(default, alias = "pvalue")]
    pub formatted_pvalue: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Option<String>>,
    #[serde(default)]
    pub right_annotations: Vec<Option<String>>,
}

impl ForestRecord {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_estimate(mut self, estimate: f64) -> Self {
        self.estimate = Some(estimate);
        self
    }

    #[must_use]
    pub fn with_margin_of_error(mut self, margin_of_error: f64) -> Self {
        self.margin_of_error = Some(margin_of_error);
        self
    }

    #[must_use]
    pub fn with_limits(mut self, lower_limit: f64, upper_limit: f64) -> Self {
        self.lower_limit = Some(lower_limit);
        self.upper_limit = Some(upper_limit);
        self
    }

    #[must_use]
    pub fn with_pvalue(mut self, formatted_pvalue: impl Into<String>) -> Self {
        self.formatted_pvalue = Some(formatted_pvalue.into());
        self
    }

    #[must_use]
    pub fn with_annotations<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.annotations = cells.into_iter().map(|cell| cell.map(Into::into)).collect();
        self
    }

    #[must_use]
    pub fn with_right_annotations<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.right_annotations = cells.into_iter().map(|cell| cell.map(Into::into)).collect();
        self
    }
}

/// Row-oriented forest plot input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForestTable {
    pub records: Vec<ForestRecord>,
    /// Title of the primary label column, shown in the table header row.
    #[serde(default)]
    pub variable_header: Option<String>,
    #[serde(default, alias = "annote_headers")]
    pub annotation_headers: Option<Vec<String>>,
    #[serde(default, alias = "right_annote_headers")]
    pub right_annotation_headers: Option<Vec<String>>,
}

impl ForestTable {
    #[must_use]
    pub fn new(records: Vec<ForestRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse forest table: {e}")))
    }

    #[must_use]
    pub fn with_variable_header(mut self, header: impl Into<String>) -> Self {
        self.variable_header = Some(header.into());
        self
    }

    #[must_use]
    pub fn with_annotation_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.annotation_headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_right_annotation_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.right_annotation_headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn has_group_column(&self) -> bool {
        self.records.iter().any(|record| record.group.is_some())
    }

    #[must_use]
    pub fn has_pvalue_column(&self) -> bool {
        self.records
            .iter()
            .any(|record| record.formatted_pvalue.is_some())
    }

    /// Number of left annotation columns, counting header-only columns.
    #[must_use]
    pub fn annotation_column_count(&self) -> usize {
        let cells = self
            .records
            .iter()
            .map(|record| record.annotations.len())
            .max()
            .unwrap_or(0);
        cells.max(self.annotation_headers.as_ref().map_or(0, Vec::len))
    }

    #[must_use]
    pub fn right_annotation_column_count(&self) -> usize {
        let cells = self
            .records
            .iter()
            .map(|record| record.right_annotations.len())
            .max()
            .unwrap_or(0);
        cells.max(self.right_annotation_headers.as_ref().map_or(0, Vec::len))
    }
}
