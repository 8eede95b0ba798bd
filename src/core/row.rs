use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::group_set::GroupSet;
use crate::core::input::{ForestRecord, ForestTable};
use crate::core::types::AxisLimits;
use crate::error::{ChartError, ChartResult};

const COLUMN_SEPARATOR: &str = "  ";

/// Role of a row, resolved once when the model is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowRole {
    Data,
    GroupHeader,
    TableHeader,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub low: f64,
    pub high: f64,
}

impl ConfidenceInterval {
    pub fn new(low: f64, high: f64) -> ChartResult<Self> {
        if !low.is_finite() || !high.is_finite() {
            return Err(ChartError::InvalidData(
                "confidence bounds must be finite".to_owned(),
            ));
        }
        if low > high {
            return Err(ChartError::InvalidData(format!(
                "confidence lower bound {low} exceeds upper bound {high}"
            )));
        }
        Ok(Self { low, high })
    }

    pub fn from_margin(estimate: f64, margin_of_error: f64) -> ChartResult<Self> {
        if !margin_of_error.is_finite() || margin_of_error < 0.0 {
            return Err(ChartError::InvalidData(
                "margin of error must be finite and >= 0".to_owned(),
            ));
        }
        Self::new(estimate - margin_of_error, estimate + margin_of_error)
    }
}

/// One categorical tick of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Tick position; row 0 sits at the bottom of the chart.
    pub index: usize,
    pub role: RowRole,
    pub primary_label: String,
    pub group: Option<String>,
    pub estimate: Option<f64>,
    pub interval: Option<ConfidenceInterval>,
    pub annotations_left: SmallVec<[String; 4]>,
    pub annotations_right: SmallVec<[String; 4]>,
    pub formatted_pvalue: Option<String>,
    /// Primary label with left annotation columns laid out in fixed-width cells.
    pub tick_label: String,
    /// Right annotation columns laid out in fixed-width cells.
    pub right_label: String,
}

impl Row {
    #[must_use]
    pub fn ci_low(&self) -> Option<f64> {
        self.interval.map(|interval| interval.low)
    }

    #[must_use]
    pub fn ci_high(&self) -> Option<f64> {
        self.interval.map(|interval| interval.high)
    }

    #[must_use]
    pub fn is_group_header(&self) -> bool {
        self.role == RowRole::GroupHeader
    }

    #[must_use]
    pub fn is_table_header(&self) -> bool {
        self.role == RowRole::TableHeader
    }
}

/// Knobs of `RowModel::from_table`.
#[derive(Debug, Clone, PartialEq)]
pub struct RowModelOptions {
    /// Header given to the p-value column when it is folded into the right
    /// annotation columns.
    pub pvalue_title: Option<String>,
}

impl Default for RowModelOptions {
    fn default() -> Self {
        Self {
            pvalue_title: Some("P-value".to_owned()),
        }
    }
}

/// Normalized rows in tick order plus the derived group set.
#[derive(Debug, Clone, PartialEq)]
pub struct RowModel {
    rows: Vec<Row>,
    groups: GroupSet,
    has_pvalue_column: bool,
    has_left_headers: bool,
    has_right_headers: bool,
    has_right_annotations: bool,
}

impl RowModel {
    pub fn from_table(table: &ForestTable, options: &RowModelOptions) -> ChartResult<Self> {
        let left_columns = table.annotation_column_count();
        let mut right_columns = table.right_annotation_column_count();
        let mut right_headers = table.right_annotation_headers.clone();

        // A p-value next to right annotations becomes their last column so
        // both never land on the same x offset.
        let fold_pvalue = table.has_pvalue_column() && right_columns > 0;
        if fold_pvalue {
            right_columns += 1;
            if let Some(headers) = right_headers.as_mut() {
                headers.resize(right_columns - 1, String::new());
                headers.push(options.pvalue_title.clone().unwrap_or_default());
            }
        }

        let mut groups = GroupSet::new();
        let mut reading_order = Vec::with_capacity(table.records.len());
        if table.has_group_column() {
            let mut group_names: Vec<&str> = Vec::new();
            for record in &table.records {
                if let Some(group) = record.group.as_deref() {
                    if groups.insert(group) {
                        group_names.push(group.trim());
                    }
                }
            }

            let ungrouped = table.records.iter().filter(|record| {
                record
                    .group
                    .as_deref()
                    .is_none_or(|group| group.trim().is_empty())
            });
            for record in ungrouped {
                reading_order.push(build_data_row(
                    record,
                    left_columns,
                    right_columns,
                    fold_pvalue,
                )?);
            }
            for name in group_names {
                reading_order.push(group_header_row(name));
                for record in table.records.iter().filter(|record| {
                    record
                        .group
                        .as_deref()
                        .is_some_and(|group| GroupSet::normalize(group) == GroupSet::normalize(name))
                }) {
                    reading_order.push(build_data_row(
                        record,
                        left_columns,
                        right_columns,
                        fold_pvalue,
                    )?);
                }
            }
        } else {
            for record in &table.records {
                reading_order.push(build_data_row(
                    record,
                    left_columns,
                    right_columns,
                    fold_pvalue,
                )?);
            }
        }

        let mut rows: Vec<Row> = reading_order.into_iter().rev().collect();

        let has_left_headers = table.annotation_headers.is_some();
        let has_right_headers = right_headers.is_some();
        if has_left_headers || has_right_headers {
            rows.push(table_header_row(
                table.variable_header.as_deref().unwrap_or_default(),
                table.annotation_headers.as_deref().unwrap_or_default(),
                right_headers.as_deref().unwrap_or_default(),
                left_columns,
                right_columns,
            ));
        }

        for (index, row) in rows.iter_mut().enumerate() {
            row.index = index;
        }
        compose_tick_labels(&mut rows, left_columns);
        compose_right_labels(&mut rows, right_columns);

        debug!(
            rows = rows.len(),
            groups = groups.len(),
            left_columns,
            right_columns,
            fold_pvalue,
            "built forest row model"
        );

        Ok(Self {
            rows,
            groups,
            has_pvalue_column: table.has_pvalue_column() && !fold_pvalue,
            has_left_headers,
            has_right_headers,
            has_right_annotations: right_columns > 0,
        })
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn groups(&self) -> &GroupSet {
        &self.groups
    }

    #[must_use]
    pub fn has_group_column(&self) -> bool {
        !self.groups.is_empty()
    }

    /// True when the single right-hand p-value column is drawn on its own.
    #[must_use]
    pub fn has_pvalue_column(&self) -> bool {
        self.has_pvalue_column
    }

    #[must_use]
    pub fn has_left_headers(&self) -> bool {
        self.has_left_headers
    }

    #[must_use]
    pub fn has_right_headers(&self) -> bool {
        self.has_right_headers
    }

    #[must_use]
    pub fn has_right_annotations(&self) -> bool {
        self.has_right_annotations
    }

    #[must_use]
    pub fn table_header_index(&self) -> Option<usize> {
        self.rows
            .iter()
            .rposition(Row::is_table_header)
    }

    #[must_use]
    pub fn tick_labels(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.tick_label.clone()).collect()
    }

    /// `[min(low), max(high)]` over every row carrying an interval.
    #[must_use]
    pub fn interval_bounds(&self) -> Option<AxisLimits> {
        self.rows
            .iter()
            .filter_map(|row| row.interval)
            .fold(None, |bounds: Option<AxisLimits>, interval| {
                Some(match bounds {
                    Some(bounds) => AxisLimits {
                        lower: bounds.lower.min(interval.low),
                        upper: bounds.upper.max(interval.high),
                    },
                    None => AxisLimits {
                        lower: interval.low,
                        upper: interval.high,
                    },
                })
            })
    }
}

fn build_data_row(
    record: &ForestRecord,
    left_columns: usize,
    right_columns: usize,
    fold_pvalue: bool,
) -> ChartResult<Row> {
    if let Some(estimate) = record.estimate {
        if !estimate.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "estimate of `{}` must be finite",
                record.label
            )));
        }
    }

    let interval = match (
        record.estimate,
        record.margin_of_error,
        record.lower_limit,
        record.upper_limit,
    ) {
        (Some(estimate), Some(margin), _, _) => {
            Some(ConfidenceInterval::from_margin(estimate, margin)?)
        }
        (_, _, Some(low), Some(high)) => Some(ConfidenceInterval::new(low, high)?),
        _ => None,
    };

    let annotations_left = fill_cells(&record.annotations, left_columns);
    let mut right_cells = record.right_annotations.clone();
    if fold_pvalue {
        right_cells.resize(right_columns - 1, None);
        right_cells.push(record.formatted_pvalue.clone());
    }
    let annotations_right = fill_cells(&right_cells, right_columns);

    Ok(Row {
        index: 0,
        role: RowRole::Data,
        primary_label: record.label.clone(),
        group: record.group.clone(),
        estimate: record.estimate,
        interval,
        annotations_left,
        annotations_right,
        formatted_pvalue: if fold_pvalue {
            None
        } else {
            record.formatted_pvalue.clone()
        },
        tick_label: String::new(),
        right_label: String::new(),
    })
}

fn group_header_row(name: &str) -> Row {
    Row {
        index: 0,
        role: RowRole::GroupHeader,
        primary_label: name.to_owned(),
        group: Some(name.to_owned()),
        estimate: None,
        interval: None,
        annotations_left: SmallVec::new(),
        annotations_right: SmallVec::new(),
        formatted_pvalue: None,
        tick_label: String::new(),
        right_label: String::new(),
    }
}

fn table_header_row(
    variable_header: &str,
    left_headers: &[String],
    right_headers: &[String],
    left_columns: usize,
    right_columns: usize,
) -> Row {
    let left: Vec<Option<String>> = left_headers.iter().cloned().map(Some).collect();
    let right: Vec<Option<String>> = right_headers.iter().cloned().map(Some).collect();
    Row {
        index: 0,
        role: RowRole::TableHeader,
        primary_label: variable_header.to_owned(),
        group: None,
        estimate: None,
        interval: None,
        annotations_left: fill_cells(&left, left_columns),
        annotations_right: fill_cells(&right, right_columns),
        formatted_pvalue: None,
        tick_label: String::new(),
        right_label: String::new(),
    }
}

fn fill_cells(cells: &[Option<String>], columns: usize) -> SmallVec<[String; 4]> {
    (0..columns)
        .map(|column| {
            cells
                .get(column)
                .and_then(|cell| cell.clone())
                .unwrap_or_default()
        })
        .collect()
}

fn pad_cell(cell: &str, width: usize) -> String {
    let length = cell.chars().count();
    let mut padded = String::with_capacity(cell.len() + width.saturating_sub(length));
    padded.push_str(cell);
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(length)));
    padded
}

fn compose_tick_labels(rows: &mut [Row], left_columns: usize) {
    if left_columns == 0 {
        for row in rows.iter_mut() {
            row.tick_label = row.primary_label.clone();
        }
        return;
    }

    let mut widths = vec![0usize; left_columns + 1];
    for row in rows.iter().filter(|row| !row.is_group_header()) {
        widths[0] = widths[0].max(row.primary_label.chars().count());
        for (column, cell) in row.annotations_left.iter().enumerate() {
            widths[column + 1] = widths[column + 1].max(cell.chars().count());
        }
    }

    for row in rows.iter_mut() {
        if row.is_group_header() {
            row.tick_label = row.primary_label.clone();
            continue;
        }
        let cells: Vec<String> = std::iter::once(row.primary_label.as_str())
            .chain(row.annotations_left.iter().map(String::as_str))
            .zip(&widths)
            .map(|(cell, width)| pad_cell(cell, *width))
            .collect();
        row.tick_label = cells.join(COLUMN_SEPARATOR);
    }
}

fn compose_right_labels(rows: &mut [Row], right_columns: usize) {
    if right_columns == 0 {
        return;
    }

    let mut widths = vec![0usize; right_columns];
    for row in rows.iter() {
        for (column, cell) in row.annotations_right.iter().enumerate() {
            widths[column] = widths[column].max(cell.chars().count());
        }
    }

    for row in rows.iter_mut() {
        let cells: Vec<String> = row
            .annotations_right
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad_cell(cell, *width))
            .collect();
        row.right_label = cells.join(COLUMN_SEPARATOR).trim_end().to_owned();
    }
}
