use serde::{Deserialize, Serialize};

use crate::core::ColorToken;
use crate::error::{ChartError, ChartResult};

/// Shape used to draw a chart's terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bars,
    Circles,
    Rectangles,
    Donut,
    /// Any type string this engine does not know. Rendered as bars.
    #[serde(other)]
    Unknown,
}

/// Whether labels show the raw term value or its share of the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Value,
    Percent,
}

/// One labeled, colored data point. Terms are drawn in vector order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartTerm {
    pub label: String,
    pub value: f64,
    pub color: ColorToken,
}

impl ChartTerm {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64, color: impl Into<ColorToken>) -> Self {
        Self {
            label: label.into(),
            value,
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStyle {
    pub font: String,
    pub font_size: String,
    pub background_color: ColorToken,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font: "Arial".to_owned(),
            font_size: "45px".to_owned(),
            background_color: ColorToken::transparent(),
        }
    }
}

/// Immutable chart definition handed to the engine by the editing layer.
///
/// The engine only reads it; the JSON shape matches what the chart gallery
/// persists (`type`, `valueType`, `createdAt`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub id: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    pub style: ChartStyle,
    pub value_type: ValueType,
    pub terms: Vec<ChartTerm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub created_at: u64,
    pub updated_at: u64,
}

/// The parts of a chart that affect its rendered pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartContent {
    pub chart_type: ChartType,
    pub title: String,
    pub style: ChartStyle,
    pub value_type: ValueType,
    pub terms: Vec<ChartTerm>,
}

impl Chart {
    #[must_use]
    pub fn new(id: impl Into<String>, chart_type: ChartType, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            chart_type,
            title: title.into(),
            style: ChartStyle::default(),
            value_type: ValueType::Value,
            terms: Vec::new(),
            thumbnail: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[must_use]
    pub fn with_terms(mut self, terms: Vec<ChartTerm>) -> Self {
        self.terms = terms;
        self
    }

    #[must_use]
    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    /// Checks that every term value is finite and non-negative.
    pub fn validate(&self) -> ChartResult<()> {
        for (index, term) in self.terms.iter().enumerate() {
            if !term.value.is_finite() || term.value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "term {index} (`{}`) must have a finite value >= 0",
                    term.label
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn content(&self) -> ChartContent {
        ChartContent {
            chart_type: self.chart_type,
            title: self.title.clone(),
            style: self.style.clone(),
            value_type: self.value_type,
            terms: self.terms.clone(),
        }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        terms_total(&self.terms)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let chart: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart json: {e}")))?;
        chart.validate()?;
        Ok(chart)
    }
}

#[must_use]
pub fn terms_total(terms: &[ChartTerm]) -> f64 {
    terms.iter().map(|term| term.value).sum()
}

/// Rounds each term's share of the total to a whole percent.
///
/// Every share is rounded independently, so the sum may drift from 100 by up
/// to `terms.len() - 1`. A zero total yields all zeros.
#[must_use]
pub fn calculate_percents(terms: &[ChartTerm]) -> Vec<u32> {
    let total = terms_total(terms);
    if total <= 0.0 {
        return vec![0; terms.len()];
    }
    terms
        .iter()
        .map(|term| (term.value / total * 100.0).round() as u32)
        .collect()
}

/// Formats a term value the way the chart labels print numbers (`50`, `2.5`).
#[must_use]
pub fn format_value(value: f64) -> String {
    format!("{value}")
}

/// Picks the label text for one term according to the chart's value type.
#[must_use]
pub fn display_value(value_type: ValueType, value: f64, percent: u32) -> String {
    match value_type {
        ValueType::Value => format_value(value),
        ValueType::Percent => format!("{percent}%"),
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartTerm, ValueType, calculate_percents, display_value, format_value};

    #[test]
    fn percents_round_half_up() {
        let terms = vec![
            ChartTerm::new("A", 1.0, "#ff0000"),
            ChartTerm::new("B", 2.0, "#00ff00"),
        ];
        assert_eq!(calculate_percents(&terms), vec![33, 67]);
    }

    #[test]
    fn value_labels_drop_trailing_zero_fraction() {
        assert_eq!(format_value(50.0), "50");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(display_value(ValueType::Percent, 12.0, 40), "40%");
    }
}
