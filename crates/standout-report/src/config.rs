//! Serde-loadable rendering settings and per-column hints.
//!
//! A report layout can live outside the code:
//!
//! ```yaml
//! settings:
//!   table_class: "table table-striped"
//!   null_token: "-"
//! columns:
//!   Score:
//!     description: Points earned
//!     percentage: true
//!   Name:
//!     align: center
//! ```
//!
//! [`ReportConfig::apply`] pushes the hints onto a binder's columns, matching
//! them by title; every titled entry must exist.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::binder::RowBinder;
use crate::column::{ColumnInfo, NumberStyle, TextAlign};
use crate::error::Result;

/// Renderer settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// CSS class of the `<table>` element.
    pub table_class: String,
    /// Text shown for null cells.
    pub null_token: String,
    /// Text shown for failed cells.
    pub error_token: String,
    /// Tag name of cell containers.
    pub cell_tag: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            table_class: "table table-sm".to_string(),
            null_token: "~".to_string(),
            error_token: "#ERR#".to_string(),
            cell_tag: "td".to_string(),
        }
    }
}

/// Display hints for one column. Unset fields leave the column untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnHints {
    pub description: Option<String>,
    pub align: Option<TextAlign>,
    pub number_style: Option<NumberStyle>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    /// Shorthand for [`ColumnInfo::as_percentage`]. Applied before
    /// `number_style` and `suffix`, which win when also set.
    pub percentage: bool,
    pub attributes: BTreeMap<String, String>,
}

impl ColumnHints {
    /// Applies the set hints to `column`.
    pub fn apply(&self, column: &mut ColumnInfo) {
        if self.percentage {
            column.as_percentage();
        }
        if let Some(description) = &self.description {
            column.set_description(description.clone());
        }
        if let Some(align) = self.align {
            column.set_align(align);
        }
        if let Some(style) = self.number_style {
            column.set_number_style(style);
        }
        if let Some(prefix) = &self.prefix {
            column.set_prefix(prefix.clone());
        }
        if let Some(suffix) = &self.suffix {
            column.set_suffix(suffix.clone());
        }
        for (name, value) in &self.attributes {
            column.set_attribute(name.clone(), value.clone());
        }
    }
}

/// Settings plus column hints keyed by column title.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub settings: RenderConfig,
    pub columns: BTreeMap<String, ColumnHints>,
}

impl ReportConfig {
    /// Parses a YAML document.
    pub fn from_yaml(source: &str) -> Result<Self> {
        let config: ReportConfig = serde_yaml::from_str(source)?;
        debug!(columns = config.columns.len(), "loaded report config");
        Ok(config)
    }

    /// Applies the column hints to `binder`.
    pub fn apply<T>(&self, binder: &mut RowBinder<T>) -> Result<()> {
        binder.apply_hints(&self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::value::ValueKind;

    #[test]
    fn defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.table_class, "table table-sm");
        assert_eq!(config.null_token, "~");
        assert_eq!(config.error_token, "#ERR#");
        assert_eq!(config.cell_tag, "td");
    }

    #[test]
    fn parses_yaml() {
        let yaml = r#"
settings:
  null_token: "-"
columns:
  Score:
    description: Points earned
    align: center
    number_style: percentage_mul100
    attributes:
      data-kind: score
"#;
        let config = ReportConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.settings.null_token, "-");
        assert_eq!(config.settings.error_token, "#ERR#");

        let hints = &config.columns["Score"];
        assert_eq!(hints.description.as_deref(), Some("Points earned"));
        assert_eq!(hints.align, Some(TextAlign::Center));
        assert_eq!(hints.number_style, Some(NumberStyle::PercentageMul100));
        assert_eq!(hints.attributes["data-kind"], "score");
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(ReportConfig::from_yaml("{}").unwrap(), ReportConfig::default());
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = ReportConfig::from_yaml("columns:\n  A:\n    colour: red\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_enum_value_rejected() {
        let err = ReportConfig::from_yaml("columns:\n  A:\n    align: sideways\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn hints_apply_to_column() {
        let mut col = ColumnInfo::new("Share", "Rec", "f64", ValueKind::Float);
        let hints = ColumnHints {
            percentage: true,
            prefix: Some("~".into()),
            align: Some(TextAlign::Left),
            ..Default::default()
        };
        hints.apply(&mut col);
        assert_eq!(col.number_style(), NumberStyle::Percentage);
        assert_eq!(col.suffix(), Some(" %"));
        assert_eq!(col.prefix(), Some("~"));
        assert_eq!(col.align(), TextAlign::Left);
    }

    #[test]
    fn explicit_style_wins_over_percentage() {
        let mut col = ColumnInfo::new("Share", "Rec", "f64", ValueKind::Float);
        let hints = ColumnHints {
            percentage: true,
            number_style: Some(NumberStyle::PercentageMul100),
            suffix: Some("pct".into()),
            ..Default::default()
        };
        hints.apply(&mut col);
        assert_eq!(col.number_style(), NumberStyle::PercentageMul100);
        assert_eq!(col.suffix(), Some("pct"));
    }

    #[test]
    fn applies_to_binder() {
        struct Rec {
            score: f64,
        }
        let mut binder = RowBinder::<Rec>::new();
        binder.column("Score", |r: &Rec| r.score).unwrap();

        let config = ReportConfig::from_yaml("columns:\n  Score:\n    percentage: true\n").unwrap();
        config.apply(&mut binder).unwrap();
        assert_eq!(binder.column_info("Score").unwrap().suffix(), Some(" %"));

        let bad = ReportConfig::from_yaml("columns:\n  Points: {}\n").unwrap();
        assert_eq!(
            bad.apply(&mut binder).unwrap_err(),
            ConfigError::UnknownColumn("Points".into())
        );
    }
}
