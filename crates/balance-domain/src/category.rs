//! Income/expense categories and their line items.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

/// Whether a category's sections count towards income or expense.
///
/// Only the exact wire string `income` reads as income; any other type string
/// reads as expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CategoryType {
    Income,
    Expense,
}

impl CategoryType {
    pub fn label(self) -> &'static str {
        match self {
            CategoryType::Income => "income",
            CategoryType::Expense => "expense",
        }
    }
}

impl From<String> for CategoryType {
    fn from(value: String) -> Self {
        if value == "income" {
            CategoryType::Income
        } else {
            CategoryType::Expense
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(CategoryType::Income),
            "expense" => Ok(CategoryType::Expense),
            other => Err(format!("unknown category type `{other}`")),
        }
    }
}

/// A named numeric line item. Values are signed and carry no currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default, deserialize_with = "value_or_zero")]
    pub value: f64,
}

impl Section {
    /// Creates a section with a zero value.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_value(name, 0.0)
    }

    pub fn with_value(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

// JSON writes non-finite numbers as `null`; read those back as zero.
fn value_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// A named grouping of sections. Names are not unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryType,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Category {
    /// Creates a category with no sections.
    pub fn new(name: impl Into<String>, kind: CategoryType) -> Self {
        Self {
            name: name.into(),
            kind,
            sections: Vec::new(),
        }
    }

    pub fn with_sections(mut self, sections: impl IntoIterator<Item = Section>) -> Self {
        self.sections.extend(sections);
        self
    }

    /// Sum of every section value, regardless of category type.
    pub fn total(&self) -> f64 {
        self.sections.iter().map(|section| section.value).sum()
    }

    pub fn is_income(&self) -> bool {
        self.kind == CategoryType::Income
    }
}
