//! Parameter expansion for parameterized cases.
//!
//! A parameterized case declares a [`ParameterSource`] and gets one concrete
//! invocation per expanded [`ParameterSet`]. Two source kinds are supported:
//!
//! - **Values**: a flat list, each value bound to the sole parameter of one
//!   invocation.
//! - **Table**: delimited rows, each row bound positionally to the declared
//!   column kinds and converted to them.
//!
//! Expansion is deterministic and order-preserving: invocation order equals
//! source order. Conversion problems are configuration faults raised when
//! the case is registered, never while it runs.

use std::fmt;

use crate::errors::Fault;

// ============================================================================
// VALUES AND KINDS
// ============================================================================

/// Semantic kind of one table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Int,
    Real,
    Truth,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Text => "text",
            ParamKind::Int => "int",
            ParamKind::Real => "real",
            ParamKind::Truth => "truth",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One concrete argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Real(f64),
    Truth(bool),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Text(_) => ParamKind::Text,
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Real(_) => ParamKind::Real,
            ParamValue::Truth(_) => ParamKind::Truth,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            ParamValue::Real(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_truth(&self) -> Option<bool> {
        match self {
            ParamValue::Truth(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => write!(f, "{}", s),
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Real(x) => write!(f, "{}", x),
            ParamValue::Truth(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<f64> for ParamValue {
    fn from(x: f64) -> Self {
        ParamValue::Real(x)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Truth(b)
    }
}

// ============================================================================
// SOURCES
// ============================================================================

/// A table of delimited rows with declared column kinds.
#[derive(Debug, Clone)]
pub struct Table {
    pub kinds: Vec<ParamKind>,
    pub rows: Vec<String>,
    pub delimiter: char,
}

impl Table {
    pub fn new(kinds: Vec<ParamKind>, rows: Vec<String>) -> Self {
        Self {
            kinds,
            rows,
            delimiter: ',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Where the argument tuples of a parameterized case come from.
#[derive(Debug, Clone)]
pub enum ParameterSource {
    /// A flat list of single values, one invocation each.
    Values(Vec<ParamValue>),
    /// Delimited rows converted positionally to declared kinds.
    Table(Table),
}

/// One ordered argument tuple, bound to one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    index: usize,
    values: Vec<ParamValue>,
}

impl ParameterSet {
    /// Zero-based position of this tuple within its source.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn values(&self) -> &[ParamValue] {
        &self.values
    }

    pub fn value(&self, position: usize) -> Option<&ParamValue> {
        self.values.get(position)
    }

    /// Typed positional accessors. A wrong position or kind is a body-side
    /// mistake at run time and surfaces as an unexpected fault.
    pub fn text(&self, position: usize) -> Result<&str, Fault> {
        let value = self.lookup(position)?;
        value
            .as_text()
            .ok_or_else(|| self.kind_error(position, value, ParamKind::Text))
    }

    pub fn int(&self, position: usize) -> Result<i64, Fault> {
        let value = self.lookup(position)?;
        value
            .as_int()
            .ok_or_else(|| self.kind_error(position, value, ParamKind::Int))
    }

    pub fn real(&self, position: usize) -> Result<f64, Fault> {
        let value = self.lookup(position)?;
        value
            .as_real()
            .ok_or_else(|| self.kind_error(position, value, ParamKind::Real))
    }

    pub fn truth(&self, position: usize) -> Result<bool, Fault> {
        let value = self.lookup(position)?;
        value
            .as_truth()
            .ok_or_else(|| self.kind_error(position, value, ParamKind::Truth))
    }

    fn lookup(&self, position: usize) -> Result<&ParamValue, Fault> {
        self.values.get(position).ok_or_else(|| {
            Fault::unexpected(format!(
                "no argument at position {} (tuple has {})",
                position,
                self.values.len()
            ))
        })
    }

    fn kind_error(&self, position: usize, value: &ParamValue, wanted: ParamKind) -> Fault {
        Fault::unexpected(format!(
            "argument at position {} is {}, not {}",
            position,
            value.kind(),
            wanted
        ))
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", rendered.join(", "))
    }
}

// ============================================================================
// EXPANSION
// ============================================================================

/// Expands a source into its concrete argument tuples, in source order.
pub fn expand(source: &ParameterSource) -> Result<Vec<ParameterSet>, Fault> {
    match source {
        ParameterSource::Values(values) => {
            if values.is_empty() {
                return Err(Fault::configuration(
                    "value source is empty: a parameterized case needs at least one value",
                ));
            }
            Ok(values
                .iter()
                .enumerate()
                .map(|(index, value)| ParameterSet {
                    index,
                    values: vec![value.clone()],
                })
                .collect())
        }
        ParameterSource::Table(table) => expand_table(table),
    }
}

fn expand_table(table: &Table) -> Result<Vec<ParameterSet>, Fault> {
    if table.kinds.is_empty() {
        return Err(Fault::configuration(
            "table source declares no column kinds",
        ));
    }
    if table.rows.is_empty() {
        return Err(Fault::configuration(
            "table source is empty: a parameterized case needs at least one row",
        ));
    }
    table
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let fields: Vec<&str> = row.split(table.delimiter).map(str::trim).collect();
            if fields.len() != table.kinds.len() {
                return Err(Fault::configuration(format!(
                    "row {} has {} fields, expected {}: {:?}",
                    index,
                    fields.len(),
                    table.kinds.len(),
                    row
                )));
            }
            let values = fields
                .iter()
                .zip(table.kinds.iter())
                .enumerate()
                .map(|(column, (field, kind))| convert(field, *kind, index, column))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ParameterSet { index, values })
        })
        .collect()
}

fn convert(field: &str, kind: ParamKind, row: usize, column: usize) -> Result<ParamValue, Fault> {
    let fail = |what: &str| {
        Fault::configuration(format!(
            "row {} column {}: {:?} is not a valid {}",
            row, column, field, what
        ))
    };
    match kind {
        ParamKind::Text => Ok(ParamValue::Text(field.to_string())),
        ParamKind::Int => field
            .parse::<i64>()
            .map(ParamValue::Int)
            .map_err(|_| fail("int")),
        ParamKind::Real => field
            .parse::<f64>()
            .map(ParamValue::Real)
            .map_err(|_| fail("real")),
        ParamKind::Truth => match field {
            "true" => Ok(ParamValue::Truth(true)),
            "false" => Ok(ParamValue::Truth(false)),
            _ => Err(fail("truth")),
        },
    }
}

/// Parses a YAML sequence of row strings, for table sources kept in data
/// form alongside the declaring code.
pub fn rows_from_yaml(yaml: &str) -> Result<Vec<String>, Fault> {
    serde_yaml::from_str::<Vec<String>>(yaml)
        .map_err(|e| Fault::configuration(format!("row data is not a YAML string sequence: {}", e)))
}
