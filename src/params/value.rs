//! Typed parameter values

/// A typed, range-bounded parameter value.
///
/// Closed set of supported kinds; the transform policies match on this
/// exhaustively, so supporting a new kind starts by adding a variant here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Continuous value with inclusive bounds
    Float { value: f32, min: f32, max: f32 },
    /// Stepped value with inclusive bounds
    Int { value: i32, min: i32, max: i32 },
    /// On/off state
    Bool { value: bool },
}

impl ParamValue {
    /// Human-readable kind name, used in summaries and diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Float { .. } => "float",
            ParamValue::Int { .. } => "int",
            ParamValue::Bool { .. } => "bool",
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Float { value, .. } => write!(f, "{value}"),
            ParamValue::Int { value, .. } => write!(f, "{value}"),
            ParamValue::Bool { value, .. } => write!(f, "{value}"),
        }
    }
}
