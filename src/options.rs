/// What to do with statements whose keyword the parser does not handle
/// (curves, surfaces, `p`, `mg`, ...). Neither choice fails the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownStatements {
    Ignore,
    /// Report each skipped keyword through `tracing::warn!`.
    Warn,
}

impl Default for UnknownStatements {
    fn default() -> Self {
        UnknownStatements::Ignore
    }
}

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Name given to models started implicitly or by a bare `o`.
    pub default_model_name: String,
    pub unknown_statements: UnknownStatements,
}

pub const DEFAULT_MODEL_NAME: &str = "untitled";

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            default_model_name: DEFAULT_MODEL_NAME.to_string(),
            unknown_statements: UnknownStatements::default(),
        }
    }
}

impl ParseOptions {
    pub fn with_default_model_name(mut self, name: impl Into<String>) -> Self {
        self.default_model_name = name.into();
        self
    }

    pub fn with_unknown_statements(mut self, policy: UnknownStatements) -> Self {
        self.unknown_statements = policy;
        self
    }
}
