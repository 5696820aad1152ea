//! Front-end options.
//!
//! Defaults reproduce the reference grammar exactly. Each flag relaxes or
//! tightens one rule and is threaded through the scanner or parser.

/// Options read by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanConfig {
    /// Admit ASCII digits after the first character of an identifier.
    pub identifier_digits: bool,
}

impl ScanConfig {
    pub fn with_identifier_digits(mut self, enabled: bool) -> Self {
        self.identifier_digits = enabled;
        self
    }
}

/// Deepest grouping nesting accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options read by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// Accept tokens left over after one complete expression instead of
    /// reporting them.
    pub allow_trailing_tokens: bool,
    /// Limit on nested groupings. Prefix operators do not count.
    pub max_depth: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            allow_trailing_tokens: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseConfig {
    pub fn with_trailing_tokens(mut self, allowed: bool) -> Self {
        self.allow_trailing_tokens = allowed;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrontendConfig {
    pub scan: ScanConfig,
    pub parse: ParseConfig,
}

impl FrontendConfig {
    pub fn with_scan(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }

    pub fn with_parse(mut self, parse: ParseConfig) -> Self {
        self.parse = parse;
        self
    }
}
