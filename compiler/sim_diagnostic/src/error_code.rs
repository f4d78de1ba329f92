use std::fmt;

/// Error codes for semantic diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E2xxx: Semantic analysis errors
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Type mismatch
    E2001,
    /// Illegal binary operation
    E2002,
    /// Unknown identifier
    E2003,
    /// Parameter count mismatch
    E2004,
    /// Illegal unary operation
    E2005,
    /// Duplicate identifier
    E2006,
    /// Illegal conversion
    E2007,
    /// Called value is not a function
    E2008,
    /// Indexed value is not an array
    E2009,
    /// Extracted value is not a tuple
    E2010,
    /// Field access on a value that is not a struct
    E2011,
    /// Tuple index out of range
    E2012,
    /// `break` or `continue` outside a loop
    E2013,
    /// Assignment to an immutable value
    E2014,
    /// Function body does not return on every path
    E2015,
    /// Literal does not fit its type
    E2016,
    /// Type or global definition depends on itself
    E2017,
    /// Struct does not implement a trait it declares
    E2018,
    /// Dereference of a value that is not a reference
    E2019,
    /// Wrong number of generic arguments
    E2020,
    /// Generic arguments on a non-generic value
    E2021,
    /// Import of an unknown package
    E2022,

    /// Internal invariant violation
    E9001,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E2001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E2013 => "E2013",
            ErrorCode::E2014 => "E2014",
            ErrorCode::E2015 => "E2015",
            ErrorCode::E2016 => "E2016",
            ErrorCode::E2017 => "E2017",
            ErrorCode::E2018 => "E2018",
            ErrorCode::E2019 => "E2019",
            ErrorCode::E2020 => "E2020",
            ErrorCode::E2021 => "E2021",
            ErrorCode::E2022 => "E2022",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// Internal errors indicate a compiler bug, not a user mistake.
    pub fn is_internal(&self) -> bool {
        matches!(self, ErrorCode::E9001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
