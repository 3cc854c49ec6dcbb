//! Error types and result utilities for plotter operations.

use crate::library::Handle;
use crate::value::ArgKind;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience type alias for results that may contain PlotError
pub type PlotResult<T> = Result<T, PlotError>;

/// Which of the three plotter streams an I/O failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamRole {
    /// The stream the plotter reads from (standard input by default)
    Input,
    /// The stream graphics are written to (standard output by default)
    Output,
    /// The stream diagnostics are written to (standard error by default)
    Error,
}

impl std::fmt::Display for StreamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StreamRole::Input => "input",
            StreamRole::Output => "output",
            StreamRole::Error => "error",
        };
        f.write_str(name)
    }
}

/// Error types that can occur while driving a plotter.
///
/// The first five variants mirror the plotting library's negative-return
/// convention for the lifecycle calls. The remaining variants are raised on
/// the host side, before or around a foreign call.
#[derive(Error, Debug)]
pub enum PlotError {
    /// The library refused to allocate a plotter of the requested kind.
    #[error("Couldn't create plotter of kind '{kind}' (code {code})")]
    Creation {
        /// Backend kind that was requested
        kind: String,
        /// Raw `pl_newpl` return value
        code: i32,
    },

    /// The library rejected the handle when making it current.
    #[error("Couldn't select plotter {handle} (code {code})")]
    Selection {
        /// Handle that could not be selected
        handle: Handle,
        /// Raw `pl_selectpl` return value
        code: i32,
    },

    /// `openpl` failed on the selected plotter.
    #[error("Couldn't open plotter {handle} (code {code})")]
    Open {
        /// Plotter whose page could not be opened
        handle: Handle,
        /// Raw `pl_openpl` return value
        code: i32,
    },

    /// `closepl` failed on the selected plotter.
    #[error("Couldn't close plotter {handle} (code {code})")]
    Close {
        /// Plotter whose page could not be closed
        handle: Handle,
        /// Raw `pl_closepl` return value
        code: i32,
    },

    /// The library refused to release the handle.
    #[error("Couldn't delete plotter {handle} (code {code})")]
    Delete {
        /// Plotter that is still alive
        handle: Handle,
        /// Raw `pl_deletepl` return value
        code: i32,
    },

    /// A caller-supplied stream path could not be opened.
    #[error("Couldn't open {role} stream '{}': {source}", path.display())]
    Stream {
        /// Which of the three streams failed
        role: StreamRole,
        /// Path that was being opened
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// No entry point with this name exists in the operation table.
    #[error("Unknown plotter operation '{0}'")]
    UnknownOperation(String),

    /// Wrong number of positional arguments.
    #[error("{op}: expected {expected} arguments, got {actual}")]
    Arity {
        /// Operation name
        op: &'static str,
        /// Declared parameter count
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// An argument could not be converted to the native kind.
    #[error("{op}: argument {index} must be {expected}, got {actual}")]
    ArgumentType {
        /// Operation name
        op: &'static str,
        /// Zero-based argument position
        index: usize,
        /// Declared native kind
        expected: ArgKind,
        /// Type name of the supplied value
        actual: &'static str,
    },

    /// An integer argument does not fit a C `int`.
    #[error("{op}: argument {index} ({value}) is out of range for a C int")]
    OutOfRange {
        /// Operation name
        op: &'static str,
        /// Zero-based argument position
        index: usize,
        /// Value that did not fit
        value: i64,
    },

    /// A declared element count disagrees with the list that follows it.
    #[error("{op}: declared {declared} elements but the list holds {actual}")]
    LengthMismatch {
        /// Operation name
        op: &'static str,
        /// Count passed in the length argument
        declared: i64,
        /// Length of the list argument
        actual: usize,
    },

    /// A string argument contains a NUL byte.
    #[error("{op}: string arguments may not contain NUL bytes")]
    InteriorNul {
        /// Operation name
        op: &'static str,
    },

    /// `openpl`/`closepl` were routed through the generic dispatcher.
    #[error("{op} changes the plotter lifecycle; use Plotter::open or Plotter::close")]
    Lifecycle {
        /// Operation name
        op: &'static str,
    },

    /// Selection refused without asking the library: the handle was already deleted.
    #[error("Couldn't select plotter {handle}: it has already been deleted")]
    Deleted {
        /// Handle released by the earlier delete
        handle: Handle,
    },

    /// A session locked from another context was passed to a plotter.
    #[error("Session belongs to a different plotting context")]
    ForeignSession,

    /// The plotting library could not be loaded.
    #[error("Plotting library unavailable: {0}")]
    LibraryUnavailable(String),

    /// libplot is already loaded by another live `NativeLibrary` in this process.
    #[error("Plotting library '{path}' is already in use; share it through Context::global")]
    LibraryInUse {
        /// Path or soname of the refused load
        path: String,
    },

    /// The plotting library lacks an entry point.
    #[error("Symbol '{symbol}' not found: {details}")]
    MissingSymbol {
        /// Exported symbol name
        symbol: String,
        /// Loader message
        details: String,
    },

    /// The native dispatcher has no call shape for this operation.
    #[error("No native call shape for '{op}'")]
    UnsupportedSignature {
        /// Operation name
        op: &'static str,
    },
}

impl PlotError {
    /// Create a creation error
    pub fn creation(kind: impl Into<String>, code: i32) -> Self {
        Self::Creation {
            kind: kind.into(),
            code,
        }
    }

    /// Create a stream error
    pub fn stream(role: StreamRole, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Stream {
            role,
            path: path.into(),
            source,
        }
    }

    /// Create a missing symbol error
    pub fn missing_symbol(symbol: impl Into<String>, details: impl ToString) -> Self {
        Self::MissingSymbol {
            symbol: symbol.into(),
            details: details.to_string(),
        }
    }

    /// Check if the library itself reported the failure through a negative code
    pub const fn is_library_failure(&self) -> bool {
        matches!(
            self,
            Self::Creation { .. }
                | Self::Selection { .. }
                | Self::Open { .. }
                | Self::Close { .. }
                | Self::Delete { .. }
        )
    }

    /// Check if making the plotter current failed, in the library or because it was deleted
    pub const fn is_selection_failure(&self) -> bool {
        matches!(self, Self::Selection { .. } | Self::Deleted { .. })
    }

    /// Check if the failure happened while converting call arguments
    pub const fn is_marshaling_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownOperation(_)
                | Self::Arity { .. }
                | Self::ArgumentType { .. }
                | Self::OutOfRange { .. }
                | Self::LengthMismatch { .. }
                | Self::InteriorNul { .. }
                | Self::Lifecycle { .. }
        )
    }

    /// The raw library return code, when the error carries one
    pub const fn code(&self) -> Option<i32> {
        match self {
            Self::Creation { code, .. }
            | Self::Selection { code, .. }
            | Self::Open { code, .. }
            | Self::Close { code, .. }
            | Self::Delete { code, .. } => Some(*code),
            _ => None,
        }
    }
}
