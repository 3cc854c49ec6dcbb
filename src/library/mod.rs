//! The seam between the facade and the plotting library.
//!
//! [`Library`] is the narrow set of entry points the facade needs: plotter
//! creation, selection, deletion, global parameters, and one generic
//! [`invoke`](Library::invoke) for every operation in the table.
//!
//! Two implementations ship with the crate:
//! - [`NativeLibrary`] loads GNU libplot at runtime (unix only)
//! - [`RecordingLibrary`] emulates libplot's selection rules in process and
//!   records every call

#[cfg(unix)]
pub mod native;
pub mod recording;

#[cfg(unix)]
pub use native::NativeLibrary;
pub use recording::{Event, Recorder, RecordingLibrary};

use crate::error::PlotResult;
use crate::operations::OpSpec;
use crate::streams::PlotterStreams;
use crate::value::{Arg, Output};
use std::fmt;

/// The library's integer identifier for a plotter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(i32);

impl Handle {
    /// libplot's built-in default plotter; selecting it means "no plotter of ours is current".
    pub const DEFAULT: Handle = Handle(0);

    /// Wrap a raw handle.
    pub const fn new(raw: i32) -> Self {
        Handle(raw)
    }

    /// The raw handle value.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Returns true for the default-plotter sentinel
    pub const fn is_default(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entry points of a plotting library.
///
/// Library status codes come back in `Ok`, untouched; `Err` is reserved for
/// failures on the host side of the call (a missing symbol, a stream that
/// could not be handed over).
pub trait Library: Send {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// `pl_newpl`: allocate a plotter of `kind` bound to `streams`.
    ///
    /// Returns the new handle, or a negative code. On failure the streams are
    /// closed before returning.
    fn new_plotter(&mut self, kind: &str, streams: PlotterStreams) -> PlotResult<i32>;

    /// `pl_selectpl`: make `handle` current. Returns the previously selected
    /// handle, or a negative code.
    fn select_plotter(&mut self, handle: Handle) -> PlotResult<i32>;

    /// `pl_deletepl`: release `handle` and close its streams. The handle must
    /// not be selected.
    fn delete_plotter(&mut self, handle: Handle) -> PlotResult<i32>;

    /// `pl_parampl`: set a process-wide parameter read at plotter creation.
    fn set_param(&mut self, name: &str, value: &str) -> PlotResult<i32>;

    /// Forward one table operation to the selected plotter.
    fn invoke(&mut self, spec: &OpSpec, args: &[Arg]) -> PlotResult<Output>;
}

