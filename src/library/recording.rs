//! An in-process stand-in for libplot.
//!
//! [`RecordingLibrary`] follows the rules of libplot's classic API that the
//! facade depends on: handle 0 is the always-present default plotter, a
//! selected plotter cannot be deleted, and drawing on a plotter that has not
//! been opened fails with a negative status. It keeps a cursor for the
//! move/cont/line/point families, writes a plain text trace of each page to
//! the plotter's output stream on `flushpl` and `closepl`, and records every
//! call as an [`Event`] that a [`Recorder`] can inspect.

use super::{Handle, Library};
use crate::backend::BackendKind;
use crate::error::PlotResult;
use crate::operations::OpSpec;
use crate::streams::PlotterStreams;
use crate::value::{Arg, Output, ReturnKind};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Write;
use std::sync::Arc;

/// One recorded library call.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `pl_parampl`
    Param {
        /// Parameter name as passed
        name: String,
        /// Parameter value as passed
        value: String,
    },
    /// `pl_newpl` succeeded
    Created {
        /// Handle the library returned
        handle: Handle,
        /// Requested backend kind
        kind: String,
    },
    /// `pl_newpl` failed
    CreationRejected {
        /// Requested backend kind
        kind: String,
    },
    /// `pl_selectpl` succeeded
    Selected(Handle),
    /// `pl_deletepl` succeeded
    Deleted(Handle),
    /// A table operation, with the handle that was selected when it ran
    Invoked {
        /// Plotter that was current
        handle: Handle,
        /// Operation name
        op: &'static str,
        /// Marshaled arguments
        args: Vec<Arg>,
    },
}

#[derive(Debug)]
struct PlotterState {
    kind: String,
    streams: PlotterStreams,
    open: bool,
    cursor: (f64, f64),
    font_size: f64,
    text_angle: f64,
    page: Vec<String>,
}

impl PlotterState {
    fn new(kind: String, streams: PlotterStreams) -> Self {
        Self {
            kind,
            streams,
            open: false,
            cursor: (0.0, 0.0),
            font_size: 1.0,
            text_angle: 0.0,
            page: Vec::new(),
        }
    }

    fn write_page(&mut self) -> std::io::Result<()> {
        for line in self.page.drain(..) {
            writeln!(self.streams.output, "{line}")?;
        }
        self.streams.output.flush()
    }
}

#[derive(Debug)]
struct RecorderState {
    next_handle: i32,
    selected: Handle,
    plotters: BTreeMap<Handle, PlotterState>,
    params: HashMap<String, String>,
    events: Vec<Event>,
    rejected_selections: HashSet<Handle>,
    rejected_deletions: HashSet<Handle>,
}

impl Default for RecorderState {
    fn default() -> Self {
        Self {
            next_handle: 1,
            selected: Handle::DEFAULT,
            plotters: BTreeMap::new(),
            params: HashMap::new(),
            events: Vec::new(),
            rejected_selections: HashSet::new(),
            rejected_deletions: HashSet::new(),
        }
    }
}

/// In-process library that records calls.
#[derive(Debug, Default)]
pub struct RecordingLibrary {
    state: Arc<Mutex<RecorderState>>,
}

impl RecordingLibrary {
    /// Create an empty library with only the default plotter selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// A view that stays valid after the library is moved into a context.
    pub fn recorder(&self) -> Recorder {
        Recorder {
            state: Arc::clone(&self.state),
        }
    }
}

const FAILED: i32 = -1;

fn failure(spec: &OpSpec) -> Output {
    match spec.returns {
        ReturnKind::Status => Output::Status(FAILED),
        ReturnKind::Measure => Output::Measure(f64::from(FAILED)),
    }
}

fn number(args: &[Arg], index: usize) -> f64 {
    match args.get(index) {
        Some(Arg::Int(v)) => f64::from(*v),
        Some(Arg::Float(v)) => *v,
        _ => 0.0,
    }
}

fn text_len(args: &[Arg], index: usize) -> f64 {
    match args.get(index) {
        Some(Arg::Str(s)) => s.as_bytes().len() as f64,
        _ => 0.0,
    }
}

impl Library for RecordingLibrary {
    fn name(&self) -> &str {
        "recording"
    }

    fn new_plotter(&mut self, kind: &str, streams: PlotterStreams) -> PlotResult<i32> {
        let mut state = self.state.lock();
        if kind.parse::<BackendKind>().is_err() {
            state.events.push(Event::CreationRejected {
                kind: kind.to_owned(),
            });
            return Ok(FAILED);
        }
        let handle = Handle::new(state.next_handle);
        state.next_handle += 1;
        state
            .plotters
            .insert(handle, PlotterState::new(kind.to_owned(), streams));
        state.events.push(Event::Created {
            handle,
            kind: kind.to_owned(),
        });
        Ok(handle.raw())
    }

    fn select_plotter(&mut self, handle: Handle) -> PlotResult<i32> {
        let mut state = self.state.lock();
        if !handle.is_default() && !state.plotters.contains_key(&handle) {
            return Ok(FAILED);
        }
        if state.rejected_selections.contains(&handle) {
            return Ok(FAILED);
        }
        let previous = std::mem::replace(&mut state.selected, handle);
        state.events.push(Event::Selected(handle));
        Ok(previous.raw())
    }

    fn delete_plotter(&mut self, handle: Handle) -> PlotResult<i32> {
        let mut state = self.state.lock();
        if state.selected == handle || state.rejected_deletions.contains(&handle) {
            return Ok(FAILED);
        }
        let Some(mut plotter) = state.plotters.remove(&handle) else {
            return Ok(FAILED);
        };
        if plotter.write_page().is_err() {
            tracing::warn!(%handle, "recording plotter could not flush its output on delete");
        }
        state.events.push(Event::Deleted(handle));
        Ok(0)
    }

    fn set_param(&mut self, name: &str, value: &str) -> PlotResult<i32> {
        let mut state = self.state.lock();
        state.params.insert(name.to_owned(), value.to_owned());
        state.events.push(Event::Param {
            name: name.to_owned(),
            value: value.to_owned(),
        });
        Ok(0)
    }

    fn invoke(&mut self, spec: &OpSpec, args: &[Arg]) -> PlotResult<Output> {
        let mut state = self.state.lock();
        let handle = state.selected;
        state.events.push(Event::Invoked {
            handle,
            op: spec.name,
            args: args.to_vec(),
        });
        let Some(plotter) = state.plotters.get_mut(&handle) else {
            return Ok(failure(spec));
        };

        match spec.name {
            "openpl" => {
                if plotter.open {
                    return Ok(failure(spec));
                }
                plotter.open = true;
                plotter.page.clear();
                return Ok(Output::Status(0));
            }
            "havecap" => return Ok(Output::Status(1)),
            _ if !plotter.open => return Ok(failure(spec)),
            _ => {}
        }

        let line = std::iter::once(spec.name.to_owned())
            .chain(args.iter().map(ToString::to_string))
            .collect::<Vec<_>>()
            .join(" ");
        plotter.page.push(line);

        let (x, y) = plotter.cursor;
        let output = match spec.name {
            "closepl" => {
                plotter.open = false;
                match plotter.write_page() {
                    Ok(()) => Output::Status(0),
                    Err(_) => Output::Status(FAILED),
                }
            }
            "flushpl" => match plotter.write_page() {
                Ok(()) => Output::Status(0),
                Err(_) => Output::Status(FAILED),
            },
            "move" | "fmove" | "cont" | "fcont" | "point" | "fpoint" => {
                plotter.cursor = (number(args, 0), number(args, 1));
                Output::Status(0)
            }
            "moverel" | "fmoverel" | "contrel" | "fcontrel" | "pointrel" | "fpointrel" => {
                plotter.cursor = (x + number(args, 0), y + number(args, 1));
                Output::Status(0)
            }
            "line" | "fline" => {
                plotter.cursor = (number(args, 2), number(args, 3));
                Output::Status(0)
            }
            "linerel" | "flinerel" => {
                plotter.cursor = (x + number(args, 2), y + number(args, 3));
                Output::Status(0)
            }
            "fontsize" => {
                plotter.font_size = number(args, 0);
                Output::Status(plotter.font_size as i32)
            }
            "ffontsize" => {
                plotter.font_size = number(args, 0);
                Output::Measure(plotter.font_size)
            }
            "ffontname" => Output::Measure(plotter.font_size),
            "textangle" => {
                plotter.text_angle = number(args, 0);
                Output::Status(plotter.text_angle as i32)
            }
            "ftextangle" => {
                plotter.text_angle = number(args, 0);
                Output::Measure(plotter.text_angle)
            }
            "labelwidth" => Output::Status((text_len(args, 0) * plotter.font_size) as i32),
            "flabelwidth" => Output::Measure(text_len(args, 0) * plotter.font_size),
            _ => Output::Status(0),
        };
        Ok(output)
    }
}

/// Inspection handle for a [`RecordingLibrary`].
///
/// Besides reading the recorded state it can make the library refuse
/// selection or deletion of chosen handles.
#[derive(Debug, Clone)]
pub struct Recorder {
    state: Arc<Mutex<RecorderState>>,
}

impl Recorder {
    /// Every call recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.state.lock().events.clone()
    }

    /// Only the operation calls, as `(handle, op)` pairs.
    pub fn invocations(&self) -> Vec<(Handle, &'static str)> {
        self.state
            .lock()
            .events
            .iter()
            .filter_map(|event| match event {
                Event::Invoked { handle, op, .. } => Some((*handle, *op)),
                _ => None,
            })
            .collect()
    }

    /// The library's current selection.
    pub fn selected(&self) -> Handle {
        self.state.lock().selected
    }

    /// Whether `handle` names a plotter that has not been deleted.
    pub fn is_live(&self, handle: Handle) -> bool {
        self.state.lock().plotters.contains_key(&handle)
    }

    /// Whether `handle` currently has an open page.
    pub fn is_open(&self, handle: Handle) -> bool {
        self.state
            .lock()
            .plotters
            .get(&handle)
            .is_some_and(|plotter| plotter.open)
    }

    /// The plotter's kind string.
    pub fn kind(&self, handle: Handle) -> Option<String> {
        self.state
            .lock()
            .plotters
            .get(&handle)
            .map(|plotter| plotter.kind.clone())
    }

    /// The plotter's current point.
    pub fn cursor(&self, handle: Handle) -> Option<(f64, f64)> {
        self.state
            .lock()
            .plotters
            .get(&handle)
            .map(|plotter| plotter.cursor)
    }

    /// The last value set for a global parameter.
    pub fn param(&self, name: &str) -> Option<String> {
        self.state.lock().params.get(name).cloned()
    }

    /// Number of plotters not yet deleted.
    pub fn live_count(&self) -> usize {
        self.state.lock().plotters.len()
    }

    /// Make `pl_selectpl` fail for `handle` until the rejections are cleared.
    pub fn reject_selection(&self, handle: Handle) {
        self.state.lock().rejected_selections.insert(handle);
    }

    /// Make `pl_deletepl` fail for `handle` until the rejections are cleared.
    pub fn reject_deletion(&self, handle: Handle) {
        self.state.lock().rejected_deletions.insert(handle);
    }

    /// Drop every injected failure.
    pub fn clear_rejections(&self) {
        let mut state = self.state.lock();
        state.rejected_selections.clear();
        state.rejected_deletions.clear();
    }
}
