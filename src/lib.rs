// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)] // Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::box_collection)] // Warns on boxed `Vec`, `String`, etc.
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::let_unit_value)] // Avoids binding `()` to variables
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_safety_doc)] // Docs for `unsafe` functions
#![warn(clippy::missing_const_for_fn)] // Suggests making eligible functions `const`
#![allow(clippy::too_many_arguments)] // Geometry entry points take up to eight coordinates
#![deny(missing_docs)]

//! # rplot
//!
//! Handle-scoped bindings for GNU libplot's classic `pl_*` API.
//!
//! libplot draws through whichever plotter is "current" in a single,
//! process-wide selection register. This crate wraps each plotter handle in a
//! [`Plotter`] that makes itself current before every call it forwards, and
//! it makes the register explicit: a [`Context`] owns the library behind a
//! mutex and every operation takes the [`Session`] obtained by locking it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rplot::{Context, Plotter, StreamSpec};
//!
//! let context = Context::global()?;
//! context.set_param("BITMAPSIZE", "300x300")?;
//!
//! let mut session = context.lock();
//! let streams = StreamSpec::standard().with_output("out.svg");
//! Plotter::draw(&mut session, "svg", streams, |session, plotter| {
//!     plotter.fspace(session, 0.0, 0.0, 1.0, 1.0)?;
//!     plotter.pen_color(session, "red")?;
//!     plotter.fline(session, 0.1, 0.1, 0.9, 0.9)?;
//!     Ok(())
//! })?;
//! # Ok::<(), rplot::PlotError>(())
//! ```
//!
//! ## Error Handling
//!
//! Creation, selection, opening, closing and deletion turn a negative library
//! result into a [`PlotError`]. Every other operation returns the library's
//! raw result, negative statuses included:
//!
//! ```rust
//! use rplot::{Context, PlotError, Plotter, RecordingLibrary};
//!
//! let context = Context::new(RecordingLibrary::new());
//! let mut session = context.lock();
//!
//! match Plotter::create(&mut session, "tiff") {
//!     Err(PlotError::Creation { kind, code }) => assert_eq!((kind.as_str(), code), ("tiff", -1)),
//!     other => panic!("unexpected: {other:?}"),
//! }
//!
//! let mut plotter = Plotter::create(&mut session, "svg").unwrap();
//! // No page is open yet, so the library refuses to draw.
//! assert!(plotter.fline(&mut session, 0.0, 0.0, 1.0, 1.0).unwrap() < 0);
//! plotter.delete(&mut session).unwrap();
//! ```
//!
//! ## Backends
//!
//! Which library is used is decided at runtime. [`Context::global`] loads
//! libplot with `libloading`, honouring the `RPLOT_LIBPLOT` environment
//! variable; [`RecordingLibrary`] is an in-process stand-in used by tests.
//!
//! ## Features
//!
//! - `python`: a `pyo3` extension module exposing `rplot.Plotter`

pub mod backend;
pub mod context;
mod error;
pub mod library;
pub mod operations;
pub mod params;
pub mod plotter;
#[cfg(feature = "python")]
pub mod python;
pub mod streams;
pub mod value;

pub use crate::backend::BackendKind;
pub use crate::context::{Context, Session};
pub use crate::error::{PlotError, PlotResult, StreamRole};
#[cfg(unix)]
pub use crate::library::NativeLibrary;
pub use crate::library::{Event, Handle, Library, Recorder, RecordingLibrary};
pub use crate::operations::{Category, OPERATIONS, OpSpec, lookup};
pub use crate::params::PlotParam;
pub use crate::plotter::{Color, Plotter, Positioning};
pub use crate::streams::{StreamSpec, StreamTarget};
pub use crate::value::{Arg, ArgKind, FromOutput, Output, ReturnKind, Value};
