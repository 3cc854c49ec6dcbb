//! Python bindings.
//!
//! `rplot.Plotter` wraps a [`Plotter`](crate::Plotter) on the process
//! context. Named methods cover the lifecycle; every table operation is
//! reachable as an attribute (`plotter.fline(0, 0, 1, 1)`) or through
//! `plotter.call("fline", 0, 0, 1, 1)`. Colors take a name or RGB
//! components, and the drawing helpers take `relative=True` for the
//! `*rel` variants. Used as a context manager the plotter opens and erases
//! a page on entry and is deleted on exit.
//!
//! ```python
//! import rplot
//!
//! rplot.Plotter.params(bitmapsize="300x300")
//! with rplot.Plotter("svg", output="out.svg") as p:
//!     p.space(0.0, 0.0, 1.0, 1.0)
//!     p.bg_color("white", erase=True)
//!     p.pen_color(0xffff, 0, 0)
//!     p.dashes([0.05, 0.02], 0.0)
//!     p.move_to(0.1, 0.1)
//!     p.cont_to(0.8, 0.8, relative=True)
//! ```

mod conversions;
mod helpers;
mod utils;

use crate::operations::{self, Category};
use crate::{Context, Plotter, StreamSpec};
use conversions::{output_to_py, tuple_to_values};
use pyo3::prelude::*;
use pyo3::types::{PyCFunction, PyDict, PyTuple};
use std::path::PathBuf;
pub use utils::{CloseError, CreationError, DeleteError, OpenError, PlotterError, SelectionError};
use utils::map_error;

/// A plotter bound to an output backend and up to three streams.
///
/// Streams left as `None` fall back to the process's stdin, stdout and
/// stderr.
#[pyclass(name = "Plotter", module = "rplot")]
pub struct PyPlotter {
    inner: Plotter,
}

impl PyPlotter {
    fn with_session<T>(
        &mut self,
        f: impl FnOnce(&mut Plotter, &mut crate::Session<'_>) -> crate::PlotResult<T>,
    ) -> PyResult<T> {
        let context = self.inner.context().clone();
        let mut session = context.lock();
        f(&mut self.inner, &mut session).map_err(map_error)
    }

    fn forward(&mut self, py: Python<'_>, name: &str, args: &Bound<'_, PyTuple>) -> PyResult<PyObject> {
        let values = tuple_to_values(args)?;
        let output = self.with_session(|plotter, session| plotter.call(session, name, &values))?;
        output_to_py(py, output)
    }
}

#[pymethods]
impl PyPlotter {
    /// Create a plotter of `kind` (`"svg"`, `"png"`, `"X"`, ...).
    ///
    /// Raises `CreationError` if the library refuses the kind and `OSError`
    /// if one of the stream paths cannot be opened.
    #[new]
    #[pyo3(signature = (kind, input=None, output=None, error=None))]
    fn new(kind: &str, input: Option<PathBuf>, output: Option<PathBuf>, error: Option<PathBuf>) -> PyResult<Self> {
        let context = Context::global().map_err(map_error)?;
        let mut session = context.lock();
        let streams = StreamSpec::from_paths(input, output, error);
        let inner = Plotter::new(&mut session, kind, streams).map_err(map_error)?;
        Ok(Self { inner })
    }

    /// Set a global parameter read at the next plotter creation.
    #[staticmethod]
    fn set_param(name: &str, value: &Bound<'_, PyAny>) -> PyResult<()> {
        let value: String = value.str()?.extract()?;
        Context::global()
            .and_then(|context| context.set_param(name, &value))
            .map_err(map_error)
    }

    /// Set several global parameters; keyword names are uppercased.
    #[staticmethod]
    #[pyo3(signature = (**params))]
    fn params(params: Option<&Bound<'_, PyDict>>) -> PyResult<()> {
        let Some(params) = params else {
            return Ok(());
        };
        let mut pairs = Vec::with_capacity(params.len());
        for (name, value) in params.iter() {
            pairs.push((name.extract::<String>()?, value.str()?.extract::<String>()?));
        }
        Context::global()
            .and_then(|context| context.set_params(pairs))
            .map_err(map_error)
    }

    /// The library handle.
    #[getter]
    fn handle(&self) -> i32 {
        self.inner.handle().raw()
    }

    /// The backend kind.
    #[getter]
    fn kind(&self) -> &str {
        self.inner.kind()
    }

    /// Whether the plotter has been deleted.
    #[getter]
    fn deleted(&self) -> bool {
        self.inner.is_deleted()
    }

    /// Begin a page. Raises `OpenError` on failure.
    fn open(&mut self) -> PyResult<()> {
        self.with_session(|plotter, session| plotter.open(session))
    }

    /// End the page. Raises `CloseError` on failure.
    fn close(&mut self) -> PyResult<()> {
        self.with_session(|plotter, session| plotter.close(session))
    }

    /// Release the plotter. Raises `DeleteError` on failure.
    fn delete(&mut self) -> PyResult<()> {
        self.with_session(|plotter, session| plotter.delete(session))
    }

    /// Forward operation `name` with positional arguments, returning the raw result.
    #[pyo3(signature = (name, *args))]
    fn call(&mut self, py: Python<'_>, name: &str, args: &Bound<'_, PyTuple>) -> PyResult<PyObject> {
        self.forward(py, name, args)
    }

    fn __getattr__(slf: &Bound<'_, Self>, name: &str) -> PyResult<PyObject> {
        let Some(spec) = operations::lookup(name).filter(|spec| spec.category != Category::Lifecycle) else {
            return Err(pyo3::exceptions::PyAttributeError::new_err(format!(
                "'Plotter' object has no attribute '{name}'"
            )));
        };
        let owner: Py<PyPlotter> = slf.clone().unbind();
        let op = spec.name;
        let method = PyCFunction::new_closure(
            slf.py(),
            None,
            None,
            move |args: &Bound<'_, PyTuple>, _kwargs: Option<&Bound<'_, PyDict>>| -> PyResult<PyObject> {
                let py = args.py();
                owner.try_borrow_mut(py)?.forward(py, op, args)
            },
        )?;
        Ok(method.into_any().unbind())
    }

    fn __enter__(mut slf: PyRefMut<'_, Self>) -> PyResult<PyRefMut<'_, Self>> {
        slf.with_session(|plotter, session| {
            plotter.open(session)?;
            plotter.erase(session).map(drop)
        })?;
        Ok(slf)
    }

    #[pyo3(signature = (_exc_type=None, _exc_value=None, _traceback=None))]
    fn __exit__(
        &mut self,
        _exc_type: Option<&Bound<'_, PyAny>>,
        _exc_value: Option<&Bound<'_, PyAny>>,
        _traceback: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<bool> {
        if !self.inner.is_deleted() {
            self.delete()?;
        }
        Ok(false)
    }

    fn __repr__(&self) -> String {
        format!(
            "Plotter(kind={:?}, handle={}{})",
            self.inner.kind(),
            self.inner.handle(),
            if self.inner.is_deleted() { ", deleted" } else { "" }
        )
    }
}

/// Register the rplot Python module.
pub fn register_module(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPlotter>()?;

    m.add("PlotterError", py.get_type::<PlotterError>())?;
    m.add("CreationError", py.get_type::<CreationError>())?;
    m.add("SelectionError", py.get_type::<SelectionError>())?;
    m.add("OpenError", py.get_type::<OpenError>())?;
    m.add("CloseError", py.get_type::<CloseError>())?;
    m.add("DeleteError", py.get_type::<DeleteError>())?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add(
        "BACKENDS",
        crate::BackendKind::ALL.iter().map(|kind| kind.as_str()).collect::<Vec<_>>(),
    )?;
    m.add("__doc__", "Bindings for GNU libplot")?;
    Ok(())
}

#[pymodule]
fn rplot(m: &Bound<'_, PyModule>) -> PyResult<()> {
    register_module(m.py(), m)
}
