//! Exception types and error mapping for the Python layer.

use crate::PlotError;
use pyo3::PyErr;
use pyo3::create_exception;
use pyo3::exceptions::{PyAttributeError, PyException, PyOSError, PyTypeError, PyValueError};

create_exception!(rplot, PlotterError, PyException, "Base class for plotter lifecycle failures.");
create_exception!(rplot, CreationError, PlotterError, "The library refused to create a plotter.");
create_exception!(rplot, SelectionError, PlotterError, "The library refused to select a plotter.");
create_exception!(rplot, OpenError, PlotterError, "The library could not open a page.");
create_exception!(rplot, CloseError, PlotterError, "The library could not close a page.");
create_exception!(rplot, DeleteError, PlotterError, "The library refused to delete a plotter.");

/// Convert a [`PlotError`] into the matching Python exception.
pub fn map_error(error: PlotError) -> PyErr {
    let message = error.to_string();
    match error {
        PlotError::Creation { .. } => CreationError::new_err(message),
        PlotError::Selection { .. } | PlotError::Deleted { .. } => SelectionError::new_err(message),
        PlotError::Open { .. } => OpenError::new_err(message),
        PlotError::Close { .. } => CloseError::new_err(message),
        PlotError::Delete { .. } => DeleteError::new_err(message),
        PlotError::Stream { .. }
        | PlotError::LibraryUnavailable(_)
        | PlotError::LibraryInUse { .. }
        | PlotError::MissingSymbol { .. } => PyOSError::new_err(message),
        PlotError::UnknownOperation(_) => PyAttributeError::new_err(message),
        PlotError::Arity { .. } | PlotError::ArgumentType { .. } | PlotError::Lifecycle { .. } => {
            PyTypeError::new_err(message)
        }
        PlotError::OutOfRange { .. } | PlotError::LengthMismatch { .. } | PlotError::InteriorNul { .. } => {
            PyValueError::new_err(message)
        }
        PlotError::ForeignSession | PlotError::UnsupportedSignature { .. } => PlotterError::new_err(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Handle;
    use pyo3::Python;

    #[test]
    fn test_selection_failures_raise_selection_error() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let deleted = map_error(PlotError::Deleted {
                handle: Handle::new(3),
            });
            assert!(deleted.is_instance_of::<SelectionError>(py));
            assert!(deleted.is_instance_of::<PlotterError>(py));

            let rejected = map_error(PlotError::Selection {
                handle: Handle::new(3),
                code: -1,
            });
            assert!(rejected.is_instance_of::<SelectionError>(py));

            let deletion = map_error(PlotError::Delete {
                handle: Handle::new(3),
                code: -2,
            });
            assert!(deletion.is_instance_of::<DeleteError>(py));
            assert!(!deletion.is_instance_of::<SelectionError>(py));
        });
    }

    #[test]
    fn test_loader_failures_raise_os_error() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let err = map_error(PlotError::LibraryInUse {
                path: "libplot.so.2".to_string(),
            });
            assert!(err.is_instance_of::<PyOSError>(py));
        });
    }
}
