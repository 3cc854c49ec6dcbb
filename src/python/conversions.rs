//! Conversions between Python objects and call values.

use crate::plotter::Color;
use crate::value::{Output, Value};
use pyo3::IntoPyObjectExt;
use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyFloat, PyInt, PyList, PyString, PyTuple};

/// Convert one positional argument.
///
/// `bool` counts as an int; lists and tuples become [`Value::List`].
pub fn to_value(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
    if obj.is_instance_of::<PyBool>() {
        return Ok(Value::Int(i64::from(obj.extract::<bool>()?)));
    }
    if obj.is_instance_of::<PyInt>() {
        return Ok(Value::Int(obj.extract::<i64>()?));
    }
    if let Ok(float) = obj.downcast::<PyFloat>() {
        return Ok(Value::Float(float.value()));
    }
    if obj.is_instance_of::<PyString>() {
        return Ok(Value::Str(obj.extract::<String>()?));
    }
    if obj.is_instance_of::<PyList>() || obj.is_instance_of::<PyTuple>() {
        let items = obj
            .try_iter()?
            .map(|item| to_value(&item?))
            .collect::<PyResult<Vec<_>>>()?;
        return Ok(Value::List(items));
    }
    Err(PyTypeError::new_err(format!(
        "unsupported argument of type '{}'",
        obj.get_type().name()?
    )))
}

/// Convert every element of a positional argument tuple.
pub fn tuple_to_values(args: &Bound<'_, PyTuple>) -> PyResult<Vec<Value>> {
    args.iter().map(|item| to_value(&item)).collect()
}

/// An int for status results, a float for measurements.
pub fn output_to_py(py: Python<'_>, output: Output) -> PyResult<PyObject> {
    match output {
        Output::Status(code) => code.into_py_any(py),
        Output::Measure(value) => value.into_py_any(py),
    }
}

/// Build a [`Color`] from `(name)`, `((r, g, b))` or `(r, g, b)`.
pub fn color_from_args(
    red_or_name: &Bound<'_, PyAny>,
    green: Option<i32>,
    blue: Option<i32>,
) -> PyResult<Color> {
    match (green, blue) {
        (Some(green), Some(blue)) => Ok(Color::Rgb(red_or_name.extract::<i32>()?, green, blue)),
        (None, None) => {
            if let Ok((red, green, blue)) = red_or_name.extract::<(i32, i32, i32)>() {
                return Ok(Color::Rgb(red, green, blue));
            }
            if red_or_name.is_instance_of::<PyString>() {
                return Ok(Color::Named(red_or_name.extract::<String>()?));
            }
            Err(PyTypeError::new_err(format!(
                "color must be a name or three ints, got '{}'",
                red_or_name.get_type().name()?
            )))
        }
        _ => Err(PyTypeError::new_err("color needs red, green and blue together")),
    }
}
