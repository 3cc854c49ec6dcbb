//! Dynamic call arguments and their conversion to native argument kinds.
//!
//! Host code (the Python layer, or Rust callers going through
//! [`Plotter::call`](crate::Plotter::call)) hands positional [`Value`]s to the
//! facade. [`marshal`] checks them against an operation's declared
//! [`ArgKind`]s and produces the [`Arg`]s the library receives.

use crate::error::{PlotError, PlotResult};
use crate::operations::OpSpec;
use std::ffi::CString;
use std::fmt;
use std::os::raw::c_int;

/// A dynamically typed call argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer of any width; narrowed to `c_int` during marshaling
    Int(i64),
    /// A floating point number
    Float(f64),
    /// A string
    Str(String),
    /// A homogeneous list, used for dash patterns
    List(Vec<Value>),
}

impl Value {
    /// Short type name used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
        }
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(i64::from(v))
            }
        })*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(v: &[T]) -> Self {
        Value::List(v.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

/// The native kind of one positional parameter of a library entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// C `int` (device coordinates, sizes, levels)
    Int,
    /// C `double` (user coordinates for the `f`-prefixed entry points)
    Float,
    /// NUL-terminated C string
    Str,
    /// Justification character passed as a C `int` (`'l'`, `'c'`, `'r'`, `'b'`, `'x'`, `'t'`, `'C'`)
    Char,
    /// C `int` element count of the list argument that follows it
    Len,
    /// Pointer to a C `int` array
    IntList,
    /// Pointer to a C `double` array
    FloatList,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgKind::Int => "an int",
            ArgKind::Float => "a number",
            ArgKind::Str => "a string",
            ArgKind::Char => "a single character",
            ArgKind::Len => "an element count",
            ArgKind::IntList => "a list of ints",
            ArgKind::FloatList => "a list of numbers",
        };
        f.write_str(name)
    }
}

/// A native argument, ready to cross the foreign boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Passed as `int`
    Int(c_int),
    /// Passed as `double`
    Float(f64),
    /// Passed as `const char *`
    Str(CString),
    /// Passed as `const int *`
    IntList(Vec<c_int>),
    /// Passed as `const double *`
    FloatList(Vec<f64>),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Int(v) => write!(f, "{v}"),
            Arg::Float(v) => write!(f, "{v}"),
            Arg::Str(s) => write!(f, "{:?}", s.to_string_lossy()),
            Arg::IntList(v) => write!(f, "{v:?}"),
            Arg::FloatList(v) => write!(f, "{v:?}"),
        }
    }
}

/// What a library entry point returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    /// An `int` status; negative means failure
    Status,
    /// A `double` measurement (label width, font size, ...)
    Measure,
}

/// The raw result of a forwarded call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Output {
    /// Integer status as returned by the library
    Status(i32),
    /// Floating point measurement as returned by the library
    Measure(f64),
}

impl Output {
    /// The status code, if this is a status result.
    pub const fn status(self) -> Option<i32> {
        match self {
            Output::Status(code) => Some(code),
            Output::Measure(_) => None,
        }
    }

    /// The result widened to `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Output::Status(code) => f64::from(code),
            Output::Measure(value) => value,
        }
    }

    /// Whether the library signalled failure (negative result).
    pub fn is_failure(self) -> bool {
        self.as_f64() < 0.0
    }
}

/// Conversion from a raw [`Output`] into the typed result of a forwarding method.
pub trait FromOutput: Sized {
    /// Convert, failing if the table entry declared a different return kind.
    fn from_output(op: &'static str, output: Output) -> PlotResult<Self>;
}

impl FromOutput for Output {
    fn from_output(_op: &'static str, output: Output) -> PlotResult<Self> {
        Ok(output)
    }
}

impl FromOutput for i32 {
    fn from_output(op: &'static str, output: Output) -> PlotResult<Self> {
        output
            .status()
            .ok_or(PlotError::UnsupportedSignature { op })
    }
}

impl FromOutput for f64 {
    fn from_output(op: &'static str, output: Output) -> PlotResult<Self> {
        match output {
            Output::Measure(value) => Ok(value),
            Output::Status(_) => Err(PlotError::UnsupportedSignature { op }),
        }
    }
}

/// Convert positional values to the native arguments `spec` declares.
///
/// Integers are accepted wherever a float is expected; floats are never
/// silently truncated into integer parameters.
pub fn marshal(spec: &OpSpec, values: &[Value]) -> PlotResult<Vec<Arg>> {
    let op = spec.name;
    if values.len() != spec.args.len() {
        return Err(PlotError::Arity {
            op,
            expected: spec.args.len(),
            actual: values.len(),
        });
    }

    let mut args = Vec::with_capacity(values.len());
    for (index, (kind, value)) in spec.args.iter().zip(values).enumerate() {
        let arg = match kind {
            ArgKind::Int => Arg::Int(to_c_int(op, index, *kind, value)?),
            ArgKind::Float => Arg::Float(to_f64(op, index, *kind, value)?),
            ArgKind::Str => Arg::Str(to_c_string(op, index, value)?),
            ArgKind::Char => Arg::Int(to_justification(op, index, value)?),
            ArgKind::Len => {
                let declared = to_c_int(op, index, *kind, value)?;
                let actual = match values.get(index + 1) {
                    Some(Value::List(items)) => items.len(),
                    _ => 0,
                };
                if i64::from(declared) != actual as i64 {
                    return Err(PlotError::LengthMismatch {
                        op,
                        declared: i64::from(declared),
                        actual,
                    });
                }
                Arg::Int(declared)
            }
            ArgKind::IntList => match value {
                Value::List(items) => Arg::IntList(
                    items
                        .iter()
                        .map(|item| to_c_int(op, index, *kind, item))
                        .collect::<PlotResult<_>>()?,
                ),
                other => return Err(type_error(op, index, *kind, other)),
            },
            ArgKind::FloatList => match value {
                Value::List(items) => Arg::FloatList(
                    items
                        .iter()
                        .map(|item| to_f64(op, index, *kind, item))
                        .collect::<PlotResult<_>>()?,
                ),
                other => return Err(type_error(op, index, *kind, other)),
            },
        };
        args.push(arg);
    }
    Ok(args)
}

fn type_error(op: &'static str, index: usize, expected: ArgKind, actual: &Value) -> PlotError {
    PlotError::ArgumentType {
        op,
        index,
        expected,
        actual: actual.type_name(),
    }
}

fn to_c_int(op: &'static str, index: usize, kind: ArgKind, value: &Value) -> PlotResult<c_int> {
    match value {
        Value::Int(v) => c_int::try_from(*v).map_err(|_| PlotError::OutOfRange {
            op,
            index,
            value: *v,
        }),
        other => Err(type_error(op, index, kind, other)),
    }
}

fn to_f64(op: &'static str, index: usize, kind: ArgKind, value: &Value) -> PlotResult<f64> {
    match value {
        Value::Float(v) => Ok(*v),
        Value::Int(v) => Ok(*v as f64),
        other => Err(type_error(op, index, kind, other)),
    }
}

fn to_c_string(op: &'static str, index: usize, value: &Value) -> PlotResult<CString> {
    match value {
        Value::Str(s) => CString::new(s.as_str()).map_err(|_| PlotError::InteriorNul { op }),
        other => Err(type_error(op, index, ArgKind::Str, other)),
    }
}

fn to_justification(op: &'static str, index: usize, value: &Value) -> PlotResult<c_int> {
    match value {
        Value::Str(s) if s.len() == 1 => Ok(c_int::from(s.as_bytes()[0])),
        Value::Int(_) => to_c_int(op, index, ArgKind::Char, value),
        other => Err(type_error(op, index, ArgKind::Char, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::lookup;

    #[test]
    fn test_float_parameters_accept_integers() {
        let spec = lookup("fmove").unwrap();
        let args = marshal(spec, &[Value::from(1), Value::from(0.5)]).unwrap();
        assert_eq!(args, vec![Arg::Float(1.0), Arg::Float(0.5)]);
    }

    #[test]
    fn test_int_parameters_reject_floats() {
        let spec = lookup("move").unwrap();
        let err = marshal(spec, &[Value::from(1), Value::from(0.5)]).unwrap_err();
        assert!(matches!(
            err,
            PlotError::ArgumentType {
                op: "move",
                index: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_int_out_of_range() {
        let spec = lookup("filltype").unwrap();
        let err = marshal(spec, &[Value::Int(i64::from(i32::MAX) + 1)]).unwrap_err();
        assert!(matches!(err, PlotError::OutOfRange { op: "filltype", .. }));
    }

    #[test]
    fn test_arity_is_checked() {
        let spec = lookup("fcircle").unwrap();
        let err = marshal(spec, &[Value::from(0.5), Value::from(0.5)]).unwrap_err();
        assert!(matches!(
            err,
            PlotError::Arity {
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_justification_characters() {
        let spec = lookup("alabel").unwrap();
        let args = marshal(spec, &['c'.into(), Value::from(i32::from(b'x')), "A".into()]).unwrap();
        assert_eq!(args[0], Arg::Int(c_int::from(b'c')));
        assert_eq!(args[1], Arg::Int(c_int::from(b'x')));
        assert_eq!(args[2], Arg::Str(CString::new("A").unwrap()));

        let err = marshal(spec, &["cc".into(), 'c'.into(), "A".into()]).unwrap_err();
        assert!(matches!(err, PlotError::ArgumentType { index: 0, .. }));
    }

    #[test]
    fn test_interior_nul_rejected() {
        let spec = lookup("label").unwrap();
        let err = marshal(spec, &["a\0b".into()]).unwrap_err();
        assert!(matches!(err, PlotError::InteriorNul { op: "label" }));
    }

    #[test]
    fn test_dash_list_length_must_match_count() {
        let spec = lookup("flinedash").unwrap();
        let dashes: &[f64] = &[0.1, 0.05];
        let args = marshal(spec, &[2.into(), dashes.into(), 0.0.into()]).unwrap();
        assert_eq!(args[1], Arg::FloatList(vec![0.1, 0.05]));

        let err = marshal(spec, &[3.into(), dashes.into(), 0.0.into()]).unwrap_err();
        assert!(matches!(
            err,
            PlotError::LengthMismatch {
                declared: 3,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_output_conversions() {
        assert_eq!(i32::from_output("erase", Output::Status(0)).unwrap(), 0);
        assert_eq!(
            f64::from_output("flabelwidth", Output::Measure(2.5)).unwrap(),
            2.5
        );
        assert!(f64::from_output("erase", Output::Status(0)).is_err());
        assert!(Output::Status(-1).is_failure());
        assert!(!Output::Measure(0.0).is_failure());
    }
}
