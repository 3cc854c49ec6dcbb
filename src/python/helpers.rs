//! Pythonic helpers on `rplot.Plotter`: colors by name or components,
//! dash patterns and `relative=` variants of the drawing primitives.

use super::PyPlotter;
use super::conversions::color_from_args;
use crate::plotter::Positioning;
use pyo3::prelude::*;

fn positioning(relative: bool) -> Positioning {
    if relative {
        Positioning::Relative
    } else {
        Positioning::Absolute
    }
}

#[pymethods]
impl PyPlotter {
    /// Pen color: `pen_color("red")`, `pen_color(0xffff, 0, 0)` or `pen_color((r, g, b))`.
    #[pyo3(signature = (red_or_name, green=None, blue=None))]
    fn pen_color(&mut self, red_or_name: &Bound<'_, PyAny>, green: Option<i32>, blue: Option<i32>) -> PyResult<i32> {
        let color = color_from_args(red_or_name, green, blue)?;
        self.with_session(|plotter, session| plotter.pen_color(session, color))
    }

    /// Fill color, in the same forms as `pen_color`.
    #[pyo3(signature = (red_or_name, green=None, blue=None))]
    fn fill_color(&mut self, red_or_name: &Bound<'_, PyAny>, green: Option<i32>, blue: Option<i32>) -> PyResult<i32> {
        let color = color_from_args(red_or_name, green, blue)?;
        self.with_session(|plotter, session| plotter.fill_color(session, color))
    }

    /// Pen and fill color together.
    #[pyo3(signature = (red_or_name, green=None, blue=None))]
    fn color(&mut self, red_or_name: &Bound<'_, PyAny>, green: Option<i32>, blue: Option<i32>) -> PyResult<i32> {
        let color = color_from_args(red_or_name, green, blue)?;
        self.with_session(|plotter, session| plotter.set_colors(session, color))
    }

    /// Background color; `erase=True` clears the page to it.
    #[pyo3(signature = (red_or_name, green=None, blue=None, *, erase=false))]
    fn bg_color(
        &mut self,
        red_or_name: &Bound<'_, PyAny>,
        green: Option<i32>,
        blue: Option<i32>,
        erase: bool,
    ) -> PyResult<i32> {
        let color = color_from_args(red_or_name, green, blue)?;
        self.with_session(|plotter, session| plotter.bg_color(session, color, erase))
    }

    /// Dash pattern in user units, starting `offset` into the pattern.
    #[pyo3(signature = (dashes, offset=0.0))]
    fn dashes(&mut self, dashes: Vec<f64>, offset: f64) -> PyResult<i32> {
        self.with_session(|plotter, session| plotter.dashes(session, &dashes, offset))
    }

    /// User coordinate window; `fspace` under a shorter name.
    ///
    /// The integer `space` stays reachable through `call("space", ...)`.
    fn space(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> PyResult<i32> {
        self.with_session(|plotter, session| plotter.fspace(session, x0, y0, x1, y1))
    }

    /// Move the current point.
    #[pyo3(signature = (x, y, *, relative=false))]
    fn move_to(&mut self, x: f64, y: f64, relative: bool) -> PyResult<i32> {
        self.with_session(|plotter, session| plotter.move_to(session, positioning(relative), x, y))
    }

    /// Continue the path to a point.
    #[pyo3(signature = (x, y, *, relative=false))]
    fn cont_to(&mut self, x: f64, y: f64, relative: bool) -> PyResult<i32> {
        self.with_session(|plotter, session| plotter.cont_to(session, positioning(relative), x, y))
    }

    /// Plot a single point.
    #[pyo3(signature = (x, y, *, relative=false))]
    fn point_at(&mut self, x: f64, y: f64, relative: bool) -> PyResult<i32> {
        self.with_session(|plotter, session| plotter.point_at(session, positioning(relative), x, y))
    }

    /// Line segment.
    #[pyo3(signature = (x0, y0, x1, y1, *, relative=false))]
    fn segment(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, relative: bool) -> PyResult<i32> {
        self.with_session(|plotter, session| plotter.segment(session, positioning(relative), (x0, y0), (x1, y1)))
    }

    /// Axis-aligned box between two corners.
    #[pyo3(signature = (x0, y0, x1, y1, *, relative=false))]
    fn rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, relative: bool) -> PyResult<i32> {
        self.with_session(|plotter, session| plotter.rect(session, positioning(relative), (x0, y0), (x1, y1)))
    }

    #[pyo3(signature = (xc, yc, r, *, relative=false))]
    fn circle_at(&mut self, xc: f64, yc: f64, r: f64, relative: bool) -> PyResult<i32> {
        self.with_session(|plotter, session| plotter.circle_at(session, positioning(relative), (xc, yc), r))
    }

    /// Circular arc from `(x0, y0)` to `(x1, y1)` around `(xc, yc)`.
    #[pyo3(signature = (xc, yc, x0, y0, x1, y1, *, relative=false))]
    #[allow(clippy::too_many_arguments)]
    fn arc_at(&mut self, xc: f64, yc: f64, x0: f64, y0: f64, x1: f64, y1: f64, relative: bool) -> PyResult<i32> {
        self.with_session(|plotter, session| {
            plotter.arc_at(session, positioning(relative), (xc, yc), (x0, y0), (x1, y1))
        })
    }

    /// Elliptic arc through three control points.
    #[pyo3(signature = (xc, yc, x0, y0, x1, y1, *, relative=false))]
    #[allow(clippy::too_many_arguments)]
    fn ellarc_at(&mut self, xc: f64, yc: f64, x0: f64, y0: f64, x1: f64, y1: f64, relative: bool) -> PyResult<i32> {
        self.with_session(|plotter, session| {
            plotter.ellarc_at(session, positioning(relative), (xc, yc), (x0, y0), (x1, y1))
        })
    }

    #[pyo3(signature = (xc, yc, rx, ry, angle, *, relative=false))]
    fn ellipse_at(&mut self, xc: f64, yc: f64, rx: f64, ry: f64, angle: f64, relative: bool) -> PyResult<i32> {
        self.with_session(|plotter, session| {
            plotter.ellipse_at(session, positioning(relative), (xc, yc), (rx, ry), angle)
        })
    }

    /// Quadratic Bezier from `(x0, y0)` to `(x2, y2)`.
    #[pyo3(signature = (x0, y0, x1, y1, x2, y2, *, relative=false))]
    #[allow(clippy::too_many_arguments)]
    fn quad_bezier(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64, relative: bool) -> PyResult<i32> {
        self.with_session(|plotter, session| {
            plotter.quad_bezier(session, positioning(relative), [(x0, y0), (x1, y1), (x2, y2)])
        })
    }

    /// Cubic Bezier from `(x0, y0)` to `(x3, y3)`.
    #[pyo3(signature = (x0, y0, x1, y1, x2, y2, x3, y3, *, relative=false))]
    #[allow(clippy::too_many_arguments)]
    fn cubic_bezier(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        relative: bool,
    ) -> PyResult<i32> {
        self.with_session(|plotter, session| {
            plotter.cubic_bezier(session, positioning(relative), [(x0, y0), (x1, y1), (x2, y2), (x3, y3)])
        })
    }

    /// Marker symbol `kind` of `size` user units.
    #[pyo3(signature = (x, y, kind, size, *, relative=false))]
    fn marker_at(&mut self, x: f64, y: f64, kind: i32, size: f64, relative: bool) -> PyResult<i32> {
        self.with_session(|plotter, session| plotter.marker_at(session, positioning(relative), (x, y), kind, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{Recorder, RecordingLibrary};
    use crate::python::SelectionError;
    use crate::{Context, Plotter};
    use pyo3::types::{PyInt, PyString, PyTuple};

    fn recording_plotter() -> (PyPlotter, Recorder) {
        let library = RecordingLibrary::new();
        let recorder = library.recorder();
        let context = Context::new(library);
        let mut session = context.lock();
        let mut inner = Plotter::create(&mut session, "svg").unwrap();
        inner.open(&mut session).unwrap();
        drop(session);
        (PyPlotter { inner }, recorder)
    }

    fn ops(recorder: &Recorder) -> Vec<&'static str> {
        recorder.invocations().into_iter().map(|(_, op)| op).collect()
    }

    #[test]
    fn test_colors_accept_names_and_components() {
        pyo3::prepare_freethreaded_python();
        let (mut plotter, recorder) = recording_plotter();
        Python::with_gil(|py| {
            let name = PyString::new(py, "red").into_any();
            let red = PyInt::new(py, 0xffff).into_any();
            let triple = PyTuple::new(py, [0, 0xffff, 0]).unwrap().into_any();

            plotter.pen_color(&name, None, None).unwrap();
            plotter.pen_color(&red, Some(0), Some(0)).unwrap();
            plotter.fill_color(&triple, None, None).unwrap();
            plotter.color(&name, None, None).unwrap();
            plotter.bg_color(&name, None, None, true).unwrap();

            assert!(plotter.pen_color(&red, Some(0), None).is_err());
            assert!(plotter.pen_color(&red, None, None).is_err());
        });
        assert_eq!(
            ops(&recorder),
            ["openpl", "pencolorname", "pencolor", "fillcolor", "colorname", "bgcolorname", "erase"]
        );
    }

    #[test]
    fn test_relative_flag_selects_the_rel_variant() {
        let (mut plotter, recorder) = recording_plotter();
        plotter.space(0.0, 0.0, 1.0, 1.0).unwrap();
        plotter.dashes(vec![0.1, 0.05], 0.0).unwrap();
        plotter.move_to(0.5, 0.5, false).unwrap();
        plotter.cont_to(0.1, 0.1, true).unwrap();
        plotter.segment(0.0, 0.0, 1.0, 1.0, true).unwrap();
        plotter.rect(0.1, 0.1, 0.2, 0.2, false).unwrap();
        plotter.circle_at(0.5, 0.5, 0.1, true).unwrap();
        plotter.ellipse_at(0.5, 0.5, 0.2, 0.1, 45.0, false).unwrap();
        plotter.quad_bezier(0.0, 0.0, 0.5, 1.0, 1.0, 0.0, true).unwrap();
        plotter.cubic_bezier(0.0, 0.0, 0.2, 1.0, 0.8, 1.0, 1.0, 0.0, false).unwrap();
        plotter.marker_at(0.5, 0.5, 3, 0.05, true).unwrap();

        assert_eq!(
            ops(&recorder),
            [
                "openpl",
                "fspace",
                "flinedash",
                "fmove",
                "fcontrel",
                "flinerel",
                "fbox",
                "fcirclerel",
                "fellipse",
                "fbezier2rel",
                "fbezier3",
                "fmarkerrel",
            ]
        );
    }

    #[test]
    fn test_helpers_after_delete_raise_selection_error() {
        pyo3::prepare_freethreaded_python();
        let (mut plotter, _recorder) = recording_plotter();
        plotter.delete().unwrap();
        let err = plotter.move_to(0.0, 0.0, false).unwrap_err();
        Python::with_gil(|py| assert!(err.is_instance_of::<SelectionError>(py)));
    }
}
