//! Higher-level helpers layered on the forwarding methods.

use super::Plotter;
use crate::context::Session;
use crate::error::{PlotError, PlotResult};
use crate::value::{FromOutput, Value};
use std::borrow::Cow;

/// A color given either as 16-bit RGB components or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    /// Components in `0..=0xffff`
    Rgb(i32, i32, i32),
    /// Any name libplot recognises (`"red"`, `"#ff0000"`, ...)
    Named(String),
}

impl From<(i32, i32, i32)> for Color {
    fn from((red, green, blue): (i32, i32, i32)) -> Self {
        Color::Rgb(red, green, blue)
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Color::Named(name.to_owned())
    }
}

impl From<String> for Color {
    fn from(name: String) -> Self {
        Color::Named(name)
    }
}

/// Whether coordinates are absolute or relative to the current point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Positioning {
    /// User coordinates
    #[default]
    Absolute,
    /// Offsets from the current point
    Relative,
}

impl Positioning {
    fn op_name(self, base: &'static str) -> Cow<'static, str> {
        match self {
            Positioning::Absolute => Cow::Borrowed(base),
            Positioning::Relative => Cow::Owned(format!("{base}rel")),
        }
    }
}

impl Plotter {
    fn set_color(&self, session: &mut Session<'_>, op: &'static str, color: Color) -> PlotResult<i32> {
        match color {
            Color::Rgb(red, green, blue) => {
                let output = self.call(session, op, &[red.into(), green.into(), blue.into()])?;
                i32::from_output(op, output)
            }
            Color::Named(name) => {
                let op = match op {
                    "pencolor" => "pencolorname",
                    "fillcolor" => "fillcolorname",
                    "bgcolor" => "bgcolorname",
                    _ => "colorname",
                };
                let output = self.call(session, op, &[Value::Str(name)])?;
                i32::from_output(op, output)
            }
        }
    }

    /// Pen color, by components or name.
    pub fn pen_color(&self, session: &mut Session<'_>, color: impl Into<Color>) -> PlotResult<i32> {
        self.set_color(session, "pencolor", color.into())
    }

    /// Fill color, by components or name.
    pub fn fill_color(&self, session: &mut Session<'_>, color: impl Into<Color>) -> PlotResult<i32> {
        self.set_color(session, "fillcolor", color.into())
    }

    /// Pen and fill color together.
    pub fn set_colors(&self, session: &mut Session<'_>, color: impl Into<Color>) -> PlotResult<i32> {
        self.set_color(session, "color", color.into())
    }

    /// Background color; with `erase` the page is cleared to it straight away.
    pub fn bg_color(&self, session: &mut Session<'_>, color: impl Into<Color>, erase: bool) -> PlotResult<i32> {
        let code = self.set_color(session, "bgcolor", color.into())?;
        if erase && code >= 0 {
            return self.erase(session);
        }
        Ok(code)
    }

    /// Dash pattern in user units.
    pub fn dashes(&self, session: &mut Session<'_>, dashes: &[f64], offset: f64) -> PlotResult<i32> {
        let n = i32::try_from(dashes.len()).map_err(|_| PlotError::OutOfRange {
            op: "flinedash",
            index: 0,
            value: dashes.len() as i64,
        })?;
        self.flinedash(session, n, dashes, offset)
    }

    fn positioned(
        &self,
        session: &mut Session<'_>,
        positioning: Positioning,
        base: &'static str,
        args: &[Value],
    ) -> PlotResult<i32> {
        let name = positioning.op_name(base);
        let output = self.call(session, &name, args)?;
        i32::from_output(base, output)
    }

    /// `fmove` or `fmoverel`.
    pub fn move_to(&self, session: &mut Session<'_>, positioning: Positioning, x: f64, y: f64) -> PlotResult<i32> {
        self.positioned(session, positioning, "fmove", &[x.into(), y.into()])
    }

    /// `fcont` or `fcontrel`.
    pub fn cont_to(&self, session: &mut Session<'_>, positioning: Positioning, x: f64, y: f64) -> PlotResult<i32> {
        self.positioned(session, positioning, "fcont", &[x.into(), y.into()])
    }

    /// `fpoint` or `fpointrel`.
    pub fn point_at(&self, session: &mut Session<'_>, positioning: Positioning, x: f64, y: f64) -> PlotResult<i32> {
        self.positioned(session, positioning, "fpoint", &[x.into(), y.into()])
    }

    /// `fline` or `flinerel`.
    pub fn segment(
        &self,
        session: &mut Session<'_>,
        positioning: Positioning,
        from: (f64, f64),
        to: (f64, f64),
    ) -> PlotResult<i32> {
        self.positioned(
            session,
            positioning,
            "fline",
            &[from.0.into(), from.1.into(), to.0.into(), to.1.into()],
        )
    }

    /// `fbox` or `fboxrel`.
    pub fn rect(
        &self,
        session: &mut Session<'_>,
        positioning: Positioning,
        corner: (f64, f64),
        opposite: (f64, f64),
    ) -> PlotResult<i32> {
        self.positioned(
            session,
            positioning,
            "fbox",
            &[corner.0.into(), corner.1.into(), opposite.0.into(), opposite.1.into()],
        )
    }

    /// `fcircle` or `fcirclerel`.
    pub fn circle_at(
        &self,
        session: &mut Session<'_>,
        positioning: Positioning,
        center: (f64, f64),
        radius: f64,
    ) -> PlotResult<i32> {
        self.positioned(
            session,
            positioning,
            "fcircle",
            &[center.0.into(), center.1.into(), radius.into()],
        )
    }

    /// `farc` or `farcrel`.
    pub fn arc_at(
        &self,
        session: &mut Session<'_>,
        positioning: Positioning,
        center: (f64, f64),
        start: (f64, f64),
        end: (f64, f64),
    ) -> PlotResult<i32> {
        self.positioned(session, positioning, "farc", &points(&[center, start, end]))
    }

    /// `fellarc` or `fellarcrel`.
    pub fn ellarc_at(
        &self,
        session: &mut Session<'_>,
        positioning: Positioning,
        center: (f64, f64),
        start: (f64, f64),
        end: (f64, f64),
    ) -> PlotResult<i32> {
        self.positioned(session, positioning, "fellarc", &points(&[center, start, end]))
    }

    /// `fellipse` or `fellipserel`.
    pub fn ellipse_at(
        &self,
        session: &mut Session<'_>,
        positioning: Positioning,
        center: (f64, f64),
        radii: (f64, f64),
        angle: f64,
    ) -> PlotResult<i32> {
        self.positioned(
            session,
            positioning,
            "fellipse",
            &[center.0.into(), center.1.into(), radii.0.into(), radii.1.into(), angle.into()],
        )
    }

    /// `fbezier2` or `fbezier2rel`.
    pub fn quad_bezier(
        &self,
        session: &mut Session<'_>,
        positioning: Positioning,
        controls: [(f64, f64); 3],
    ) -> PlotResult<i32> {
        self.positioned(session, positioning, "fbezier2", &points(&controls))
    }

    /// `fbezier3` or `fbezier3rel`.
    pub fn cubic_bezier(
        &self,
        session: &mut Session<'_>,
        positioning: Positioning,
        controls: [(f64, f64); 4],
    ) -> PlotResult<i32> {
        self.positioned(session, positioning, "fbezier3", &points(&controls))
    }

    /// `fmarker` or `fmarkerrel`.
    pub fn marker_at(
        &self,
        session: &mut Session<'_>,
        positioning: Positioning,
        at: (f64, f64),
        kind: i32,
        size: f64,
    ) -> PlotResult<i32> {
        self.positioned(
            session,
            positioning,
            "fmarker",
            &[at.0.into(), at.1.into(), kind.into(), size.into()],
        )
    }
}

fn points(points: &[(f64, f64)]) -> Vec<Value> {
    points
        .iter()
        .flat_map(|&(x, y)| [Value::Float(x), Value::Float(y)])
        .collect()
}
