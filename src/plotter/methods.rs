//! Typed forwarding methods, one per table entry.
//!
//! Each method is a thin shell over [`Plotter::call`]: the arguments become
//! [`Value`]s, go through the same marshaling and selection as a dynamic call,
//! and the raw result comes back as `i32` (status) or `f64` (measure).
//! Integer-coordinate variants work in device space, `f`-prefixed ones in
//! user space; `rel` variants are relative to the current point.

use super::Plotter;
use crate::context::Session;
use crate::error::PlotResult;
use crate::value::{FromOutput, Value};

macro_rules! forward {
    ($($(#[$meta:meta])* $method:ident = $op:literal ($($arg:ident: $ty:ty),*) -> $ret:ty;)*) => {
        impl Plotter {
            $(
                $(#[$meta])*
                pub fn $method(&self, session: &mut Session<'_>, $($arg: $ty),*) -> PlotResult<$ret> {
                    let output = self.call(session, $op, &[$(Value::from($arg)),*])?;
                    <$ret as FromOutput>::from_output($op, output)
                }
            )*
        }
    };
}

// Control
forward! {
    /// Set the background color from 16-bit RGB components.
    bgcolor = "bgcolor"(red: i32, green: i32, blue: i32) -> i32;
    /// Set the background color by name.
    bgcolorname = "bgcolorname"(name: &str) -> i32;
    /// Erase the page.
    erase = "erase"() -> i32;
    /// Map the user rectangle `(x0, y0)-(x1, y1)` onto the device's viewport.
    space = "space"(x0: i32, y0: i32, x1: i32, y1: i32) -> i32;
    /// Floating point `space`.
    fspace = "fspace"(x0: f64, y0: f64, x1: f64, y1: f64) -> i32;
    /// Map an affinely transformed parallelogram onto the viewport.
    space2 = "space2"(x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32) -> i32;
    /// Floating point `space2`.
    fspace2 = "fspace2"(x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> i32;
    /// Query a capability: 0 unsupported, 1 supported, 2 partially supported.
    havecap = "havecap"(capability: &str) -> i32;
    /// Flush pending output.
    flushpl = "flushpl"() -> i32;
}

// Drawing
forward! {
    /// Draw a justified label at the current point.
    alabel = "alabel"(horizontal: char, vertical: char, text: &str) -> i32;
    /// Circular arc centered at `(xc, yc)` from `(x0, y0)` to `(x1, y1)`.
    arc = "arc"(xc: i32, yc: i32, x0: i32, y0: i32, x1: i32, y1: i32) -> i32;
    /// Floating point `arc`.
    farc = "farc"(xc: f64, yc: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> i32;
    /// Relative `arc`.
    arcrel = "arcrel"(xc: i32, yc: i32, x0: i32, y0: i32, x1: i32, y1: i32) -> i32;
    /// Relative `farc`.
    farcrel = "farcrel"(xc: f64, yc: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> i32;
    /// Quadratic Bezier curve.
    bezier2 = "bezier2"(x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32) -> i32;
    /// Floating point `bezier2`.
    fbezier2 = "fbezier2"(x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> i32;
    /// Relative `bezier2`.
    bezier2rel = "bezier2rel"(x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32) -> i32;
    /// Relative `fbezier2`.
    fbezier2rel = "fbezier2rel"(x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> i32;
    /// Cubic Bezier curve.
    bezier3 = "bezier3"(x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32, x3: i32, y3: i32) -> i32;
    /// Floating point `bezier3`.
    fbezier3 = "fbezier3"(x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> i32;
    /// Relative `bezier3`.
    bezier3rel = "bezier3rel"(x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32, x3: i32, y3: i32) -> i32;
    /// Relative `fbezier3`.
    fbezier3rel = "fbezier3rel"(x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> i32;
    /// Axis-aligned box with corners `(x0, y0)` and `(x1, y1)`.
    r#box = "box"(x0: i32, y0: i32, x1: i32, y1: i32) -> i32;
    /// Floating point `box`.
    fbox = "fbox"(x0: f64, y0: f64, x1: f64, y1: f64) -> i32;
    /// Relative `box`.
    boxrel = "boxrel"(x0: i32, y0: i32, x1: i32, y1: i32) -> i32;
    /// Relative `fbox`.
    fboxrel = "fboxrel"(x0: f64, y0: f64, x1: f64, y1: f64) -> i32;
    /// Circle of radius `r`.
    circle = "circle"(xc: i32, yc: i32, r: i32) -> i32;
    /// Floating point `circle`.
    fcircle = "fcircle"(xc: f64, yc: f64, r: f64) -> i32;
    /// Relative `circle`.
    circlerel = "circlerel"(xc: i32, yc: i32, r: i32) -> i32;
    /// Relative `fcircle`.
    fcirclerel = "fcirclerel"(xc: f64, yc: f64, r: f64) -> i32;
    /// Continue the path with a line segment to `(x, y)`.
    cont = "cont"(x: i32, y: i32) -> i32;
    /// Floating point `cont`.
    fcont = "fcont"(x: f64, y: f64) -> i32;
    /// Relative `cont`.
    contrel = "contrel"(x: i32, y: i32) -> i32;
    /// Relative `fcont`.
    fcontrel = "fcontrel"(x: f64, y: f64) -> i32;
    /// Elliptic arc through a quarter ellipse.
    ellarc = "ellarc"(xc: i32, yc: i32, x0: i32, y0: i32, x1: i32, y1: i32) -> i32;
    /// Floating point `ellarc`.
    fellarc = "fellarc"(xc: f64, yc: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> i32;
    /// Relative `ellarc`.
    ellarcrel = "ellarcrel"(xc: i32, yc: i32, x0: i32, y0: i32, x1: i32, y1: i32) -> i32;
    /// Relative `fellarc`.
    fellarcrel = "fellarcrel"(xc: f64, yc: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> i32;
    /// Ellipse with semi-axes `rx`, `ry` rotated by `angle` degrees.
    ellipse = "ellipse"(xc: i32, yc: i32, rx: i32, ry: i32, angle: i32) -> i32;
    /// Floating point `ellipse`.
    fellipse = "fellipse"(xc: f64, yc: f64, rx: f64, ry: f64, angle: f64) -> i32;
    /// Relative `ellipse`.
    ellipserel = "ellipserel"(xc: i32, yc: i32, rx: i32, ry: i32, angle: i32) -> i32;
    /// Relative `fellipse`.
    fellipserel = "fellipserel"(xc: f64, yc: f64, rx: f64, ry: f64, angle: f64) -> i32;
    /// End the current path.
    endpath = "endpath"() -> i32;
    /// End the current subpath of a compound path.
    endsubpath = "endsubpath"() -> i32;
    /// Close the current subpath.
    closepath = "closepath"() -> i32;
    /// Draw a label, left-justified at the current point.
    label = "label"(text: &str) -> i32;
    /// Width of a label in device units.
    labelwidth = "labelwidth"(text: &str) -> i32;
    /// Width of a label in user units.
    flabelwidth = "flabelwidth"(text: &str) -> f64;
    /// Line segment from `(x0, y0)` to `(x1, y1)`.
    line = "line"(x0: i32, y0: i32, x1: i32, y1: i32) -> i32;
    /// Floating point `line`.
    fline = "fline"(x0: f64, y0: f64, x1: f64, y1: f64) -> i32;
    /// Relative `line`.
    linerel = "linerel"(x0: i32, y0: i32, x1: i32, y1: i32) -> i32;
    /// Relative `fline`.
    flinerel = "flinerel"(x0: f64, y0: f64, x1: f64, y1: f64) -> i32;
    /// Marker symbol `kind` of the given size.
    marker = "marker"(x: i32, y: i32, kind: i32, size: i32) -> i32;
    /// Floating point `marker`.
    fmarker = "fmarker"(x: f64, y: f64, kind: i32, size: f64) -> i32;
    /// Relative `marker`.
    markerrel = "markerrel"(x: i32, y: i32, kind: i32, size: i32) -> i32;
    /// Relative `fmarker`.
    fmarkerrel = "fmarkerrel"(x: f64, y: f64, kind: i32, size: f64) -> i32;
    /// Single point.
    point = "point"(x: i32, y: i32) -> i32;
    /// Floating point `point`.
    fpoint = "fpoint"(x: f64, y: f64) -> i32;
    /// Relative `point`.
    pointrel = "pointrel"(x: i32, y: i32) -> i32;
    /// Relative `fpoint`.
    fpointrel = "fpointrel"(x: f64, y: f64) -> i32;
}

// Attributes
forward! {
    /// Cap style: `butt`, `round`, `projecting` or `triangular`.
    capmod = "capmod"(style: &str) -> i32;
    /// Set pen and fill color at once.
    color = "color"(red: i32, green: i32, blue: i32) -> i32;
    /// Set pen and fill color by name.
    colorname = "colorname"(name: &str) -> i32;
    /// Fill color from 16-bit RGB components.
    fillcolor = "fillcolor"(red: i32, green: i32, blue: i32) -> i32;
    /// Fill color by name.
    fillcolorname = "fillcolorname"(name: &str) -> i32;
    /// Fill rule: `even-odd`, `nonzero-winding`, ...
    fillmod = "fillmod"(rule: &str) -> i32;
    /// Fill desaturation level; 0 disables filling.
    filltype = "filltype"(level: i32) -> i32;
    /// Miter limit for joins.
    fmiterlimit = "fmiterlimit"(limit: f64) -> i32;
    /// Select a font by name.
    fontname = "fontname"(name: &str) -> i32;
    /// Select a font by name, returning the resulting size.
    ffontname = "ffontname"(name: &str) -> f64;
    /// Font size in device units.
    fontsize = "fontsize"(size: i32) -> i32;
    /// Font size in user units, returning the size actually used.
    ffontsize = "ffontsize"(size: f64) -> f64;
    /// Join style: `miter`, `round`, `bevel` or `triangular`.
    joinmod = "joinmod"(style: &str) -> i32;
    /// Dash pattern in device units; `n` must equal `dashes.len()`.
    linedash = "linedash"(n: i32, dashes: &[i32], offset: i32) -> i32;
    /// Dash pattern in user units; `n` must equal `dashes.len()`.
    flinedash = "flinedash"(n: i32, dashes: &[f64], offset: f64) -> i32;
    /// Line style: `solid`, `dotted`, `dotdashed`, ...
    linemod = "linemod"(style: &str) -> i32;
    /// Line width in device units.
    linewidth = "linewidth"(width: i32) -> i32;
    /// Line width in user units.
    flinewidth = "flinewidth"(width: f64) -> i32;
    /// Move the current point.
    r#move = "move"(x: i32, y: i32) -> i32;
    /// Floating point `move`.
    fmove = "fmove"(x: f64, y: f64) -> i32;
    /// Relative `move`.
    moverel = "moverel"(x: i32, y: i32) -> i32;
    /// Relative `fmove`.
    fmoverel = "fmoverel"(x: f64, y: f64) -> i32;
    /// Direction of closed primitives: 1 counterclockwise, -1 clockwise.
    orientation = "orientation"(direction: i32) -> i32;
    /// Pen color from 16-bit RGB components.
    pencolor = "pencolor"(red: i32, green: i32, blue: i32) -> i32;
    /// Pen color by name.
    pencolorname = "pencolorname"(name: &str) -> i32;
    /// Pen type; 0 draws nothing.
    pentype = "pentype"(level: i32) -> i32;
    /// Pop the drawing state.
    restorestate = "restorestate"() -> i32;
    /// Push the drawing state.
    savestate = "savestate"() -> i32;
    /// Text angle in degrees.
    textangle = "textangle"(angle: i32) -> i32;
    /// Text angle in degrees, returning the font size.
    ftextangle = "ftextangle"(angle: f64) -> f64;
}

// Mapping
forward! {
    /// Premultiply the user-to-device map by a general affine transform.
    fconcat = "fconcat"(m0: f64, m1: f64, m2: f64, m3: f64, tx: f64, ty: f64) -> i32;
    /// Rotate the user frame by `theta` degrees.
    frotate = "frotate"(theta: f64) -> i32;
    /// Scale the user frame.
    fscale = "fscale"(sx: f64, sy: f64) -> i32;
    /// Translate the user frame.
    ftranslate = "ftranslate"(tx: f64, ty: f64) -> i32;
    /// Replace the user-to-NDC map.
    fsetmatrix = "fsetmatrix"(m0: f64, m1: f64, m2: f64, m3: f64, tx: f64, ty: f64) -> i32;
}
