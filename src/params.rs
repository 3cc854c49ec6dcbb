//! Process-wide plotter parameters.
//!
//! libplot reads these when a plotter is created, so they must be set before
//! construction. Values are always passed as strings.

use std::fmt;
use std::str::FromStr;

/// Parameter names recognised by libplot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum PlotParam {
    BgColor,
    BitmapSize,
    Display,
    EmulateColor,
    GifAnimation,
    GifDelay,
    GifIterations,
    HpglAssignColors,
    HpglOpaqueMode,
    HpglPens,
    HpglRotate,
    HpglVersion,
    Interlace,
    MaxLineLength,
    MetaPortable,
    PageSize,
    PclAssignColors,
    PclBeziers,
    PnmPortable,
    Rotation,
    Term,
    TransparentColor,
    UseDoubleBuffering,
    VanishOnDelete,
    XAutoFlush,
}

impl PlotParam {
    /// Every known parameter.
    pub const ALL: [PlotParam; 25] = [
        PlotParam::BgColor,
        PlotParam::BitmapSize,
        PlotParam::Display,
        PlotParam::EmulateColor,
        PlotParam::GifAnimation,
        PlotParam::GifDelay,
        PlotParam::GifIterations,
        PlotParam::HpglAssignColors,
        PlotParam::HpglOpaqueMode,
        PlotParam::HpglPens,
        PlotParam::HpglRotate,
        PlotParam::HpglVersion,
        PlotParam::Interlace,
        PlotParam::MaxLineLength,
        PlotParam::MetaPortable,
        PlotParam::PageSize,
        PlotParam::PclAssignColors,
        PlotParam::PclBeziers,
        PlotParam::PnmPortable,
        PlotParam::Rotation,
        PlotParam::Term,
        PlotParam::TransparentColor,
        PlotParam::UseDoubleBuffering,
        PlotParam::VanishOnDelete,
        PlotParam::XAutoFlush,
    ];

    /// The name `pl_parampl` expects.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PlotParam::BgColor => "BG_COLOR",
            PlotParam::BitmapSize => "BITMAPSIZE",
            PlotParam::Display => "DISPLAY",
            PlotParam::EmulateColor => "EMULATE_COLOR",
            PlotParam::GifAnimation => "GIF_ANIMATION",
            PlotParam::GifDelay => "GIF_DELAY",
            PlotParam::GifIterations => "GIF_ITERATIONS",
            PlotParam::HpglAssignColors => "HPGL_ASSIGN_COLORS",
            PlotParam::HpglOpaqueMode => "HPGL_OPAQUE_MODE",
            PlotParam::HpglPens => "HPGL_PENS",
            PlotParam::HpglRotate => "HPGL_ROTATE",
            PlotParam::HpglVersion => "HPGL_VERSION",
            PlotParam::Interlace => "INTERLACE",
            PlotParam::MaxLineLength => "MAX_LINE_LENGTH",
            PlotParam::MetaPortable => "META_PORTABLE",
            PlotParam::PageSize => "PAGESIZE",
            PlotParam::PclAssignColors => "PCL_ASSIGN_COLORS",
            PlotParam::PclBeziers => "PCL_BEZIERS",
            PlotParam::PnmPortable => "PNM_PORTABLE",
            PlotParam::Rotation => "ROTATION",
            PlotParam::Term => "TERM",
            PlotParam::TransparentColor => "TRANSPARENT_COLOR",
            PlotParam::UseDoubleBuffering => "USE_DOUBLE_BUFFERING",
            PlotParam::VanishOnDelete => "VANISH_ON_DELETE",
            PlotParam::XAutoFlush => "X_AUTO_FLUSH",
        }
    }
}

impl fmt::Display for PlotParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for PlotParam {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for PlotParam {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize_param_name(s);
        PlotParam::ALL
            .into_iter()
            .find(|param| param.as_str() == name)
            .ok_or_else(|| format!("unknown plotter parameter '{s}'"))
    }
}

/// Uppercase a parameter name, so `bg_color` and `BG_COLOR` are the same key.
pub fn normalize_param_name(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}
