//! Output backends understood by libplot.

use std::fmt;
use std::str::FromStr;

/// A libplot plotter type.
///
/// Plotter construction takes any string, so backends added to the library
/// later remain reachable; this enum only names the ones libplot ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Window on an X Window System display
    X,
    /// An existing X drawable supplied through the `XDRAWABLE_*` parameters
    Xdrawable,
    /// PNG image
    Png,
    /// Portable anymap (PBM/PGM/PPM)
    Pnm,
    /// Pseudo-GIF, optionally animated
    Gif,
    /// Scalable Vector Graphics
    Svg,
    /// Adobe Illustrator
    Ai,
    /// Idraw-editable PostScript
    Ps,
    /// WebCGM
    Cgm,
    /// Xfig
    Fig,
    /// PCL 5
    Pcl,
    /// HP-GL/2
    Hpgl,
    /// ReGIS terminal graphics
    Regis,
    /// Tektronix 4014
    Tek,
    /// GNU graphics metafile
    Meta,
}

impl BackendKind {
    /// Every backend libplot ships.
    pub const ALL: [BackendKind; 15] = [
        BackendKind::X,
        BackendKind::Xdrawable,
        BackendKind::Png,
        BackendKind::Pnm,
        BackendKind::Gif,
        BackendKind::Svg,
        BackendKind::Ai,
        BackendKind::Ps,
        BackendKind::Cgm,
        BackendKind::Fig,
        BackendKind::Pcl,
        BackendKind::Hpgl,
        BackendKind::Regis,
        BackendKind::Tek,
        BackendKind::Meta,
    ];

    /// The type string `pl_newpl` expects.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BackendKind::X => "X",
            BackendKind::Xdrawable => "Xdrawable",
            BackendKind::Png => "png",
            BackendKind::Pnm => "pnm",
            BackendKind::Gif => "gif",
            BackendKind::Svg => "svg",
            BackendKind::Ai => "ai",
            BackendKind::Ps => "ps",
            BackendKind::Cgm => "cgm",
            BackendKind::Fig => "fig",
            BackendKind::Pcl => "pcl",
            BackendKind::Hpgl => "hpgl",
            BackendKind::Regis => "regis",
            BackendKind::Tek => "tek",
            BackendKind::Meta => "meta",
        }
    }

    /// Whether the backend draws into a window rather than onto the output stream.
    pub const fn is_interactive(&self) -> bool {
        matches!(self, BackendKind::X)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for BackendKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BackendKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown plotter type '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for kind in BackendKind::ALL {
            assert_eq!(kind.as_str().parse::<BackendKind>().unwrap(), kind);
        }
        assert_eq!("SVG".parse::<BackendKind>().unwrap(), BackendKind::Svg);
        assert_eq!("x".parse::<BackendKind>().unwrap(), BackendKind::X);
        assert_eq!(
            "Xdrawable".parse::<BackendKind>().unwrap(),
            BackendKind::Xdrawable
        );
        assert!(!BackendKind::Xdrawable.is_interactive());
        assert!("tiff".parse::<BackendKind>().is_err());
    }
}
