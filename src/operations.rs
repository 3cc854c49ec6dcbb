//! The declarative table of library entry points.
//!
//! Every forwarded operation is described once here: its name, the native
//! kinds of its positional parameters and what it returns. Marshaling, the
//! native dispatcher, the typed forwarding methods and the Python attribute
//! lookup are all driven by this table.

use crate::value::{ArgKind, ReturnKind};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Coarse grouping of operations, following libplot's own documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Begins or ends a page (`openpl`, `closepl`); only reachable through the facade
    Lifecycle,
    /// Page setup and output control
    Control,
    /// Draws objects or path segments
    Drawing,
    /// Sets drawing attributes
    Attribute,
    /// Modifies the user-to-device affine map
    Mapping,
}

/// One entry point of the plotting library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpSpec {
    /// Name without the `pl_` prefix
    pub name: &'static str,
    /// Positional parameter kinds, in native order
    pub args: &'static [ArgKind],
    /// Native return type
    pub returns: ReturnKind,
    /// Documentation grouping
    pub category: Category,
}

impl OpSpec {
    /// Number of positional parameters.
    pub const fn arity(&self) -> usize {
        self.args.len()
    }

    /// The exported C symbol.
    pub fn symbol(&self) -> String {
        format!("pl_{}", self.name)
    }
}

use ArgKind::{Char, Float as F, FloatList, Int as I, IntList, Len, Str};
use Category::{Attribute, Control, Drawing, Lifecycle, Mapping};
use ReturnKind::{Measure, Status};

const fn op(
    name: &'static str,
    args: &'static [ArgKind],
    returns: ReturnKind,
    category: Category,
) -> OpSpec {
    OpSpec {
        name,
        args,
        returns,
        category,
    }
}

const NONE: &[ArgKind] = &[];
const I1: &[ArgKind] = &[I];
const I2: &[ArgKind] = &[I, I];
const I3: &[ArgKind] = &[I, I, I];
const I4: &[ArgKind] = &[I, I, I, I];
const I5: &[ArgKind] = &[I, I, I, I, I];
const I6: &[ArgKind] = &[I, I, I, I, I, I];
const I8: &[ArgKind] = &[I, I, I, I, I, I, I, I];
const F1: &[ArgKind] = &[F];
const F2: &[ArgKind] = &[F, F];
const F3: &[ArgKind] = &[F, F, F];
const F4: &[ArgKind] = &[F, F, F, F];
const F5: &[ArgKind] = &[F, F, F, F, F];
const F6: &[ArgKind] = &[F, F, F, F, F, F];
const F8: &[ArgKind] = &[F, F, F, F, F, F, F, F];
const S1: &[ArgKind] = &[Str];

/// `pl_openpl`
pub const OPENPL: OpSpec = op("openpl", NONE, Status, Lifecycle);
/// `pl_closepl`
pub const CLOSEPL: OpSpec = op("closepl", NONE, Status, Lifecycle);

/// Every entry point the facade forwards.
pub static OPERATIONS: &[OpSpec] = &[
    OPENPL,
    CLOSEPL,
    // Control
    op("bgcolor", I3, Status, Control),
    op("bgcolorname", S1, Status, Control),
    op("erase", NONE, Status, Control),
    op("space", I4, Status, Control),
    op("fspace", F4, Status, Control),
    op("space2", I6, Status, Control),
    op("fspace2", F6, Status, Control),
    op("havecap", S1, Status, Control),
    op("flushpl", NONE, Status, Control),
    // Drawing
    op("alabel", &[Char, Char, Str], Status, Drawing),
    op("arc", I6, Status, Drawing),
    op("farc", F6, Status, Drawing),
    op("arcrel", I6, Status, Drawing),
    op("farcrel", F6, Status, Drawing),
    op("bezier2", I6, Status, Drawing),
    op("fbezier2", F6, Status, Drawing),
    op("bezier2rel", I6, Status, Drawing),
    op("fbezier2rel", F6, Status, Drawing),
    op("bezier3", I8, Status, Drawing),
    op("fbezier3", F8, Status, Drawing),
    op("bezier3rel", I8, Status, Drawing),
    op("fbezier3rel", F8, Status, Drawing),
    op("box", I4, Status, Drawing),
    op("fbox", F4, Status, Drawing),
    op("boxrel", I4, Status, Drawing),
    op("fboxrel", F4, Status, Drawing),
    op("circle", I3, Status, Drawing),
    op("fcircle", F3, Status, Drawing),
    op("circlerel", I3, Status, Drawing),
    op("fcirclerel", F3, Status, Drawing),
    op("cont", I2, Status, Drawing),
    op("fcont", F2, Status, Drawing),
    op("contrel", I2, Status, Drawing),
    op("fcontrel", F2, Status, Drawing),
    op("ellarc", I6, Status, Drawing),
    op("fellarc", F6, Status, Drawing),
    op("ellarcrel", I6, Status, Drawing),
    op("fellarcrel", F6, Status, Drawing),
    op("ellipse", I5, Status, Drawing),
    op("fellipse", F5, Status, Drawing),
    op("ellipserel", I5, Status, Drawing),
    op("fellipserel", F5, Status, Drawing),
    op("endpath", NONE, Status, Drawing),
    op("endsubpath", NONE, Status, Drawing),
    op("closepath", NONE, Status, Drawing),
    op("label", S1, Status, Drawing),
    op("labelwidth", S1, Status, Drawing),
    op("flabelwidth", S1, Measure, Drawing),
    op("line", I4, Status, Drawing),
    op("fline", F4, Status, Drawing),
    op("linerel", I4, Status, Drawing),
    op("flinerel", F4, Status, Drawing),
    op("marker", I4, Status, Drawing),
    op("fmarker", &[F, F, I, F], Status, Drawing),
    op("markerrel", I4, Status, Drawing),
    op("fmarkerrel", &[F, F, I, F], Status, Drawing),
    op("point", I2, Status, Drawing),
    op("fpoint", F2, Status, Drawing),
    op("pointrel", I2, Status, Drawing),
    op("fpointrel", F2, Status, Drawing),
    // Attributes
    op("capmod", S1, Status, Attribute),
    op("color", I3, Status, Attribute),
    op("colorname", S1, Status, Attribute),
    op("fillcolor", I3, Status, Attribute),
    op("fillcolorname", S1, Status, Attribute),
    op("fillmod", S1, Status, Attribute),
    op("filltype", I1, Status, Attribute),
    op("fmiterlimit", F1, Status, Attribute),
    op("fontname", S1, Status, Attribute),
    op("ffontname", S1, Measure, Attribute),
    op("fontsize", I1, Status, Attribute),
    op("ffontsize", F1, Measure, Attribute),
    op("joinmod", S1, Status, Attribute),
    op("linedash", &[Len, IntList, I], Status, Attribute),
    op("flinedash", &[Len, FloatList, F], Status, Attribute),
    op("linemod", S1, Status, Attribute),
    op("linewidth", I1, Status, Attribute),
    op("flinewidth", F1, Status, Attribute),
    op("move", I2, Status, Attribute),
    op("fmove", F2, Status, Attribute),
    op("moverel", I2, Status, Attribute),
    op("fmoverel", F2, Status, Attribute),
    op("orientation", I1, Status, Attribute),
    op("pencolor", I3, Status, Attribute),
    op("pencolorname", S1, Status, Attribute),
    op("pentype", I1, Status, Attribute),
    op("restorestate", NONE, Status, Attribute),
    op("savestate", NONE, Status, Attribute),
    op("textangle", I1, Status, Attribute),
    op("ftextangle", F1, Measure, Attribute),
    // Mapping
    op("fconcat", F6, Status, Mapping),
    op("frotate", F1, Status, Mapping),
    op("fscale", F2, Status, Mapping),
    op("ftranslate", F2, Status, Mapping),
    op("fsetmatrix", F6, Status, Mapping),
];

lazy_static! {
    static ref INDEX: HashMap<&'static str, &'static OpSpec> =
        OPERATIONS.iter().map(|spec| (spec.name, spec)).collect();
}

/// Find an operation by its library name (without the `pl_` prefix).
pub fn lookup(name: &str) -> Option<&'static OpSpec> {
    INDEX.get(name).copied()
}

/// Iterate over the operations in one category.
pub fn in_category(category: Category) -> impl Iterator<Item = &'static OpSpec> {
    OPERATIONS
        .iter()
        .filter(move |spec| spec.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = OPERATIONS.iter().map(|spec| spec.name).collect();
        assert_eq!(names.len(), OPERATIONS.len());
    }

    #[test]
    fn test_float_variants_mirror_integer_variants() {
        for spec in OPERATIONS {
            let Some(base) = spec.name.strip_prefix('f') else {
                continue;
            };
            let Some(int_spec) = lookup(base) else {
                continue;
            };
            assert_eq!(
                spec.arity(),
                int_spec.arity(),
                "{} and {} disagree on arity",
                spec.name,
                int_spec.name
            );
        }
    }

    #[test]
    fn test_relative_variants_mirror_absolute_variants() {
        for spec in OPERATIONS {
            if let Some(base) = spec.name.strip_suffix("rel") {
                let absolute = lookup(base).expect("absolute counterpart exists");
                assert_eq!(spec.args, absolute.args, "{}", spec.name);
            }
        }
    }

    #[test]
    fn test_measures() {
        let measures: Vec<_> = OPERATIONS
            .iter()
            .filter(|spec| spec.returns == ReturnKind::Measure)
            .map(|spec| spec.name)
            .collect();
        assert_eq!(
            measures,
            ["flabelwidth", "ffontname", "ffontsize", "ftextangle"]
        );
    }

    #[test]
    fn test_lookup_and_symbol() {
        let spec = lookup("fbezier3rel").unwrap();
        assert_eq!(spec.arity(), 8);
        assert_eq!(spec.symbol(), "pl_fbezier3rel");
        assert!(lookup("pl_fmove").is_none());
        assert_eq!(in_category(Category::Lifecycle).count(), 2);
        assert_eq!(in_category(Category::Mapping).count(), 5);
    }
}
