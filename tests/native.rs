//! Exercises the real libplot when it is installed; skipped otherwise.
#![cfg(unix)]

use rplot::{Context, NativeLibrary, PlotError, Plotter, Positioning, StreamSpec};
use std::fs;

fn native_context() -> Option<Context> {
    match Context::global() {
        Ok(context) => Some(context),
        Err(err) => {
            eprintln!("skipping: {err}");
            None
        }
    }
}

#[test]
fn test_svg_page_is_written() {
    let Some(context) = native_context() else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.svg");

    // The first value is released before the plotter reads the second.
    context.set_param("PAGESIZE", "a4").unwrap();
    context.set_param("PAGESIZE", "letter").unwrap();
    let mut session = context.lock();
    Plotter::draw(&mut session, "svg", StreamSpec::standard().with_output(&path), |session, plotter| {
        assert_eq!(plotter.fspace(session, 0.0, 0.0, 1.0, 1.0)?, 0);
        plotter.pen_color(session, "red")?;
        plotter.move_to(session, Positioning::Absolute, 0.1, 0.1)?;
        plotter.cont_to(session, Positioning::Relative, 0.8, 0.8)?;
        plotter.endpath(session)?;
        plotter.ffontsize(session, 0.05)?;
        assert!(plotter.flabelwidth(session, "rplot")? > 0.0);
        plotter.alabel(session, 'c', 'c', "rplot")?;
        Ok(())
    })
    .unwrap();
    drop(session);

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("<svg"), "{contents}");
}

#[test]
fn test_two_plotters_write_separate_files() {
    let Some(context) = native_context() else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.svg");
    let second = dir.path().join("second.svg");

    let mut session = context.lock();
    let mut a = Plotter::new(&mut session, "svg", StreamSpec::standard().with_output(&first)).unwrap();
    let mut b = Plotter::new(&mut session, "svg", StreamSpec::standard().with_output(&second)).unwrap();
    a.open(&mut session).unwrap();
    b.open(&mut session).unwrap();
    a.fcircle(&mut session, 0.5, 0.5, 0.25).unwrap();
    b.fbox(&mut session, 0.1, 0.1, 0.9, 0.9).unwrap();
    a.delete(&mut session).unwrap();
    b.delete(&mut session).unwrap();
    drop(session);

    let first = fs::read_to_string(&first).unwrap();
    let second = fs::read_to_string(&second).unwrap();
    assert!(first.contains("<circle") || first.contains("<ellipse"), "{first}");
    assert!(second.contains("<rect") || second.contains("<path"), "{second}");
}

#[test]
fn test_unknown_kind_is_refused() {
    let Some(context) = native_context() else {
        return;
    };
    let mut session = context.lock();
    assert!(Plotter::create(&mut session, "no-such-backend").is_err());
}

#[test]
fn test_second_native_library_is_refused() {
    let Some(context) = native_context() else {
        return;
    };
    assert!(Context::global().unwrap().same_as(&context));
    assert!(matches!(NativeLibrary::load(), Err(PlotError::LibraryInUse { .. })));

    let mut session = context.lock();
    let mut plotter = Plotter::create(&mut session, "meta").unwrap();
    plotter.delete(&mut session).unwrap();
}
