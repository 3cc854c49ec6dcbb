use rplot::{
    BackendKind, Context, Event, Handle, Output, PlotError, Plotter, Recorder, RecordingLibrary, StreamRole,
    StreamSpec, Value,
};
use std::fs;
use std::thread;

fn recording_context() -> (Context, Recorder) {
    let library = RecordingLibrary::new();
    let recorder = library.recorder();
    (Context::new(library), recorder)
}

#[test]
fn test_every_backend_round_trips_to_default_selection() {
    let (context, recorder) = recording_context();
    let mut session = context.lock();
    for kind in BackendKind::ALL {
        let mut plotter = Plotter::create(&mut session, kind.as_str()).unwrap();
        assert_eq!(recorder.kind(plotter.handle()).as_deref(), Some(kind.as_str()));
        plotter.delete(&mut session).unwrap();
        assert_eq!(recorder.selected(), Handle::DEFAULT);
        assert_eq!(session.selected(), Handle::DEFAULT);
        assert!(!recorder.is_live(plotter.handle()));
    }
    assert_eq!(recorder.live_count(), 0);
}

#[test]
fn test_unknown_kind_raises_creation_error() {
    let (context, recorder) = recording_context();
    let mut session = context.lock();
    let err = Plotter::create(&mut session, "hologram").unwrap_err();
    assert!(matches!(err, PlotError::Creation { ref kind, code } if kind == "hologram" && code < 0));
    assert!(err.is_library_failure());
    assert_eq!(recorder.live_count(), 0);
}

#[test]
fn test_output_path_receives_the_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.txt");
    let (context, _recorder) = recording_context();
    let mut session = context.lock();

    let streams = StreamSpec::standard().with_output(&path);
    let mut plotter = Plotter::new(&mut session, "svg", streams).unwrap();
    plotter.open(&mut session).unwrap();
    plotter.fline(&mut session, 0.0, 0.0, 1.0, 1.0).unwrap();
    plotter.close(&mut session).unwrap();
    plotter.delete(&mut session).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("fline 0 0 1 1"), "{contents}");
    assert!(contents.contains("closepl"), "{contents}");
}

#[test]
fn test_standard_streams_are_the_default() {
    let (context, recorder) = recording_context();
    let mut session = context.lock();
    let spec = StreamSpec::from_paths::<&str>(None, None, None);
    assert_eq!(spec, StreamSpec::standard());
    let mut plotter = Plotter::new(&mut session, "meta", spec).unwrap();
    assert!(recorder.is_live(plotter.handle()));
    plotter.delete(&mut session).unwrap();
}

#[test]
fn test_unopenable_stream_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (context, recorder) = recording_context();
    let mut session = context.lock();

    let missing_dir = dir.path().join("absent").join("out.svg");
    let err = Plotter::new(&mut session, "svg", StreamSpec::standard().with_output(&missing_dir)).unwrap_err();
    assert!(matches!(err, PlotError::Stream { role: StreamRole::Output, .. }));

    let missing_input = dir.path().join("absent.in");
    let err = Plotter::new(&mut session, "svg", StreamSpec::standard().with_input(&missing_input)).unwrap_err();
    assert!(matches!(err, PlotError::Stream { role: StreamRole::Input, .. }));

    assert_eq!(recorder.live_count(), 0);
    assert!(
        !recorder
            .events()
            .iter()
            .any(|event| matches!(event, Event::Created { .. }))
    );
}

#[test]
fn test_interleaved_plotters_do_not_cross_talk() {
    let (context, recorder) = recording_context();
    let mut session = context.lock();
    let mut a = Plotter::create(&mut session, "svg").unwrap();
    let mut b = Plotter::create(&mut session, "png").unwrap();
    a.open(&mut session).unwrap();
    b.open(&mut session).unwrap();

    a.fmove(&mut session, 1.0, 1.0).unwrap();
    b.fmove(&mut session, 5.0, 5.0).unwrap();
    a.fcont(&mut session, 2.0, 3.0).unwrap();
    b.fmoverel(&mut session, 1.0, 0.0).unwrap();

    assert_eq!(recorder.cursor(a.handle()), Some((2.0, 3.0)));
    assert_eq!(recorder.cursor(b.handle()), Some((6.0, 5.0)));

    let expected = [
        (a.handle(), "openpl"),
        (b.handle(), "openpl"),
        (a.handle(), "fmove"),
        (b.handle(), "fmove"),
        (a.handle(), "fcont"),
        (b.handle(), "fmoverel"),
    ];
    assert_eq!(recorder.invocations(), expected);

    a.delete(&mut session).unwrap();
    b.delete(&mut session).unwrap();
}

#[test]
fn test_deleting_a_plotter_that_is_not_selected() {
    let (context, recorder) = recording_context();
    let mut session = context.lock();
    let mut a = Plotter::create(&mut session, "svg").unwrap();
    let mut b = Plotter::create(&mut session, "svg").unwrap();
    a.open(&mut session).unwrap();
    assert_eq!(session.selected(), a.handle());

    b.delete(&mut session).unwrap();
    assert!(!recorder.is_live(b.handle()));
    assert!(recorder.is_live(a.handle()));

    assert_eq!(a.fpoint(&mut session, 0.5, 0.5).unwrap(), 0);
    a.delete(&mut session).unwrap();
}

#[test]
fn test_drawing_before_open_is_not_masked() {
    let (context, _recorder) = recording_context();
    let mut session = context.lock();
    let mut plotter = Plotter::create(&mut session, "ps").unwrap();

    assert!(plotter.fline(&mut session, 0.0, 0.0, 1.0, 1.0).unwrap() < 0);
    assert!(plotter.erase(&mut session).unwrap() < 0);
    let output = plotter.call(&mut session, "flabelwidth", &["abc".into()]).unwrap();
    assert!(output.is_failure());

    plotter.delete(&mut session).unwrap();
}

#[test]
fn test_relative_zero_move_keeps_the_cursor() {
    let (context, recorder) = recording_context();
    let mut session = context.lock();
    let mut plotter = Plotter::create(&mut session, "svg").unwrap();
    plotter.open(&mut session).unwrap();

    plotter.fmove(&mut session, 0.25, 0.75).unwrap();
    let before = recorder.cursor(plotter.handle());
    plotter.fmoverel(&mut session, 0.0, 0.0).unwrap();
    assert_eq!(recorder.cursor(plotter.handle()), before);

    plotter.r#move(&mut session, 3, 4).unwrap();
    plotter.moverel(&mut session, 0, 0).unwrap();
    assert_eq!(recorder.cursor(plotter.handle()), Some((3.0, 4.0)));

    plotter.delete(&mut session).unwrap();
}

#[test]
fn test_lifecycle_failures_raise() {
    let (context, _recorder) = recording_context();
    let mut session = context.lock();
    let mut plotter = Plotter::create(&mut session, "svg").unwrap();

    let err = plotter.close(&mut session).unwrap_err();
    assert!(matches!(err, PlotError::Close { code, .. } if code < 0));

    plotter.open(&mut session).unwrap();
    assert!(plotter.is_open(&session));
    let err = plotter.open(&mut session).unwrap_err();
    assert!(matches!(err, PlotError::Open { handle, .. } if handle == plotter.handle()));

    plotter.delete(&mut session).unwrap();
}

#[test]
fn test_delete_closes_an_open_page() {
    let (context, recorder) = recording_context();
    let mut session = context.lock();
    let mut plotter = Plotter::create(&mut session, "svg").unwrap();
    plotter.open(&mut session).unwrap();
    plotter.delete(&mut session).unwrap();

    let ops: Vec<_> = recorder.invocations().into_iter().map(|(_, op)| op).collect();
    assert_eq!(ops, ["openpl", "closepl"]);
    assert!(
        recorder
            .events()
            .ends_with(&[Event::Selected(Handle::DEFAULT), Event::Deleted(plotter.handle())])
    );
}

#[test]
fn test_deleted_plotter_rejects_everything() {
    let (context, _recorder) = recording_context();
    let mut session = context.lock();
    let mut plotter = Plotter::create(&mut session, "svg").unwrap();
    plotter.delete(&mut session).unwrap();
    assert!(plotter.is_deleted());

    let err = plotter.erase(&mut session).unwrap_err();
    assert!(matches!(err, PlotError::Deleted { handle } if handle == plotter.handle()));
    assert!(err.is_selection_failure());
    assert!(matches!(plotter.open(&mut session), Err(PlotError::Deleted { .. })));
    assert!(matches!(plotter.delete(&mut session), Err(PlotError::Deleted { .. })));
}

#[test]
fn test_rejected_selection_raises() {
    let (context, recorder) = recording_context();
    let mut session = context.lock();
    let mut plotter = Plotter::create(&mut session, "svg").unwrap();
    recorder.reject_selection(plotter.handle());

    let err = plotter.erase(&mut session).unwrap_err();
    assert!(matches!(err, PlotError::Selection { handle, code } if handle == plotter.handle() && code < 0));
    assert!(err.is_selection_failure());
    assert!(err.is_library_failure());
    assert!(matches!(plotter.open(&mut session), Err(PlotError::Selection { .. })));
    assert!(recorder.invocations().is_empty());
    assert_eq!(session.selected(), Handle::DEFAULT);

    recorder.clear_rejections();
    plotter.delete(&mut session).unwrap();
}

#[test]
fn test_rejected_delete_raises() {
    let (context, recorder) = recording_context();
    let mut session = context.lock();
    let mut plotter = Plotter::create(&mut session, "svg").unwrap();
    plotter.open(&mut session).unwrap();
    recorder.reject_deletion(plotter.handle());

    let err = plotter.delete(&mut session).unwrap_err();
    assert!(matches!(err, PlotError::Delete { handle, code } if handle == plotter.handle() && code < 0));
    assert!(err.is_library_failure());
    assert!(!err.is_selection_failure());
    assert!(!plotter.is_deleted());
    assert!(recorder.is_live(plotter.handle()));
    assert_eq!(recorder.selected(), Handle::DEFAULT);

    recorder.clear_rejections();
    plotter.delete(&mut session).unwrap();
    assert!(plotter.is_deleted());
    assert!(!recorder.is_live(plotter.handle()));
}

#[test]
fn test_plotter_rejects_a_foreign_session() {
    let (context, _recorder) = recording_context();
    let (other, other_recorder) = recording_context();

    let mut plotter = {
        let mut session = context.lock();
        Plotter::create(&mut session, "svg").unwrap()
    };
    {
        let mut foreign = other.lock();
        assert!(matches!(plotter.erase(&mut foreign), Err(PlotError::ForeignSession)));
    }
    assert!(other_recorder.events().is_empty());

    let mut session = context.lock();
    plotter.delete(&mut session).unwrap();
}

#[test]
fn test_dynamic_calls_are_checked() {
    let (context, _recorder) = recording_context();
    let mut session = context.lock();
    let mut plotter = Plotter::create(&mut session, "svg").unwrap();
    plotter.open(&mut session).unwrap();

    assert!(matches!(
        plotter.call(&mut session, "teleport", &[]),
        Err(PlotError::UnknownOperation(ref name)) if name == "teleport"
    ));
    assert!(matches!(
        plotter.call(&mut session, "openpl", &[]),
        Err(PlotError::Lifecycle { op: "openpl" })
    ));
    assert!(matches!(
        plotter.call(&mut session, "fline", &[Value::Float(0.0)]),
        Err(PlotError::Arity { expected: 4, actual: 1, .. })
    ));
    assert!(matches!(
        plotter.call(&mut session, "linewidth", &[Value::Float(1.5)]),
        Err(PlotError::ArgumentType { index: 0, .. })
    ));

    // ints are accepted for float parameters
    let output = plotter
        .call(&mut session, "fline", &[Value::Int(0), Value::Int(0), Value::Int(1), Value::Int(1)])
        .unwrap();
    assert_eq!(output, Output::Status(0));

    let size = plotter.call(&mut session, "ffontsize", &[Value::Float(2.0)]).unwrap();
    assert_eq!(size, Output::Measure(2.0));
    assert_eq!(plotter.flabelwidth(&mut session, "abc").unwrap(), 6.0);

    plotter.delete(&mut session).unwrap();
}

#[test]
fn test_draw_deletes_even_when_the_body_fails() {
    let (context, recorder) = recording_context();
    let mut session = context.lock();

    let width = Plotter::draw(&mut session, "svg", StreamSpec::standard(), |session, plotter| {
        plotter.ffontsize(session, 0.5)?;
        plotter.flabelwidth(session, "abcd")
    })
    .unwrap();
    assert_eq!(width, 2.0);
    assert_eq!(recorder.live_count(), 0);

    let err = Plotter::draw(&mut session, "svg", StreamSpec::standard(), |session, plotter| {
        plotter.call(session, "fline", &[])
    })
    .unwrap_err();
    assert!(matches!(err, PlotError::Arity { .. }));
    assert_eq!(recorder.live_count(), 0);
    assert_eq!(session.selected(), Handle::DEFAULT);
}

#[test]
fn test_dropping_an_undeleted_plotter_deletes_it() {
    let (context, recorder) = recording_context();
    let plotter = {
        let mut session = context.lock();
        Plotter::create(&mut session, "svg").unwrap()
    };
    let handle = plotter.handle();
    assert!(recorder.is_live(handle));
    drop(plotter);
    assert!(!recorder.is_live(handle));
}

#[test]
fn test_threads_share_one_register() {
    let (context, recorder) = recording_context();

    let workers: Vec<_> = (0..4)
        .map(|id| {
            let context = context.clone();
            thread::spawn(move || {
                let mut session = context.lock();
                let mut plotter = Plotter::create(&mut session, "meta").unwrap();
                plotter.open(&mut session).unwrap();
                drop(session);

                for step in 0..25 {
                    let mut session = context.lock();
                    plotter.fmove(&mut session, f64::from(step), f64::from(id)).unwrap();
                }

                let mut session = context.lock();
                plotter.delete(&mut session).unwrap();
                (id, plotter.handle())
            })
        })
        .collect();
    let owners: Vec<(i32, Handle)> = workers.into_iter().map(|worker| worker.join().unwrap()).collect();

    let mut moves = 0;
    for event in recorder.events() {
        if let Event::Invoked { handle, op: "fmove", args } = event {
            let id = match args[1] {
                rplot::Arg::Float(id) => id as i32,
                ref other => panic!("unexpected argument {other}"),
            };
            assert!(owners.contains(&(id, handle)));
            moves += 1;
        }
    }
    assert_eq!(moves, 100);
    assert_eq!(recorder.live_count(), 0);
}

#[test]
fn test_params_reach_the_library() {
    let (context, recorder) = recording_context();
    context.set_param("pagesize", "a4").unwrap();
    context.set_params([("BG_COLOR", "black")]).unwrap();
    assert_eq!(recorder.param("PAGESIZE").as_deref(), Some("a4"));
    assert_eq!(recorder.param("BG_COLOR").as_deref(), Some("black"));
}
