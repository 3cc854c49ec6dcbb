//! The process-wide selection register, made explicit.
//!
//! libplot keeps a single "current plotter" slot shared by the whole process.
//! Issuing a drawing call means selecting a handle and then calling an entry
//! point, and two threads interleaving those steps would draw on each other's
//! plotters. A [`Context`] owns the library behind a mutex; [`Context::lock`]
//! yields a [`Session`], and every facade operation takes that session by
//! `&mut`, so a select-and-operate sequence always runs under the lock.
//!
//! ```rust
//! use rplot::{Context, Plotter, RecordingLibrary, StreamSpec};
//!
//! let context = Context::new(RecordingLibrary::new());
//! let mut session = context.lock();
//! let mut plotter = Plotter::new(&mut session, "meta", StreamSpec::standard()).unwrap();
//! plotter.open(&mut session).unwrap();
//! plotter.fmove(&mut session, 0.5, 0.5).unwrap();
//! plotter.delete(&mut session).unwrap();
//! ```

use crate::error::{PlotError, PlotResult};
use crate::library::{Handle, Library};
use crate::params::{PlotParam, normalize_param_name};
use lazy_static::lazy_static;
use parking_lot::{Mutex, MutexGuard};
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

pub(crate) struct Registry {
    library: Box<dyn Library>,
    selected: Handle,
    open: HashSet<Handle>,
}

/// Shared owner of a plotting library and its selection register.
///
/// Cloning is cheap; clones refer to the same register.
#[derive(Clone)]
pub struct Context {
    inner: Arc<Mutex<Registry>>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("id", &Arc::as_ptr(&self.inner))
            .finish()
    }
}

lazy_static! {
    static ref GLOBAL: Mutex<Option<Context>> = Mutex::new(None);
}

impl Context {
    /// Wrap a library in a fresh register. The default plotter starts selected.
    pub fn new(library: impl Library + 'static) -> Self {
        tracing::debug!(library = library.name(), "creating plotting context");
        Self {
            inner: Arc::new(Mutex::new(Registry {
                library: Box::new(library),
                selected: Handle::DEFAULT,
                open: HashSet::new(),
            })),
        }
    }

    /// The process context.
    ///
    /// The first call loads libplot; if that fails the error is returned and
    /// the next call tries again. A context installed with
    /// [`install_global`](Self::install_global) takes precedence.
    pub fn global() -> PlotResult<Context> {
        let mut global = GLOBAL.lock();
        if let Some(context) = global.as_ref() {
            return Ok(context.clone());
        }
        let context = Context::new(load_native()?);
        *global = Some(context.clone());
        Ok(context)
    }

    /// Replace the process context, returning the previous one.
    pub fn install_global(context: Context) -> Option<Context> {
        GLOBAL.lock().replace(context)
    }

    /// Block until the register is free and take it.
    pub fn lock(&self) -> Session<'_> {
        Session {
            context: self,
            registry: self.inner.lock(),
        }
    }

    /// Take the register only if nobody holds it.
    pub fn try_lock(&self) -> Option<Session<'_>> {
        self.inner.try_lock().map(|registry| Session {
            context: self,
            registry,
        })
    }

    /// Whether two contexts share one register.
    pub fn same_as(&self, other: &Context) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Set a process-wide parameter, read by the library at the next plotter creation.
    pub fn set_param(&self, name: &str, value: &str) -> PlotResult<()> {
        self.lock().set_param(name, value)
    }

    /// Set several parameters at once.
    pub fn set_params<I, K, V>(&self, params: I) -> PlotResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut session = self.lock();
        for (name, value) in params {
            session.set_param(name.as_ref(), value.as_ref())?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn load_native() -> PlotResult<crate::library::NativeLibrary> {
    crate::library::NativeLibrary::load()
}

#[cfg(not(unix))]
fn load_native() -> PlotResult<crate::library::RecordingLibrary> {
    Err(PlotError::LibraryUnavailable(
        "libplot is only supported on unix targets".to_string(),
    ))
}

/// Exclusive access to a context's register.
///
/// Every facade operation needs one; holding it keeps other threads from
/// changing the selection between a select and the call that follows.
pub struct Session<'a> {
    context: &'a Context,
    registry: MutexGuard<'a, Registry>,
}

impl Session<'_> {
    /// The context this session locks.
    pub fn context(&self) -> &Context {
        self.context
    }

    /// The currently selected handle; [`Handle::DEFAULT`] when none of ours is.
    pub fn selected(&self) -> Handle {
        self.registry.selected
    }

    /// Whether `handle` has an open page.
    pub fn is_open(&self, handle: Handle) -> bool {
        self.registry.open.contains(&handle)
    }

    /// Set a process-wide parameter.
    ///
    /// Names are uppercased; names libplot does not document are still
    /// forwarded, with a warning.
    pub fn set_param(&mut self, name: &str, value: &str) -> PlotResult<()> {
        let name = normalize_param_name(name);
        if PlotParam::from_str(&name).is_err() {
            tracing::warn!(%name, "unrecognised plotter parameter");
        }
        let code = self.registry.library.set_param(&name, value)?;
        tracing::debug!(%name, %value, code, "set plotter parameter");
        Ok(())
    }

    pub(crate) fn belongs_to(&self, context: &Context) -> bool {
        self.context.same_as(context)
    }

    pub(crate) fn library(&mut self) -> &mut dyn Library {
        self.registry.library.as_mut()
    }

    pub(crate) fn select(&mut self, handle: Handle) -> PlotResult<()> {
        let code = self.registry.library.select_plotter(handle)?;
        if code < 0 {
            return Err(PlotError::Selection { handle, code });
        }
        self.registry.selected = handle;
        Ok(())
    }

    pub(crate) fn mark_open(&mut self, handle: Handle, open: bool) {
        if open {
            self.registry.open.insert(handle);
        } else {
            self.registry.open.remove(&handle);
        }
    }
}

impl std::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("context", self.context)
            .field("selected", &self.registry.selected)
            .finish()
    }
}
