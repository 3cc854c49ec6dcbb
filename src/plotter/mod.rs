//! The handle-scoped plotter facade.
//!
//! A [`Plotter`] owns one library handle. Every operation first makes that
//! handle current in the session's register, then forwards the call. Drawing,
//! attribute and mapping operations return the library's raw result; the
//! lifecycle operations ([`new`](Plotter::new), [`open`](Plotter::open),
//! [`close`](Plotter::close), [`delete`](Plotter::delete)) turn a negative
//! result into a typed [`PlotError`].

mod convenience;
mod methods;

pub use convenience::{Color, Positioning};

use crate::context::{Context, Session};
use crate::error::{PlotError, PlotResult};
use crate::library::Handle;
use crate::operations::{self, CLOSEPL, Category, OPENPL, OpSpec};
use crate::streams::StreamSpec;
use crate::value::{Output, Value, marshal};

/// A plotter instance inside the plotting library.
#[derive(Debug)]
pub struct Plotter {
    handle: Handle,
    kind: String,
    context: Context,
    deleted: bool,
}

impl Plotter {
    /// Create a plotter of `kind` bound to `streams`.
    ///
    /// Paths in `streams` are opened first; any that fail abort construction
    /// and the ones already opened are closed. A negative handle from the
    /// library becomes [`PlotError::Creation`].
    pub fn new(session: &mut Session<'_>, kind: impl AsRef<str>, streams: StreamSpec) -> PlotResult<Self> {
        let kind = kind.as_ref();
        let opened = streams.open()?;
        let code = session.library().new_plotter(kind, opened)?;
        if code < 0 {
            tracing::debug!(kind, code, "plotter creation rejected");
            return Err(PlotError::creation(kind, code));
        }
        let handle = Handle::new(code);
        tracing::debug!(kind, %handle, "created plotter");
        Ok(Self {
            handle,
            kind: kind.to_owned(),
            context: session.context().clone(),
            deleted: false,
        })
    }

    /// Create a plotter on the process's standard streams.
    pub fn create(session: &mut Session<'_>, kind: impl AsRef<str>) -> PlotResult<Self> {
        Self::new(session, kind, StreamSpec::standard())
    }

    /// The library handle.
    pub const fn handle(&self) -> Handle {
        self.handle
    }

    /// The backend kind string this plotter was created with.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The context that owns the handle.
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// Returns true once [`delete`](Self::delete) has succeeded
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Make this plotter current.
    pub fn select(&self, session: &mut Session<'_>) -> PlotResult<()> {
        if self.deleted {
            return Err(PlotError::Deleted {
                handle: self.handle,
            });
        }
        if !session.belongs_to(&self.context) {
            return Err(PlotError::ForeignSession);
        }
        session.select(self.handle)
    }

    /// Begin a page.
    pub fn open(&mut self, session: &mut Session<'_>) -> PlotResult<()> {
        let code = self.lifecycle(session, &OPENPL)?;
        if code < 0 {
            return Err(PlotError::Open {
                handle: self.handle,
                code,
            });
        }
        session.mark_open(self.handle, true);
        Ok(())
    }

    /// End the page, flushing it to the output stream.
    pub fn close(&mut self, session: &mut Session<'_>) -> PlotResult<()> {
        let code = self.lifecycle(session, &CLOSEPL)?;
        if code < 0 {
            return Err(PlotError::Close {
                handle: self.handle,
                code,
            });
        }
        session.mark_open(self.handle, false);
        Ok(())
    }

    /// Whether a page is currently open.
    pub fn is_open(&self, session: &Session<'_>) -> bool {
        session.is_open(self.handle)
    }

    /// Release the handle.
    ///
    /// Closes an open page, selects the default plotter (the library will not
    /// delete a selected plotter) and deletes the handle. After success every
    /// further call fails to select, with [`PlotError::Deleted`].
    pub fn delete(&mut self, session: &mut Session<'_>) -> PlotResult<()> {
        self.select(session)?;
        if session.is_open(self.handle) {
            self.close(session)?;
        }
        session.select(Handle::DEFAULT)?;
        let code = session.library().delete_plotter(self.handle)?;
        if code < 0 {
            return Err(PlotError::Delete {
                handle: self.handle,
                code,
            });
        }
        self.deleted = true;
        tracing::debug!(handle = %self.handle, "deleted plotter");
        Ok(())
    }

    /// Forward operation `name` with positional `args`.
    ///
    /// The result is whatever the library returned, negative statuses
    /// included; only marshaling and selection failures are errors.
    pub fn call(&self, session: &mut Session<'_>, name: &str, args: &[Value]) -> PlotResult<Output> {
        let spec = operations::lookup(name).ok_or_else(|| PlotError::UnknownOperation(name.to_owned()))?;
        if spec.category == Category::Lifecycle {
            return Err(PlotError::Lifecycle { op: spec.name });
        }
        self.forward(session, spec, args)
    }

    fn forward(&self, session: &mut Session<'_>, spec: &OpSpec, args: &[Value]) -> PlotResult<Output> {
        let args = marshal(spec, args)?;
        self.select(session)?;
        let output = session.library().invoke(spec, &args)?;
        tracing::trace!(handle = %self.handle, op = spec.name, ?output, "forwarded call");
        Ok(output)
    }

    fn lifecycle(&self, session: &mut Session<'_>, spec: &OpSpec) -> PlotResult<i32> {
        let output = self.forward(session, spec, &[])?;
        Ok(output.status().unwrap_or(-1))
    }

    /// Run `f` on a fresh plotter between an opened, erased page and deletion.
    ///
    /// The plotter is deleted even when `f` fails; the first error wins.
    pub fn draw<T>(
        session: &mut Session<'_>,
        kind: impl AsRef<str>,
        streams: StreamSpec,
        f: impl FnOnce(&mut Session<'_>, &mut Plotter) -> PlotResult<T>,
    ) -> PlotResult<T> {
        let mut plotter = Plotter::new(session, kind, streams)?;
        let result = plotter
            .open(session)
            .and_then(|()| plotter.erase(session).map(drop))
            .and_then(|()| f(session, &mut plotter));
        let deleted = plotter.delete(session);
        let value = result?;
        deleted?;
        Ok(value)
    }
}

impl Drop for Plotter {
    fn drop(&mut self) {
        if self.deleted {
            return;
        }
        let context = self.context.clone();
        let Some(mut session) = context.try_lock() else {
            tracing::warn!(handle = %self.handle, "plotter dropped while its context was locked; handle leaked");
            return;
        };
        if let Err(err) = self.delete(&mut session) {
            tracing::warn!(handle = %self.handle, %err, "failed to delete dropped plotter");
        }
    }
}
