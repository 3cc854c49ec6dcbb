//! GNU libplot, loaded at runtime.
//!
//! Symbols of the classic `pl_*` API are looked up by name on every call and
//! invoked through a function pointer type chosen from the argument shapes in
//! the operation table. Nothing links against libplot at build time.

use super::{Handle, Library};
use crate::error::{PlotError, PlotResult, StreamRole};
use crate::operations::OpSpec;
use crate::streams::{PlotterStreams, Stream};
use crate::value::{Arg, Output, ReturnKind};
use libloading::Symbol;
use std::collections::HashMap;
use std::ffi::{CStr, CString, OsStr, c_void};
use std::io;
use std::os::raw::{c_char, c_double, c_int};
use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable naming the libplot shared object to load.
pub const LIBRARY_ENV: &str = "RPLOT_LIBPLOT";

#[cfg(target_os = "macos")]
const SEARCH_NAMES: &[&str] = &["libplot.2.dylib", "libplot.dylib"];
#[cfg(not(target_os = "macos"))]
const SEARCH_NAMES: &[&str] = &["libplot.so.2", "libplot.so"];

static CLAIMED: AtomicBool = AtomicBool::new(false);

/// Exclusive ownership of libplot's process-wide selection register.
///
/// libplot keeps one current-plotter slot per process no matter how often it
/// is loaded, so at most one [`NativeLibrary`] may exist at a time.
#[derive(Debug)]
struct ProcessClaim(());

impl ProcessClaim {
    fn acquire() -> Option<Self> {
        CLAIMED
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ProcessClaim(()))
    }
}

impl Drop for ProcessClaim {
    fn drop(&mut self) {
        CLAIMED.store(false, Ordering::Release);
    }
}

/// The three `FILE *` streams handed to `pl_newpl`, closed on drop.
struct CStreams([*mut libc::FILE; 3]);

// SAFETY: the FILE pointers are owned exclusively by this value and only
// touched by libplot while the owning context's lock is held.
unsafe impl Send for CStreams {}

impl CStreams {
    fn open(streams: PlotterStreams) -> PlotResult<Self> {
        let PlotterStreams {
            input,
            output,
            error,
        } = streams;
        let mut files = Vec::with_capacity(3);
        for (stream, role, mode) in [
            (input, StreamRole::Input, c"r"),
            (output, StreamRole::Output, c"w"),
            (error, StreamRole::Error, c"w"),
        ] {
            let label = stream_label(&stream);
            match to_c_file(stream, mode) {
                Ok(file) => files.push(file),
                Err(source) => {
                    for file in files {
                        // SAFETY: each pointer came from a successful fdopen above.
                        unsafe { libc::fclose(file) };
                    }
                    return Err(PlotError::stream(role, label, source));
                }
            }
        }
        Ok(CStreams([files[0], files[1], files[2]]))
    }

    fn as_tuple(&self) -> (*mut libc::FILE, *mut libc::FILE, *mut libc::FILE) {
        (self.0[0], self.0[1], self.0[2])
    }
}

impl Drop for CStreams {
    fn drop(&mut self) {
        for file in self.0 {
            // SAFETY: each pointer came from fdopen and is closed exactly once.
            unsafe { libc::fclose(file) };
        }
    }
}

fn stream_label(stream: &Stream) -> &'static str {
    match stream {
        Stream::Stdin => "<stdin>",
        Stream::Stdout => "<stdout>",
        Stream::Stderr => "<stderr>",
        Stream::File(_) => "<file>",
    }
}

fn to_c_file(stream: Stream, mode: &CStr) -> io::Result<*mut libc::FILE> {
    let fd = stream.into_raw_fd()?;
    // SAFETY: fd is a valid descriptor we own; mode is NUL-terminated.
    let file = unsafe { libc::fdopen(fd, mode.as_ptr()) };
    if file.is_null() {
        let err = io::Error::last_os_error();
        // SAFETY: fdopen failed, so the descriptor is still ours to close.
        unsafe { libc::close(fd) };
        return Err(err);
    }
    Ok(file)
}

/// libplot loaded from a shared object.
///
/// Only one can be alive per process; share it through
/// [`Context::global`](crate::Context::global).
pub struct NativeLibrary {
    path: String,
    streams: HashMap<Handle, CStreams>,
    library: libloading::Library,
    // released only after the library is unloaded
    _claim: ProcessClaim,
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("path", &self.path)
            .field("plotters", &self.streams.len())
            .finish()
    }
}

impl NativeLibrary {
    /// Load libplot from `$RPLOT_LIBPLOT`, or else from the platform's usual names.
    pub fn load() -> PlotResult<Self> {
        if let Some(path) = std::env::var_os(LIBRARY_ENV) {
            return Self::load_from(path);
        }
        let mut failures = Vec::new();
        for name in SEARCH_NAMES {
            match Self::load_from(name) {
                Ok(library) => return Ok(library),
                Err(err @ PlotError::LibraryInUse { .. }) => return Err(err),
                Err(err) => failures.push(err.to_string()),
            }
        }
        Err(PlotError::LibraryUnavailable(failures.join("; ")))
    }

    /// Load libplot from an explicit path or soname.
    ///
    /// Fails with [`PlotError::LibraryInUse`] while another `NativeLibrary`
    /// is alive in this process.
    pub fn load_from(path: impl AsRef<OsStr>) -> PlotResult<Self> {
        let path = path.as_ref();
        let display = path.to_string_lossy().into_owned();
        // SAFETY: libplot's initialisers have no preconditions.
        let library = unsafe { libloading::Library::new(path) }
            .map_err(|e| PlotError::LibraryUnavailable(format!("{display}: {e}")))?;
        // Reject shared objects that are not libplot.
        // SAFETY: only the symbol's presence is checked; it is never called here.
        unsafe { library.get::<unsafe extern "C" fn() -> c_int>(b"pl_newpl") }
            .map_err(|e| PlotError::missing_symbol("pl_newpl", format!("{display} ({e})")))?;
        let Some(claim) = ProcessClaim::acquire() else {
            return Err(PlotError::LibraryInUse { path: display });
        };
        let native = Self {
            path: display,
            streams: HashMap::new(),
            library,
            _claim: claim,
        };
        tracing::debug!(path = %native.path, "loaded libplot");
        Ok(native)
    }

    /// Where the library was loaded from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// # Safety
    ///
    /// `F` must match the symbol's C prototype.
    unsafe fn symbol<F>(&self, name: &str) -> PlotResult<Symbol<'_, F>> {
        unsafe { self.library.get::<F>(name.as_bytes()) }
            .map_err(|e| PlotError::missing_symbol(name, format!("{} ({e})", self.path)))
    }
}

macro_rules! call_native {
    ($lib:ident, $name:expr, fn($($ty:ty),*) -> $ret:ty $(, $arg:expr)*) => {{
        // SAFETY: the operation table and this dispatcher declare the libplot
        // prototype of the symbol.
        unsafe {
            let func: Symbol<'_, unsafe extern "C" fn($($ty),*) -> $ret> = $lib.symbol($name)?;
            func($($arg),*)
        }
    }};
}

impl Library for NativeLibrary {
    fn name(&self) -> &str {
        "libplot"
    }

    fn new_plotter(&mut self, kind: &str, streams: PlotterStreams) -> PlotResult<i32> {
        let kind = CString::new(kind).map_err(|_| PlotError::InteriorNul { op: "newpl" })?;
        let files = CStreams::open(streams)?;
        let (input, output, error) = files.as_tuple();
        let handle = call_native!(
            self,
            "pl_newpl",
            fn(*const c_char, *mut libc::FILE, *mut libc::FILE, *mut libc::FILE) -> c_int,
            kind.as_ptr(),
            input,
            output,
            error
        );
        if handle >= 0 {
            self.streams.insert(Handle::new(handle), files);
        }
        Ok(handle)
    }

    fn select_plotter(&mut self, handle: Handle) -> PlotResult<i32> {
        Ok(call_native!(self, "pl_selectpl", fn(c_int) -> c_int, handle.raw()))
    }

    fn delete_plotter(&mut self, handle: Handle) -> PlotResult<i32> {
        let code = call_native!(self, "pl_deletepl", fn(c_int) -> c_int, handle.raw());
        if code >= 0 {
            self.streams.remove(&handle);
        }
        Ok(code)
    }

    fn set_param(&mut self, name: &str, value: &str) -> PlotResult<i32> {
        let c_name = CString::new(name).map_err(|_| PlotError::InteriorNul { op: "parampl" })?;
        let c_value = CString::new(value).map_err(|_| PlotError::InteriorNul { op: "parampl" })?;
        // libplot copies string parameter values, so c_value may be freed on return.
        Ok(call_native!(
            self,
            "pl_parampl",
            fn(*const c_char, *mut c_void) -> c_int,
            c_name.as_ptr(),
            c_value.as_ptr() as *mut c_void
        ))
    }

    fn invoke(&mut self, spec: &OpSpec, args: &[Arg]) -> PlotResult<Output> {
        use Arg::{Float as F, FloatList, Int as I, IntList, Str};
        use ReturnKind::{Measure, Status};

        let symbol = spec.symbol();
        let name = symbol.as_str();
        let output = match (args, spec.returns) {
            ([], Status) => Output::Status(call_native!(self, name, fn() -> c_int)),
            ([Str(s)], Status) => Output::Status(call_native!(
                self,
                name,
                fn(*const c_char) -> c_int,
                s.as_ptr()
            )),
            ([Str(s)], Measure) => Output::Measure(call_native!(
                self,
                name,
                fn(*const c_char) -> c_double,
                s.as_ptr()
            )),
            ([I(a)], Status) => Output::Status(call_native!(self, name, fn(c_int) -> c_int, *a)),
            ([F(a)], Status) => {
                Output::Status(call_native!(self, name, fn(c_double) -> c_int, *a))
            }
            ([F(a)], Measure) => {
                Output::Measure(call_native!(self, name, fn(c_double) -> c_double, *a))
            }
            ([I(a), I(b)], Status) => Output::Status(call_native!(
                self,
                name,
                fn(c_int, c_int) -> c_int,
                *a,
                *b
            )),
            ([F(a), F(b)], Status) => Output::Status(call_native!(
                self,
                name,
                fn(c_double, c_double) -> c_int,
                *a,
                *b
            )),
            ([I(a), I(b), I(c)], Status) => Output::Status(call_native!(
                self,
                name,
                fn(c_int, c_int, c_int) -> c_int,
                *a,
                *b,
                *c
            )),
            ([F(a), F(b), F(c)], Status) => Output::Status(call_native!(
                self,
                name,
                fn(c_double, c_double, c_double) -> c_int,
                *a,
                *b,
                *c
            )),
            ([I(h), I(v), Str(s)], Status) => Output::Status(call_native!(
                self,
                name,
                fn(c_int, c_int, *const c_char) -> c_int,
                *h,
                *v,
                s.as_ptr()
            )),
            ([I(a), I(b), I(c), I(d)], Status) => Output::Status(call_native!(
                self,
                name,
                fn(c_int, c_int, c_int, c_int) -> c_int,
                *a,
                *b,
                *c,
                *d
            )),
            ([F(a), F(b), F(c), F(d)], Status) => Output::Status(call_native!(
                self,
                name,
                fn(c_double, c_double, c_double, c_double) -> c_int,
                *a,
                *b,
                *c,
                *d
            )),
            ([F(x), F(y), I(kind), F(size)], Status) => Output::Status(call_native!(
                self,
                name,
                fn(c_double, c_double, c_int, c_double) -> c_int,
                *x,
                *y,
                *kind,
                *size
            )),
            ([I(n), IntList(dashes), I(offset)], Status) => Output::Status(call_native!(
                self,
                name,
                fn(c_int, *const c_int, c_int) -> c_int,
                *n,
                dashes.as_ptr(),
                *offset
            )),
            ([I(n), FloatList(dashes), F(offset)], Status) => Output::Status(call_native!(
                self,
                name,
                fn(c_int, *const c_double, c_double) -> c_int,
                *n,
                dashes.as_ptr(),
                *offset
            )),
            ([I(a), I(b), I(c), I(d), I(e)], Status) => Output::Status(call_native!(
                self,
                name,
                fn(c_int, c_int, c_int, c_int, c_int) -> c_int,
                *a,
                *b,
                *c,
                *d,
                *e
            )),
            ([F(a), F(b), F(c), F(d), F(e)], Status) => Output::Status(call_native!(
                self,
                name,
                fn(c_double, c_double, c_double, c_double, c_double) -> c_int,
                *a,
                *b,
                *c,
                *d,
                *e
            )),
            ([I(a), I(b), I(c), I(d), I(e), I(f)], Status) => Output::Status(call_native!(
                self,
                name,
                fn(c_int, c_int, c_int, c_int, c_int, c_int) -> c_int,
                *a,
                *b,
                *c,
                *d,
                *e,
                *f
            )),
            ([F(a), F(b), F(c), F(d), F(e), F(f)], Status) => Output::Status(call_native!(
                self,
                name,
                fn(c_double, c_double, c_double, c_double, c_double, c_double) -> c_int,
                *a,
                *b,
                *c,
                *d,
                *e,
                *f
            )),
            ([I(a), I(b), I(c), I(d), I(e), I(f), I(g), I(h)], Status) => {
                Output::Status(call_native!(
                    self,
                    name,
                    fn(c_int, c_int, c_int, c_int, c_int, c_int, c_int, c_int) -> c_int,
                    *a,
                    *b,
                    *c,
                    *d,
                    *e,
                    *f,
                    *g,
                    *h
                ))
            }
            ([F(a), F(b), F(c), F(d), F(e), F(f), F(g), F(h)], Status) => {
                Output::Status(call_native!(
                    self,
                    name,
                    fn(
                        c_double,
                        c_double,
                        c_double,
                        c_double,
                        c_double,
                        c_double,
                        c_double,
                        c_double
                    ) -> c_int,
                    *a,
                    *b,
                    *c,
                    *d,
                    *e,
                    *f,
                    *g,
                    *h
                ))
            }
            _ => return Err(PlotError::UnsupportedSignature { op: spec.name }),
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_library_is_reported() {
        let err = NativeLibrary::load_from("/nonexistent/libplot.so").unwrap_err();
        assert!(matches!(err, PlotError::LibraryUnavailable(_)));
    }

    #[test]
    fn test_register_can_be_claimed_once() {
        let claim = ProcessClaim::acquire().unwrap();
        assert!(ProcessClaim::acquire().is_none());
        drop(claim);
        let again = ProcessClaim::acquire();
        assert!(again.is_some());
    }

    #[test]
    fn test_standard_streams_convert_to_files() {
        let streams = crate::streams::StreamSpec::standard().open().unwrap();
        let files = CStreams::open(streams).unwrap();
        let (input, output, error) = files.as_tuple();
        assert!(!input.is_null());
        assert!(!output.is_null());
        assert!(!error.is_null());
    }
}
