//! Byte-stream destinations bound to a plotter at construction.
//!
//! Each of the three streams is either a caller-supplied path or the process's
//! matching standard stream. Paths are opened before the library is asked for
//! a plotter; if any of them fails the ones already opened are closed again.

use crate::error::{PlotError, PlotResult, StreamRole};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Where one plotter stream goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StreamTarget {
    /// The process's standard input, output or error stream
    #[default]
    Standard,
    /// A file opened by the facade
    Path(PathBuf),
}

impl StreamTarget {
    /// `None` falls back to the standard stream.
    pub fn from_option<P: AsRef<Path>>(path: Option<P>) -> Self {
        match path {
            Some(path) => StreamTarget::Path(path.as_ref().to_path_buf()),
            None => StreamTarget::Standard,
        }
    }

    /// Returns true if this is the standard stream
    pub const fn is_standard(&self) -> bool {
        matches!(self, StreamTarget::Standard)
    }
}

/// The three stream destinations of one plotter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamSpec {
    /// Read by interactive plotters
    pub input: StreamTarget,
    /// Receives the graphics
    pub output: StreamTarget,
    /// Receives diagnostics
    pub error: StreamTarget,
}

impl StreamSpec {
    /// All three streams on the process's standard streams.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Build from three optional paths, in input/output/error order.
    pub fn from_paths<P: AsRef<Path>>(input: Option<P>, output: Option<P>, error: Option<P>) -> Self {
        Self {
            input: StreamTarget::from_option(input),
            output: StreamTarget::from_option(output),
            error: StreamTarget::from_option(error),
        }
    }

    /// Read plotter input from `path`.
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = StreamTarget::Path(path.into());
        self
    }

    /// Write graphics to `path`.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = StreamTarget::Path(path.into());
        self
    }

    /// Write diagnostics to `path`.
    pub fn with_error(mut self, path: impl Into<PathBuf>) -> Self {
        self.error = StreamTarget::Path(path.into());
        self
    }

    /// Open every path target.
    ///
    /// The input file is opened for reading; output and error files are
    /// created or truncated.
    pub fn open(&self) -> PlotResult<PlotterStreams> {
        let input = open_target(&self.input, StreamRole::Input)?;
        let output = open_target(&self.output, StreamRole::Output)?;
        let error = open_target(&self.error, StreamRole::Error)?;
        Ok(PlotterStreams {
            input,
            output,
            error,
        })
    }
}

fn open_target(target: &StreamTarget, role: StreamRole) -> PlotResult<Stream> {
    let path = match target {
        StreamTarget::Standard => {
            return Ok(match role {
                StreamRole::Input => Stream::Stdin,
                StreamRole::Output => Stream::Stdout,
                StreamRole::Error => Stream::Stderr,
            });
        }
        StreamTarget::Path(path) => path,
    };
    let file = match role {
        StreamRole::Input => File::open(path),
        StreamRole::Output | StreamRole::Error => OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path),
    };
    file.map(Stream::File)
        .map_err(|source| PlotError::stream(role, path, source))
}

/// An opened plotter stream.
#[derive(Debug)]
pub enum Stream {
    /// Standard input
    Stdin,
    /// Standard output
    Stdout,
    /// Standard error
    Stderr,
    /// A file opened from a [`StreamTarget::Path`]
    File(File),
}

impl Stream {
    /// Returns true for the three process streams
    pub const fn is_standard(&self) -> bool {
        !matches!(self, Stream::File(_))
    }

    /// Give up ownership as a raw descriptor.
    ///
    /// Standard streams are duplicated, so closing the returned descriptor
    /// never closes the process stream itself.
    #[cfg(unix)]
    pub fn into_raw_fd(self) -> io::Result<std::os::unix::io::RawFd> {
        use std::os::unix::io::IntoRawFd;

        let standard = match self {
            Stream::File(file) => return Ok(file.into_raw_fd()),
            Stream::Stdin => libc::STDIN_FILENO,
            Stream::Stdout => libc::STDOUT_FILENO,
            Stream::Stderr => libc::STDERR_FILENO,
        };
        // SAFETY: dup has no memory-safety preconditions.
        let fd = unsafe { libc::dup(standard) };
        if fd < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(fd)
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Stream::Stdin => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "standard input is not writable",
            )),
            Stream::Stdout => io::stdout().write(buf),
            Stream::Stderr => io::stderr().write(buf),
            Stream::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Stream::Stdin => Ok(()),
            Stream::Stdout => io::stdout().flush(),
            Stream::Stderr => io::stderr().flush(),
            Stream::File(file) => file.flush(),
        }
    }
}

/// The opened input, output and error streams of one plotter.
#[derive(Debug)]
pub struct PlotterStreams {
    /// Opened input stream
    pub input: Stream,
    /// Opened output stream
    pub output: Stream,
    /// Opened error stream
    pub error: Stream,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_missing_paths_fall_back_to_standard_streams() {
        let spec = StreamSpec::from_paths::<&str>(None, None, None);
        assert_eq!(spec, StreamSpec::standard());
        let streams = spec.open().unwrap();
        assert!(matches!(streams.input, Stream::Stdin));
        assert!(matches!(streams.output, Stream::Stdout));
        assert!(matches!(streams.error, Stream::Stderr));
    }

    #[test]
    fn test_output_path_is_created_and_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.meta");
        std::fs::write(&path, b"stale contents").unwrap();

        let mut streams = StreamSpec::standard().with_output(&path).open().unwrap();
        assert!(!streams.output.is_standard());
        streams.output.write_all(b"fresh").unwrap();
        drop(streams);

        let mut contents = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "fresh");
    }

    #[test]
    fn test_failure_reports_role() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("out");
        let bad = dir.path().join("missing").join("err");
        let err = StreamSpec::standard()
            .with_output(&good)
            .with_error(&bad)
            .open()
            .unwrap_err();
        assert!(matches!(
            err,
            PlotError::Stream {
                role: StreamRole::Error,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_input_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StreamSpec::standard()
            .with_input(dir.path().join("absent"))
            .open()
            .unwrap_err();
        assert!(matches!(
            err,
            PlotError::Stream {
                role: StreamRole::Input,
                ..
            }
        ));
    }
}
