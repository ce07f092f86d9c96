use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Buffered, seekable byte stream.
pub trait ReadSeek: BufRead + Seek {}

impl<T: BufRead + Seek> ReadSeek for T {}

/// Source of raw data that can be opened for reading.
pub trait RawSource {
    /// Name used in log messages.
    fn name(&self) -> String;

    /// Opens the source, positioned at the start of the data. The returned
    /// stream is closed when dropped.
    fn open(&mut self) -> io::Result<Box<dyn ReadSeek + '_>>;
}

/// Raw data file at a path, opened on demand.
#[derive(Debug, Clone)]
pub struct PathSource {
    path: PathBuf,
}

impl PathSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RawSource for PathSource {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn open(&mut self) -> io::Result<Box<dyn ReadSeek + '_>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Raw data from a handle that is already open, such as an in-memory
/// buffer.
pub struct ReaderSource<R> {
    inner: R,
    name: String,
}

impl<R: Read + Seek> ReaderSource<R> {
    pub fn new(inner: R, name: &str) -> Self {
        Self {
            inner,
            name: name.to_string(),
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> RawSource for ReaderSource<R> {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn open(&mut self) -> io::Result<Box<dyn ReadSeek + '_>> {
        self.inner.seek(SeekFrom::Start(0))?;
        Ok(Box::new(BufReader::new(&mut self.inner)))
    }
}
