use crate::error::{IndexError, Result};
use memmap2::Mmap;
use std::fs::{self, File};
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// Default reference file name, relative to the working directory
pub const DEFAULT_REFERENCE: &str = "old_file.dat";

enum Backing {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

/// The immutable byte sequence an index is built over.
///
/// [`open`](Self::open) reads the whole file into an owned buffer before
/// indexing starts. [`map`](Self::map) memory-maps it instead; the file must
/// then stay unmodified while the text is alive.
pub struct ReferenceText {
    backing: Backing,
    source: Option<PathBuf>,
}

impl ReferenceText {
    /// Read the whole file at `path` into memory
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| IndexError::Reference {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("read reference {} ({} bytes)", path.display(), bytes.len());

        Ok(Self {
            source: Some(path.to_path_buf()),
            ..Self::from_bytes(bytes)
        })
    }

    /// Memory-map the file at `path`; empty files fall back to an owned buffer
    pub fn map(path: &Path) -> Result<Self> {
        let io_err = |source| IndexError::Reference {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let len = file.metadata().map_err(io_err)?.len();

        let backing = if len == 0 {
            Backing::Owned(Vec::new())
        } else {
            // Pages are read on demand; truncating the file underneath the
            // mapping faults the process.
            let mmap = unsafe { Mmap::map(&file) }.map_err(io_err)?;
            Backing::Mapped(mmap)
        };

        log::debug!("mapped reference {} ({} bytes)", path.display(), len);

        Ok(Self {
            backing,
            source: Some(path.to_path_buf()),
        })
    }

    /// Wrap bytes already in memory
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            backing: Backing::Owned(bytes.into()),
            source: None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match &self.backing {
            Backing::Mapped(m) => &m[..],
            Backing::Owned(v) => v.as_slice(),
        }
    }

    /// File the text was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl Deref for ReferenceText {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for ReferenceText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceText")
            .field("len", &self.len())
            .field("source", &self.source)
            .finish()
    }
}
