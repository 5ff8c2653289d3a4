use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};

/// Size at which the log file is rotated.
pub const MAX_LOG_BYTES: u64 = 100 * 1024 * 1024;

/// Number of rotated files kept next to the active one (`<path>.1` is the newest).
pub const LOG_BACKUPS: usize = 5;

/// Append-mode log file that rolls over to numbered backups once it reaches a size cap.
#[derive(Debug)]
pub struct RotatingLogFile {
    path: Utf8PathBuf,
    max_bytes: u64,
    backups: usize,
    file: File,
    written: u64,
}

impl RotatingLogFile {
    /// Open `path` for appending, continuing from its current size.
    pub fn open(path: &Utf8Path, max_bytes: u64, backups: usize) -> io::Result<Self> {
        let file = open_append(path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path: path.to_path_buf(),
            max_bytes: max_bytes.max(1),
            backups,
            file,
            written,
        })
    }

    fn backup_path(&self, n: usize) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}.{n}", self.path))
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.backups == 0 {
            self.file = OpenOptions::new().write(true).truncate(true).open(&self.path)?;
        } else {
            for n in (1..self.backups).rev() {
                let from = self.backup_path(n);
                if from.exists() {
                    fs::rename(&from, self.backup_path(n + 1))?;
                }
            }
            fs::rename(&self.path, self.backup_path(1))?;
            self.file = open_append(&self.path)?;
        }

        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingLogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }

        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Utf8Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
