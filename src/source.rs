use std::fs::OpenOptions;
use std::io::{self, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

/// Non-blocking reader for the PCM fifo.
///
/// The stream delivers interleaved little-endian signed 16-bit samples. The
/// producer writes asynchronously and irregularly, so a tick that finds no
/// data is a steady-state condition, not a failure.
pub struct FifoSource {
    file: std::fs::File,
    bytes: Vec<u8>,
    samples: Vec<i16>,
}

impl FifoSource {
    /// Open the stream read-only and non-blocking for the process lifetime.
    pub fn open(path: &Path, sample_count: usize) -> io::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .map_err(|e| io::Error::new(e.kind(), format!("open {}: {}", path.display(), e)))?;

        Ok(Self {
            file,
            bytes: vec![0; sample_count * 2],
            samples: vec![0; sample_count],
        })
    }

    /// One read attempt, returning the number of samples obtained.
    ///
    /// A failed read (typically `WouldBlock`) or end-of-stream yields 0; no
    /// retry happens before the next tick. A trailing odd byte of a short
    /// read is dropped.
    pub fn read_block(&mut self) -> usize {
        let n = match self.file.read(&mut self.bytes) {
            Ok(n) => n,
            Err(_) => return 0,
        };

        let got = n / 2;
        for (slot, chunk) in self.samples[..got]
            .iter_mut()
            .zip(self.bytes[..got * 2].chunks_exact(2))
        {
            *slot = i16::from_le_bytes([chunk[0], chunk[1]]);
        }
        got
    }

    /// The raw block; only the first `read_block()` samples are current.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::FifoSource;
    use std::ffi::CString;
    use std::fs::OpenOptions;
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;
    use std::path::PathBuf;

    struct TempFifo {
        path: PathBuf,
    }

    impl TempFifo {
        fn new(tag: &str) -> Self {
            let path = std::env::temp_dir().join(format!("termspec-test-{}-{}", tag, std::process::id()));
            let cpath = CString::new(path.to_str().unwrap()).unwrap();
            let rc = unsafe { libc::mkfifo(cpath.as_ptr(), 0o600) };
            assert_eq!(rc, 0, "mkfifo {}", path.display());
            Self { path }
        }
    }

    impl Drop for TempFifo {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    #[test]
    fn missing_path_is_a_startup_error() {
        let path = std::env::temp_dir().join("termspec-test-no-such-fifo");
        assert!(FifoSource::open(&path, 16).is_err());
    }

    #[test]
    fn silent_fifo_reads_zero_without_blocking() {
        let fifo = TempFifo::new("silent");
        let mut source = FifoSource::open(&fifo.path, 16).unwrap();

        // No writer at all: every tick sees an empty stream.
        for _ in 0..5 {
            assert_eq!(source.read_block(), 0);
        }
    }

    #[test]
    fn short_write_yields_partial_block() {
        let fifo = TempFifo::new("short");
        let mut source = FifoSource::open(&fifo.path, 16).unwrap();

        // The open read end lets a non-blocking writer attach.
        let mut writer = OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(&fifo.path)
            .unwrap();

        let frames: [i16; 4] = [1000, -1000, 2000, -2000];
        let mut bytes = Vec::new();
        for s in frames {
            bytes.extend_from_slice(&s.to_le_bytes());
        }
        // Trailing odd byte must be dropped, not misparsed.
        bytes.push(0xff);
        writer.write_all(&bytes).unwrap();

        assert_eq!(source.read_block(), 4);
        assert_eq!(&source.samples()[..4], &frames);

        // Drained again: back to silence.
        assert_eq!(source.read_block(), 0);
    }
}
