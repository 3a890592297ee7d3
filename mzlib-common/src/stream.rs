//! Byte stream used for binary serialization of containers.
//!
//! Records are written as the raw native-endian bytes of `Pod` values.
//! Lengths are prefixed as `u32`. A label is a `u64` tag written around
//! a payload to detect schema drift when reading it back; label `0`
//! disables framing entirely.
use crate::error::{Error, Result};
use bytemuck::Pod;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub trait Stream {
    /// Fill the whole buffer from the stream.
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Write the whole buffer to the stream.
    fn write_bytes(&mut self, buf: &[u8]) -> Result<()>;

    /// Move read position to the beginning.
    fn rewind(&mut self) -> Result<()>;

    /// Move read position to the end.
    fn seek_end(&mut self) -> Result<()>;

    /// Returns true if nothing is left to read.
    fn at_end(&mut self) -> Result<bool>;

    fn is_file(&self) -> bool;

    fn flush(&mut self) -> Result<()>;

    /// Discard all content.
    fn clear(&mut self) -> Result<()>;

    #[inline]
    fn read<T: Pod>(&mut self) -> Result<T>
    where
        Self: Sized,
    {
        let mut value = T::zeroed();
        self.read_bytes(bytemuck::bytes_of_mut(&mut value))?;
        Ok(value)
    }

    #[inline]
    fn read_into<T: Pod>(&mut self, value: &mut T) -> Result<()>
    where
        Self: Sized,
    {
        self.read_bytes(bytemuck::bytes_of_mut(value))
    }

    #[inline]
    fn write<T: Pod>(&mut self, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        self.write_bytes(bytemuck::bytes_of(value))
    }

    #[inline]
    fn read_slice<T: Pod>(&mut self, dst: &mut [T]) -> Result<()>
    where
        Self: Sized,
    {
        self.read_bytes(bytemuck::cast_slice_mut(dst))
    }

    #[inline]
    fn write_slice<T: Pod>(&mut self, src: &[T]) -> Result<()>
    where
        Self: Sized,
    {
        self.write_bytes(bytemuck::cast_slice(src))
    }

    /// Read a `u32` length prefix.
    #[inline]
    fn read_len(&mut self) -> Result<usize>
    where
        Self: Sized,
    {
        let len: u32 = self.read()?;
        Ok(len as usize)
    }

    /// Write a `u32` length prefix.
    #[inline]
    fn write_len(&mut self, len: usize) -> Result<()>
    where
        Self: Sized,
    {
        let len = u32::try_from(len)
            .map_err(|_| Error::InvalidArgument(format!("length {} exceeds u32 prefix", len)))?;
        self.write(&len)
    }

    /// Read a label and compare it with the expected encoding.
    /// Returns true on mismatch. Encoding 0 reads nothing and never mismatches.
    fn read_label(&mut self, encoding: u64) -> Result<bool>
    where
        Self: Sized,
    {
        if encoding == 0 {
            return Ok(false);
        }
        let label: u64 = self.read()?;
        if label != encoding {
            log::debug!("label mismatch: expected {}, found {}", encoding, label);
            return Ok(true);
        }
        Ok(false)
    }

    /// Write a label. Encoding 0 writes nothing.
    #[inline]
    fn write_label(&mut self, encoding: u64) -> Result<()>
    where
        Self: Sized,
    {
        if encoding != 0 {
            self.write(&encoding)?;
        }
        Ok(())
    }
}

/// In-memory stream. Writes always append, reads advance an
/// independent read position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemStream {
    data: Vec<u8>,
    pos: usize,
}

impl MemStream {
    #[inline]
    pub fn new() -> Self {
        MemStream::default()
    }

    #[inline]
    pub fn from_bytes(data: Vec<u8>) -> Self {
        MemStream { data, pos: 0 }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Write all content to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.data)?;
        Ok(())
    }

    /// Append content of a file.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let mut f = File::open(path)?;
        f.read_to_end(&mut self.data)?;
        Ok(())
    }
}

impl Stream for MemStream {
    #[inline]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        let end = self.pos + buf.len();
        if end > self.data.len() {
            return Err(Error::IOError(format!(
                "read {} bytes at {} beyond end {}",
                buf.len(),
                self.pos,
                self.data.len()
            )));
        }
        buf.copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(())
    }

    #[inline]
    fn write_bytes(&mut self, buf: &[u8]) -> Result<()> {
        self.data.extend_from_slice(buf);
        Ok(())
    }

    #[inline]
    fn rewind(&mut self) -> Result<()> {
        self.pos = 0;
        Ok(())
    }

    #[inline]
    fn seek_end(&mut self) -> Result<()> {
        self.pos = self.data.len();
        Ok(())
    }

    #[inline]
    fn at_end(&mut self) -> Result<bool> {
        Ok(self.pos >= self.data.len())
    }

    #[inline]
    fn is_file(&self) -> bool {
        false
    }

    #[inline]
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn clear(&mut self) -> Result<()> {
        self.data.clear();
        self.pos = 0;
        Ok(())
    }
}

/// File-backed stream sharing one position for reads and writes.
#[derive(Debug)]
pub struct FileStream {
    file: File,
    path: PathBuf,
}

impl FileStream {
    /// Open a file for reading and writing, creating it if missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        log::debug!("open file stream {}", path.display());
        Ok(FileStream { file, path })
    }

    /// Open an existing file for reading only.
    pub fn open_for_read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        log::debug!("open file stream {} for read", path.display());
        Ok(FileStream { file, path })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Stream for FileStream {
    #[inline]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.file.read_exact(buf)?;
        Ok(())
    }

    #[inline]
    fn write_bytes(&mut self, buf: &[u8]) -> Result<()> {
        self.file.write_all(buf)?;
        Ok(())
    }

    #[inline]
    fn rewind(&mut self) -> Result<()> {
        self.file.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    #[inline]
    fn seek_end(&mut self) -> Result<()> {
        self.file.seek(SeekFrom::End(0))?;
        Ok(())
    }

    #[inline]
    fn at_end(&mut self) -> Result<bool> {
        let pos = self.file.stream_position()?;
        let len = self.file.metadata()?.len();
        Ok(pos >= len)
    }

    #[inline]
    fn is_file(&self) -> bool {
        true
    }

    #[inline]
    fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }

    /// Truncate the file and move to the beginning.
    #[inline]
    fn clear(&mut self) -> Result<()> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mzlib-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_mem_stream_records() {
        let mut s = MemStream::new();
        assert!(s.at_end().unwrap());
        s.write(&42i32).unwrap();
        s.write(&1.5f64).unwrap();
        s.write_slice(&[1u16, 2, 3]).unwrap();
        assert_eq!(4 + 8 + 6, s.as_bytes().len());
        assert_eq!(42, s.read::<i32>().unwrap());
        let mut f = 0f64;
        s.read_into(&mut f).unwrap();
        assert_eq!(1.5, f);
        let mut arr = [0u16; 3];
        s.read_slice(&mut arr).unwrap();
        assert_eq!([1, 2, 3], arr);
        assert!(s.at_end().unwrap());
        assert!(s.read::<u8>().is_err());
        s.rewind().unwrap();
        assert_eq!(42, s.read::<i32>().unwrap());
        s.seek_end().unwrap();
        assert!(s.at_end().unwrap());
        s.clear().unwrap();
        assert!(s.as_bytes().is_empty());
    }

    #[test]
    fn test_labels() {
        let mut s = MemStream::new();
        s.write_label(0).unwrap();
        assert!(s.as_bytes().is_empty());
        s.write_label(7).unwrap();
        s.write_label(7).unwrap();
        assert!(!s.read_label(0).unwrap());
        assert!(!s.read_label(7).unwrap());
        assert!(s.read_label(8).unwrap());
        assert!(s.at_end().unwrap());
    }

    #[test]
    fn test_length_prefix() {
        let mut s = MemStream::new();
        s.write_len(5).unwrap();
        assert_eq!(4, s.as_bytes().len());
        assert_eq!(5, s.read_len().unwrap());
    }

    #[test]
    fn test_mem_stream_save_load() {
        let path = temp_path("mem.bin");
        let mut s = MemStream::new();
        s.write(&0x1234_5678u32).unwrap();
        s.save(&path).unwrap();
        let mut s2 = MemStream::new();
        s2.load(&path).unwrap();
        assert_eq!(s.as_bytes(), s2.as_bytes());
        assert_eq!(0x1234_5678, s2.read::<u32>().unwrap());
        std::fs::remove_file(&path).unwrap();
        assert!(MemStream::new().load(&path).is_err());
    }

    #[test]
    fn test_file_stream() {
        let path = temp_path("file.bin");
        {
            let mut fs = FileStream::open(&path).unwrap();
            assert!(fs.is_file());
            fs.clear().unwrap();
            fs.write_label(3).unwrap();
            fs.write(&99i64).unwrap();
            fs.flush().unwrap();
            assert!(fs.at_end().unwrap());
            fs.rewind().unwrap();
            assert!(!fs.read_label(3).unwrap());
            assert_eq!(99, fs.read::<i64>().unwrap());
        }
        let mut fs = FileStream::open_for_read(&path).unwrap();
        assert_eq!(path.as_path(), fs.path());
        assert!(fs.read_label(4).unwrap());
        fs.seek_end().unwrap();
        assert!(fs.at_end().unwrap());
        drop(fs);
        std::fs::remove_file(&path).unwrap();
        assert!(FileStream::open_for_read(&path).is_err());
    }

    #[test]
    fn test_mem_stream_random_slices() -> anyhow::Result<()> {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let n = rng.gen_range(0..100);
            let src: Vec<u64> = (0..n).map(|_| rng.gen()).collect();
            let mut s = MemStream::new();
            s.write_len(src.len())?;
            s.write_slice(&src)?;
            let mut dst = vec![0u64; s.read_len()?];
            s.read_slice(&mut dst)?;
            assert_eq!(src, dst);
            assert!(s.at_end()?);
        }
        Ok(())
    }
}
