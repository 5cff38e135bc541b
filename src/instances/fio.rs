//! # Module for File IO (Writing and Parsing)
//!
//! It is recommended to parse and write through the interface of instance
//! types rather than using the functions in [`dimacs`] directly.

use std::{fs::File, io, path::Path};

pub mod dimacs;

/// Compression of a file, as determined by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compression {
    Plain,
    #[cfg(feature = "compression")]
    Bzip2,
    #[cfg(feature = "compression")]
    Gzip,
    #[cfg(feature = "compression")]
    Xz,
}

impl Compression {
    /// Without feature `compression`, every file is treated as plain text
    fn of_path(path: &Path) -> Compression {
        #[cfg(feature = "compression")]
        if let Some(ext) = path.extension() {
            if ext.eq_ignore_ascii_case("bz2") {
                return Compression::Bzip2;
            }
            if ext.eq_ignore_ascii_case("gz") {
                return Compression::Gzip;
            }
            if ext.eq_ignore_ascii_case("xz") {
                return Compression::Xz;
            }
        }
        #[cfg(not(feature = "compression"))]
        let _ = path;
        Compression::Plain
    }
}

/// Opens a reader for the file at Path.
/// With feature `compression` supports bzip2, gzip and xz compression.
pub(crate) fn open_compressed_uncompressed_read<P: AsRef<Path>>(
    path: P,
) -> Result<Box<dyn io::Read>, io::Error> {
    let path = path.as_ref();
    let raw_reader = File::open(path)?;
    Ok(match Compression::of_path(path) {
        Compression::Plain => Box::new(raw_reader),
        #[cfg(feature = "compression")]
        Compression::Bzip2 => Box::new(bzip2::read::BzDecoder::new(raw_reader)),
        #[cfg(feature = "compression")]
        Compression::Gzip => Box::new(flate2::read::GzDecoder::new(raw_reader)),
        #[cfg(feature = "compression")]
        Compression::Xz => Box::new(xz2::read::XzDecoder::new(raw_reader)),
    })
}

/// Opens a buffered writer for the file at Path. The file is created (or
/// truncated) immediately.
/// With feature `compression` supports bzip2, gzip and xz compression.
pub(crate) fn open_compressed_uncompressed_write<P: AsRef<Path>>(
    path: P,
) -> Result<Box<dyn io::Write>, io::Error> {
    let path = path.as_ref();
    let raw_writer = File::create(path)?;
    Ok(match Compression::of_path(path) {
        Compression::Plain => Box::new(io::BufWriter::new(raw_writer)),
        #[cfg(feature = "compression")]
        Compression::Bzip2 => Box::new(io::BufWriter::new(bzip2::write::BzEncoder::new(
            raw_writer,
            bzip2::Compression::fast(),
        ))),
        #[cfg(feature = "compression")]
        Compression::Gzip => Box::new(io::BufWriter::new(flate2::write::GzEncoder::new(
            raw_writer,
            flate2::Compression::fast(),
        ))),
        #[cfg(feature = "compression")]
        Compression::Xz => Box::new(io::BufWriter::new(xz2::write::XzEncoder::new(
            raw_writer, 1,
        ))),
    })
}
