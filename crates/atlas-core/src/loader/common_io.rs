// crates/atlas-core/src/loader/common_io.rs
use crate::error::{AtlasError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

/// Suffix appended to the countries file name for the default snapshot path.
#[cfg(feature = "compact")]
pub const SNAPSHOT_SUFFIX: &str = "snapshot.bin.gz";
#[cfg(not(feature = "compact"))]
pub const SNAPSHOT_SUFFIX: &str = "snapshot.bin";

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Opens a file for reading, gunzipping it when the name ends in `.gz`.
pub(crate) fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        AtlasError::data_unavailable(path.display().to_string(), e)
    })?;
    let reader = BufReader::new(file);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(AtlasError::data_unavailable(
                path.display().to_string(),
                "gzip input requires the 'compact' feature",
            ));
        }
    }

    Ok(Box::new(reader))
}

/// Output side of [`open_stream`]. Call [`OutStream::finish`] when done so
/// the gzip trailer and buffered bytes are written with errors reported.
pub(crate) enum OutStream {
    Plain(BufWriter<File>),
    #[cfg(feature = "compact")]
    Gzip(GzEncoder<BufWriter<File>>),
}

impl OutStream {
    pub(crate) fn finish(self) -> Result<()> {
        let mut inner = match self {
            OutStream::Plain(w) => w,
            #[cfg(feature = "compact")]
            OutStream::Gzip(gz) => gz.finish()?,
        };
        inner.flush()?;
        Ok(())
    }
}

impl Write for OutStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            OutStream::Plain(w) => w.write(buf),
            #[cfg(feature = "compact")]
            OutStream::Gzip(gz) => gz.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            OutStream::Plain(w) => w.flush(),
            #[cfg(feature = "compact")]
            OutStream::Gzip(gz) => gz.flush(),
        }
    }
}

/// Creates a file for writing, gzipping it when the name ends in `.gz`.
pub(crate) fn create_stream(path: &Path) -> Result<OutStream> {
    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            let writer = BufWriter::new(File::create(path)?);
            return Ok(OutStream::Gzip(GzEncoder::new(writer, Compression::default())));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(AtlasError::Io(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "gzip output requires the 'compact' feature",
            )));
        }
    }

    Ok(OutStream::Plain(BufWriter::new(File::create(path)?)))
}

/// `countries.json` + `snapshot.bin.gz` -> `countries.json.snapshot.bin.gz`
pub fn get_cache_path(source_path: &Path, suffix: &str) -> PathBuf {
    let filename = source_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    source_path.with_file_name(format!("{filename}.{suffix}"))
}
