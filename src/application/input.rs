//! Loading of sequence input given on the command line

use std::path::Path;

use tracing::debug;

use crate::application::{ApplicationResult, IoResultExt};
use crate::infrastructure::traits::FileSystem;

/// Source name that reads from standard input.
pub const STDIN_SOURCE: &str = "-";

/// Resolve a sequence argument to its content.
///
/// - `-` reads standard input
/// - an existing file is read whole
/// - anything else is passed through as raw sequence data or a database entry identifier
pub fn load_data(fs: &dyn FileSystem, source: &str) -> ApplicationResult<String> {
    if source == STDIN_SOURCE {
        debug!("reading sequence from stdin");
        return fs
            .read_stdin()
            .with_path_context("read sequence", Path::new("<stdin>"));
    }

    let path = Path::new(source);
    if fs.is_file(path) {
        debug!(path = %path.display(), "reading sequence file");
        fs.read_to_string(path)
            .with_path_context("read sequence file", path)
    } else {
        debug!("using argument as sequence data");
        Ok(source.to_string())
    }
}
