//! Feed file output
//!
//! Feeds are written to hidden sibling files first and renamed into place
//! only once every feed of a run has been staged, so readers never see a
//! half-written feed and a failed write leaves the previous outputs alone.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::error::{FeedError, Result};

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "feed".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> FeedError + '_ {
    move |source| FeedError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// A feed written to its temporary file, waiting to be renamed into place
#[derive(Debug)]
pub struct StagedFeed {
    tmp: PathBuf,
    path: PathBuf,
}

impl StagedFeed {
    /// Move the staged file over the destination
    pub fn commit(self) -> Result<()> {
        fs::rename(&self.tmp, &self.path).map_err(write_error(&self.path))?;
        tracing::debug!(path = %self.path.display(), "wrote feed");
        Ok(())
    }

    /// Remove the staged file, leaving the destination untouched
    pub fn discard(self) {
        let _ = fs::remove_file(&self.tmp);
    }
}

/// Write `contents` next to `path`, creating parent directories as needed
pub fn stage_feed(path: &Path, contents: &str) -> Result<StagedFeed> {
    if path.is_dir() {
        return Err(FeedError::Write {
            path: path.to_path_buf(),
            source: std::io::Error::other("output path is a directory"),
        });
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_error(path))?;
        }
    }

    let tmp = temp_path(path);
    let written = (|| -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    })();
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(write_error(path)(e));
    }

    tracing::trace!(path = %path.display(), bytes = contents.len(), "staged feed");
    Ok(StagedFeed {
        tmp,
        path: path.to_path_buf(),
    })
}

/// Write every `(path, contents)` pair; nothing is renamed into place until
/// all of them are staged
pub fn write_feeds<'a, I>(feeds: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a Path, &'a str)>,
{
    let mut staged = Vec::new();
    for (path, contents) in feeds {
        match stage_feed(path, contents) {
            Ok(feed) => staged.push(feed),
            Err(e) => {
                staged.into_iter().for_each(StagedFeed::discard);
                return Err(e);
            }
        }
    }
    for feed in staged {
        feed.commit()?;
    }
    Ok(())
}

/// Write a single feed file
pub fn write_feed(path: &Path, contents: &str) -> Result<()> {
    stage_feed(path, contents)?.commit()
}
