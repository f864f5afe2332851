// Result listings and output-path bookkeeping
use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::{DateTime, Local};
use domscore_core::{Error, Result, RowScore};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the listing inside a run directory
pub const RESULT_FILE_NAME: &str = "domination.txt";

pub const LISTING_HEADER: &str = "id\tscore";

/// Write through a temporary file renamed over `path`, so readers never see
/// a partial file.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(write)
        .map_err(|e| match e {
            atomicwrites::Error::Internal(io) => Error::file(path, io),
            atomicwrites::Error::User(e) => e,
        })
}

/// Write `id\tscore` lines in the order given, after a header line
pub fn write_scores<W: Write>(writer: W, scores: &[RowScore]) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "{}", LISTING_HEADER)?;
    for s in scores {
        writeln!(writer, "{}\t{}", s.id, s.score)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_scores_file(path: &Path, scores: &[RowScore]) -> Result<()> {
    write_atomic(path, |file| write_scores(file, scores))?;
    info!(rows = scores.len(), "Scores written to {:?}", path);
    Ok(())
}

/// Parse a listing produced by [`write_scores`]
pub fn read_scores<R: Read>(reader: R) -> Result<Vec<RowScore>> {
    let mut scores = Vec::new();
    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let line_no = index as u64 + 1;
        if index == 0 {
            if line.trim() != LISTING_HEADER {
                return Err(Error::invalid_input(line_no, format!("unexpected header '{}'", line)));
            }
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let (id, score) = line
            .split_once('\t')
            .ok_or_else(|| Error::invalid_input(line_no, "expected two tab-separated columns"))?;
        let id = id
            .trim()
            .parse()
            .map_err(|_| Error::invalid_input(line_no, format!("bad row id '{}'", id)))?;
        let score = score
            .trim()
            .parse()
            .map_err(|_| Error::invalid_input(line_no, format!("bad score '{}'", score)))?;
        scores.push(RowScore { id, score });
    }
    Ok(scores)
}

pub fn read_scores_file(path: &Path) -> Result<Vec<RowScore>> {
    let file = File::open(path).map_err(|e| Error::file(path, e))?;
    read_scores(file)
}

/// `<base>/<YYYYMMDD_HHMMSS>` for the given moment
pub fn run_directory(base: &Path, at: DateTime<Local>) -> PathBuf {
    base.join(at.format("%Y%m%d_%H%M%S").to_string())
}

/// Create a fresh timestamped run directory under `base` and return the
/// listing path inside it.
pub fn prepare_run_output(base: &Path) -> Result<PathBuf> {
    let dir = run_directory(base, Local::now());
    fs::create_dir_all(&dir).map_err(|e| Error::file(&dir, e))?;
    Ok(dir.join(RESULT_FILE_NAME))
}
