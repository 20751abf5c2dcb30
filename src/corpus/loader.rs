use super::NgramCounts;
use crate::error::{CorpusError, KsResult};
use std::cmp::Reverse;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const MONOGRAM_FILE: &str = "1grams.csv";
pub const BIGRAM_FILE: &str = "2grams.csv";
pub const TRIGRAM_FILE: &str = "3grams.csv";

/// Reads each file fully, returning `(file name, text)` pairs. Each handle is
/// closed before the next file is opened.
pub fn read_text_sources<P: AsRef<Path>>(paths: &[P]) -> KsResult<Vec<(String, String)>> {
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!("Read source '{}' ({} bytes)", name, text.len());
        sources.push((name, text));
    }
    Ok(sources)
}

fn parse_token(file: &str, s: &str) -> Result<char, CorpusError> {
    let mut it = s.chars();
    match (it.next(), it.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CorpusError::InvalidTable {
            file: file.to_string(),
            reason: format!("'{}' is not a single character", s),
        }),
    }
}

fn parse_count(file: &str, s: &str) -> Result<u64, CorpusError> {
    s.trim().parse::<u64>().map_err(|_| CorpusError::InvalidTable {
        file: file.to_string(),
        reason: format!("'{}' is not a non-negative integer count", s),
    })
}

fn short_row(file: &str, len: usize) -> CorpusError {
    CorpusError::InvalidTable {
        file: file.to_string(),
        reason: format!("row has {} field(s)", len),
    }
}

/// Loads integer count tables written by [`save_counts`]. Missing bigram or
/// trigram tables are treated as empty; the monogram table is required.
/// Rows with a zero count are skipped.
pub fn load_counts<P: AsRef<Path>>(dir: P) -> KsResult<NgramCounts> {
    let root = dir.as_ref();
    let mut counts = NgramCounts::new();

    let mut rdr = csv::Reader::from_path(root.join(MONOGRAM_FILE))?;
    for result in rdr.records() {
        let rec = result?;
        if rec.len() < 2 {
            return Err(short_row(MONOGRAM_FILE, rec.len()).into());
        }
        let c = parse_token(MONOGRAM_FILE, &rec[0])?;
        *counts.chars.entry(c).or_default() += parse_count(MONOGRAM_FILE, &rec[1])?;
    }

    let p2 = root.join(BIGRAM_FILE);
    if p2.exists() {
        let mut rdr = csv::Reader::from_path(p2)?;
        for result in rdr.records() {
            let rec = result?;
            if rec.len() < 3 {
                return Err(short_row(BIGRAM_FILE, rec.len()).into());
            }
            let a = parse_token(BIGRAM_FILE, &rec[0])?;
            let b = parse_token(BIGRAM_FILE, &rec[1])?;
            *counts.bigrams.entry((a, b)).or_default() += parse_count(BIGRAM_FILE, &rec[2])?;
        }
    }

    let p3 = root.join(TRIGRAM_FILE);
    if p3.exists() {
        let mut rdr = csv::Reader::from_path(p3)?;
        for result in rdr.records() {
            let rec = result?;
            if rec.len() < 4 {
                return Err(short_row(TRIGRAM_FILE, rec.len()).into());
            }
            let a = parse_token(TRIGRAM_FILE, &rec[0])?;
            let b = parse_token(TRIGRAM_FILE, &rec[1])?;
            let c = parse_token(TRIGRAM_FILE, &rec[2])?;
            *counts.trigrams.entry((a, b, c)).or_default() += parse_count(TRIGRAM_FILE, &rec[3])?;
        }
    }

    let before = counts.chars.len() + counts.bigrams.len() + counts.trigrams.len();
    counts.chars.retain(|_, n| *n > 0);
    counts.bigrams.retain(|_, n| *n > 0);
    counts.trigrams.retain(|_, n| *n > 0);
    let dropped = before - (counts.chars.len() + counts.bigrams.len() + counts.trigrams.len());
    if dropped > 0 {
        debug!("Skipped {} zero-count row(s) in {:?}", dropped, root);
    }

    info!(
        "Loaded count tables from {:?}: {} chars, {} bigrams, {} trigrams",
        root,
        counts.chars.len(),
        counts.bigrams.len(),
        counts.trigrams.len()
    );
    Ok(counts)
}

/// Writes the three count tables into `dir`, most frequent first.
pub fn save_counts<P: AsRef<Path>>(dir: P, counts: &NgramCounts) -> KsResult<()> {
    let root = dir.as_ref();
    fs::create_dir_all(root)?;

    let mut chars: Vec<_> = counts.chars.iter().collect();
    chars.sort_by_key(|&(c, n)| (Reverse(*n), *c));
    let mut wtr = csv::Writer::from_path(root.join(MONOGRAM_FILE))?;
    wtr.write_record(["char", "count"])?;
    for (c, n) in chars {
        wtr.write_record([c.to_string(), n.to_string()])?;
    }
    wtr.flush()?;

    let mut bigrams: Vec<_> = counts.bigrams.iter().collect();
    bigrams.sort_by_key(|&(b, n)| (Reverse(*n), *b));
    let mut wtr = csv::Writer::from_path(root.join(BIGRAM_FILE))?;
    wtr.write_record(["first", "second", "count"])?;
    for ((a, b), n) in bigrams {
        wtr.write_record([a.to_string(), b.to_string(), n.to_string()])?;
    }
    wtr.flush()?;

    let mut trigrams: Vec<_> = counts.trigrams.iter().collect();
    trigrams.sort_by_key(|&(t, n)| (Reverse(*n), *t));
    let mut wtr = csv::Writer::from_path(root.join(TRIGRAM_FILE))?;
    wtr.write_record(["first", "second", "third", "count"])?;
    for ((a, b, c), n) in trigrams {
        wtr.write_record([a.to_string(), b.to_string(), c.to_string(), n.to_string()])?;
    }
    wtr.flush()?;

    Ok(())
}
