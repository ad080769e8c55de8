use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::{Corpus, CorpusData};
use crate::utils::validate_file_size;

/// Load a corpus from a JSON file holding the six typed collections.
///
/// Missing collections default to empty. The file is rejected when it exceeds
/// the size limit enforced by [`validate_file_size`].
pub fn load_corpus(path: &Path) -> Result<Corpus> {
    // Open file and validate size on the same handle to avoid TOCTOU
    let file = File::open(path)
        .with_context(|| format!("Failed to open corpus file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let data: CorpusData = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse corpus file: {}", path.display()))?;

    let corpus = Corpus::from_collections(data);
    info!(entities = corpus.len(), path = %path.display(), "Loaded corpus");
    Ok(corpus)
}
