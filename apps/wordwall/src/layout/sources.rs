//! Sentence and filler word sources.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::layout::error::SourceError;

fn read_lines(path: &Path) -> Result<Vec<String>, SourceError> {
    let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(clean_lines(&text))
}

/// Non-blank lines with trailing `\r` and surrounding whitespace removed.
pub fn clean_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|l| l.trim_end_matches('\r').trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Concatenates the sentences of every file, in order.
pub fn read_sentences<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<String>, SourceError> {
    let mut sentences = Vec::new();
    for path in paths {
        let lines = read_lines(path.as_ref())?;
        debug!(path = %path.as_ref().display(), count = lines.len(), "Read sentences");
        sentences.extend(lines);
    }
    Ok(sentences)
}

/// One filler word per line.
pub fn read_filler_words(path: &Path) -> Result<Vec<String>, SourceError> {
    let words = read_lines(path)?;
    debug!(path = %path.display(), count = words.len(), "Read filler words");
    Ok(words)
}

pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_sentences_concatenates_files_in_order() {
        let a = temp_file("I love Kira\r\n\r\nwe hate you\n");
        let b = temp_file("   \nJT loves his Kira");
        let sentences = read_sentences(&[a.path(), b.path()]).unwrap();
        assert_eq!(sentences, vec!["I love Kira", "we hate you", "JT loves his Kira"]);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = read_sentences(&["/definitely/not/here.txt"]).unwrap_err();
        let SourceError::Io { path, .. } = &err;
        assert!(path.ends_with("here.txt"));
        assert!(err.to_string().contains("here.txt"));
    }

    #[test]
    fn test_read_filler_words_skips_blanks() {
        let file = temp_file("a\n\nto\n and \n");
        assert_eq!(read_filler_words(file.path()).unwrap(), vec!["a", "to", "and"]);
    }

    #[test]
    fn test_tokenize_splits_on_any_whitespace() {
        assert_eq!(tokenize("  it\tis  five "), vec!["it", "is", "five"]);
        assert!(tokenize("   ").is_empty());
    }
}
