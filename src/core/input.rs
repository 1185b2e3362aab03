// src/core/input.rs

use crate::core::models::{AnalysisRequest, SelectedFile};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a candidate file was not attached.
#[derive(Debug, Error)]
pub enum FileRejection {
    #[error("Please select a valid .eml file ({name} is not one)")]
    NotEml { name: String },

    #[error("Could not read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Holds the two input modes: pasted email text and an attached `.eml` file.
///
/// The path field is a draft the user types (or pastes) before attaching it.
#[derive(Debug, Default)]
pub struct InputCollector {
    text: String,
    file: Option<SelectedFile>,
    path_draft: String,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit is allowed iff the trimmed text is non-empty or a file is attached.
    pub fn has_active_selection(&self) -> bool {
        self.file.is_some() || !self.text.trim().is_empty()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn char_count_label(&self) -> String {
        format!("{} characters", self.char_count())
    }

    pub fn push_char(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    pub fn pop_char(&mut self) {
        self.text.pop();
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn path_draft(&self) -> &str {
        &self.path_draft
    }

    pub fn push_path_char(&mut self, c: char) {
        self.path_draft.push(c);
    }

    pub fn pop_path_char(&mut self) {
        self.path_draft.pop();
    }

    pub fn set_path_draft(&mut self, raw: &str) {
        self.path_draft = raw.to_string();
    }

    /// Tries to attach whatever is in the path field.
    pub fn attach_draft(&mut self) -> Result<&SelectedFile, FileRejection> {
        let candidate = PathBuf::from(clean_pasted_path(&self.path_draft));
        self.offer_file(&candidate)
    }

    /// Accepts `path` only if its file name ends in `.eml` and its metadata is readable.
    /// On rejection the current selection is left untouched.
    pub fn offer_file(&mut self, path: &Path) -> Result<&SelectedFile, FileRejection> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !name.ends_with(".eml") {
            warn!(name = %name, "Rejected file without .eml suffix.");
            return Err(FileRejection::NotEml { name });
        }

        let metadata = std::fs::metadata(path).map_err(|source| {
            warn!(path = %path.display(), error = %source, "Rejected unreadable file.");
            FileRejection::Unreadable { path: path.to_path_buf(), source }
        })?;
        if !metadata.is_file() {
            return Err(FileRejection::Unreadable {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }

        info!(name = %name, size = metadata.len(), "Attached email file.");
        self.path_draft = path.display().to_string();
        Ok(&*self.file.insert(SelectedFile {
            path: path.to_path_buf(),
            name,
            size_bytes: metadata.len(),
        }))
    }

    pub fn remove_file(&mut self) {
        if self.file.take().is_some() {
            debug!("Attached file removed.");
        }
        self.path_draft.clear();
    }

    /// Packages the active selection. The file takes precedence; text is sent as typed.
    pub fn active_request(&self) -> Option<AnalysisRequest> {
        if let Some(file) = &self.file {
            return Some(AnalysisRequest::File(file.clone()));
        }
        if self.text.trim().is_empty() {
            return None;
        }
        Some(AnalysisRequest::Text(self.text.clone()))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Terminals paste dropped files as a (possibly quoted) path.
pub fn clean_pasted_path(raw: &str) -> &str {
    let trimmed = raw.trim();
    for quote in ['\'', '"'] {
        if let Some(inner) = trimmed.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return inner;
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn eml_fixture(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn empty_collector_has_no_selection() {
        let input = InputCollector::new();
        assert!(!input.has_active_selection());
        assert!(input.active_request().is_none());
    }

    #[test]
    fn whitespace_only_text_is_not_a_selection() {
        let mut input = InputCollector::new();
        input.push_str("  \n\t ");
        assert!(!input.has_active_selection());
        assert_eq!(input.char_count(), 5);
    }

    #[test]
    fn text_is_sent_untrimmed() {
        let mut input = InputCollector::new();
        input.push_str(" Subject: hi\n");
        assert!(input.has_active_selection());
        assert_eq!(input.active_request(), Some(AnalysisRequest::Text(" Subject: hi\n".into())));
    }

    #[test]
    fn char_count_tracks_edits() {
        let mut input = InputCollector::new();
        input.push_str("héllo");
        input.push_char('!');
        input.pop_char();
        input.pop_char();
        assert_eq!(input.char_count_label(), "4 characters");
    }

    #[test]
    fn accepts_eml_file_and_records_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = eml_fixture(&dir, "invoice.eml", &[b'x'; 2048]);
        let mut input = InputCollector::new();

        let file = input.offer_file(&path).unwrap();
        assert_eq!(file.name, "invoice.eml");
        assert_eq!(file.size_label(), "2.00 KB");
        assert!(input.has_active_selection());
    }

    #[test]
    fn rejects_non_eml_and_keeps_previous_selection() {
        let dir = tempfile::tempdir().unwrap();
        let good = eml_fixture(&dir, "first.eml", b"From: a");
        let bad = eml_fixture(&dir, "notes.txt", b"hello");
        let mut input = InputCollector::new();
        input.offer_file(&good).unwrap();

        let err = input.offer_file(&bad).unwrap_err();
        assert!(matches!(err, FileRejection::NotEml { ref name } if name == "notes.txt"));
        assert_eq!(input.file().map(|f| f.name.as_str()), Some("first.eml"));
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let upper = eml_fixture(&dir, "MAIL.EML", b"From: a");
        let mut input = InputCollector::new();
        assert!(input.offer_file(&upper).is_err());
        assert!(!input.has_active_selection());
    }

    #[test]
    fn missing_eml_file_is_unreadable() {
        let mut input = InputCollector::new();
        let err = input.offer_file(Path::new("/definitely/not/here.eml")).unwrap_err();
        assert!(matches!(err, FileRejection::Unreadable { .. }));
    }

    #[test]
    fn file_wins_over_text_but_text_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = eml_fixture(&dir, "a.eml", b"From: a");
        let mut input = InputCollector::new();
        input.push_str("pasted body");
        input.offer_file(&path).unwrap();

        assert!(matches!(input.active_request(), Some(AnalysisRequest::File(_))));
        input.remove_file();
        assert_eq!(input.active_request(), Some(AnalysisRequest::Text("pasted body".into())));
    }

    #[test]
    fn attach_draft_strips_quotes_from_pasted_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = eml_fixture(&dir, "dropped.eml", b"From: a");
        let mut input = InputCollector::new();
        for c in format!("'{}'\n", path.display()).chars() {
            input.push_path_char(c);
        }
        assert_eq!(input.attach_draft().unwrap().name, "dropped.eml");
    }

    #[test]
    fn clear_resets_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = eml_fixture(&dir, "a.eml", b"From: a");
        let mut input = InputCollector::new();
        input.push_str("body");
        input.offer_file(&path).unwrap();
        input.clear();
        assert!(!input.has_active_selection());
        assert_eq!(input.char_count_label(), "0 characters");
        assert!(input.path_draft().is_empty());
    }
}
