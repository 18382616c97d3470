//! The shared dispatch artifact.
//!
//! Every schema contributes one entry to a single file that outlives the
//! run. The file is read once, entries are accumulated in memory, and it is
//! written once at the end of the batch:
//!
//! ```text
//! <header, ending with the line that opens the block>
//!
//! <entry>
//!
//! <entry>
//! <closer>
//! ```
//!
//! Entries already in the file are recognized by their text, so running the
//! same batch twice leaves the file untouched.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::diagnostic::CompilerError;

/// Where the artifact stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// No file on disk and nothing appended yet.
    Absent,
    /// Header present, no entries.
    Opened,
    HasEntries,
}

/// What [`DispatchArtifact::finish`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Entries appended this run.
    pub added: usize,
    /// Entries offered this run that were already present.
    pub existing: usize,
    /// Whether the file was (re)written.
    pub written: bool,
}

/// In-memory view of the dispatch file for one run.
#[derive(Debug)]
pub struct DispatchArtifact {
    path: PathBuf,
    header: String,
    closer: String,
    entries: Vec<String>,
    known: HashSet<String>,
    original: Option<String>,
    added: usize,
    existing: usize,
}

impl DispatchArtifact {
    /// Reads the artifact at `path`, if any. A file that does not start with
    /// `header` is rejected.
    pub fn load(path: &Path, header: &str, closer: &str) -> Result<Self, CompilerError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(path, header, closer, content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::empty(path, header, closer)),
            Err(e) => Err(CompilerError::io(path, e.to_string())),
        }
    }

    fn empty(path: &Path, header: &str, closer: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            header: header.to_string(),
            closer: closer.to_string(),
            entries: Vec::new(),
            known: HashSet::new(),
            original: None,
            added: 0,
            existing: 0,
        }
    }

    /// Splits existing content into entry blocks. Trailing closers are
    /// dropped (however many there are) and re-added once on render.
    fn parse(path: &Path, header: &str, closer: &str, content: String) -> Result<Self, CompilerError> {
        let body = content
            .strip_prefix(header)
            .ok_or_else(|| CompilerError::MalformedDispatch {
                path: path.to_path_buf(),
            })?;

        let mut lines: Vec<&str> = body.lines().map(str::trim_end).collect();
        while let Some(&last) = lines.last() {
            if last.is_empty() || last == closer {
                lines.pop();
            } else {
                break;
            }
        }

        let mut artifact = Self::empty(path, header, closer);
        for block in lines.split(|line| line.is_empty()) {
            if block.is_empty() {
                continue;
            }
            let block = block.join("\n");
            if artifact.known.insert(block.clone()) {
                artifact.entries.push(block);
            }
        }
        artifact.original = Some(content);
        Ok(artifact)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> DispatchState {
        match (self.original.is_some(), self.entries.is_empty()) {
            (_, false) => DispatchState::HasEntries,
            (true, true) => DispatchState::Opened,
            (false, true) => DispatchState::Absent,
        }
    }

    /// Number of entries the file will hold.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends `entry` unless an entry with the same text is present.
    /// Returns whether it was added.
    pub fn append(&mut self, entry: &str) -> bool {
        let entry = normalize(entry);
        if self.known.contains(&entry) {
            self.existing += 1;
            return false;
        }
        self.known.insert(entry.clone());
        self.entries.push(entry);
        self.added += 1;
        true
    }

    /// The full file text: header, entries separated by blank lines, and a
    /// single closer.
    pub fn render(&self) -> String {
        let mut out = self.header.clone();
        for entry in &self.entries {
            out.push('\n');
            out.push_str(entry);
            out.push('\n');
        }
        out.push_str(&self.closer);
        out.push('\n');
        out
    }

    /// Writes the artifact if its text changed. An artifact that never
    /// existed and received no entries is not created.
    pub fn finish(self) -> Result<DispatchOutcome, CompilerError> {
        let mut outcome = DispatchOutcome {
            added: self.added,
            existing: self.existing,
            written: false,
        };
        if self.state() == DispatchState::Absent {
            return Ok(outcome);
        }

        let content = self.render();
        if self.original.as_deref() == Some(content.as_str()) {
            tracing::debug!(path = %self.path.display(), "dispatch file unchanged");
            return Ok(outcome);
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CompilerError::io(parent, e.to_string()))?;
        }
        std::fs::write(&self.path, content).map_err(|e| CompilerError::io(&self.path, e.to_string()))?;
        tracing::info!(path = %self.path.display(), added = self.added, "wrote dispatch file");
        outcome.written = true;
        Ok(outcome)
    }
}

/// Entry text as stored: trailing whitespace and blank lines removed.
fn normalize(entry: &str) -> String {
    entry
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = "import Foundation\n\npublic extension Tracker {\n";
    const PING: &str = "    static func trackPing(_ ping: Ping) {\n        send(ping)\n    }\n";
    const VIEW: &str = "    static func trackView(_ view: View) {\n        send(view)\n    }\n";

    fn load(dir: &TempDir) -> DispatchArtifact {
        DispatchArtifact::load(&dir.path().join("Extension/TrackerExtension.swift"), HEADER, "}").unwrap()
    }

    #[test]
    fn test_absent_artifact_is_not_created_without_entries() {
        let dir = TempDir::new().unwrap();
        let artifact = load(&dir);
        assert_eq!(artifact.state(), DispatchState::Absent);
        let outcome = artifact.finish().unwrap();
        assert!(!outcome.written);
        assert!(!dir.path().join("Extension").exists());
    }

    #[test]
    fn test_first_run_writes_header_entries_and_closer() {
        let dir = TempDir::new().unwrap();
        let mut artifact = load(&dir);
        assert!(artifact.append(PING));
        assert!(artifact.append(VIEW));
        assert_eq!(artifact.state(), DispatchState::HasEntries);
        let path = artifact.path().to_path_buf();
        let outcome = artifact.finish().unwrap();
        assert_eq!(outcome, DispatchOutcome { added: 2, existing: 0, written: true });

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, format!("{}\n{}\n{}}}\n", HEADER, PING, VIEW));
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut artifact = load(&dir);
        artifact.append(PING);
        let path = artifact.path().to_path_buf();
        artifact.finish().unwrap();
        let first = std::fs::read_to_string(&path).unwrap();

        let mut artifact = load(&dir);
        assert!(!artifact.append(PING));
        assert!(!artifact.append(PING));
        let outcome = artifact.finish().unwrap();
        assert_eq!(outcome, DispatchOutcome { added: 0, existing: 2, written: false });
        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
        assert_eq!(first.matches("trackPing").count(), 1);
    }

    #[test]
    fn test_new_entry_goes_before_single_closer() {
        let dir = TempDir::new().unwrap();
        let mut artifact = load(&dir);
        artifact.append(PING);
        artifact.finish().unwrap();

        let mut artifact = load(&dir);
        assert_eq!(artifact.len(), 1);
        assert!(artifact.append(VIEW));
        let path = artifact.path().to_path_buf();
        artifact.finish().unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.ends_with("    }\n}\n"));
        assert_eq!(content.lines().filter(|l| *l == "}").count(), 1);
        assert!(content.find("trackPing").unwrap() < content.find("trackView").unwrap());
    }

    #[test]
    fn test_repeated_closers_are_repaired() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Extension/TrackerExtension.swift");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, format!("{}\n{}}}\n}}\n\n}}\n", HEADER, PING)).unwrap();

        let artifact = load(&dir);
        assert_eq!(artifact.state(), DispatchState::HasEntries);
        assert!(artifact.finish().unwrap().written);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            format!("{}\n{}}}\n", HEADER, PING)
        );
    }

    #[test]
    fn test_header_only_file_is_opened() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Extension/TrackerExtension.swift");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, HEADER).unwrap();

        let artifact = load(&dir);
        assert_eq!(artifact.state(), DispatchState::Opened);
        assert!(artifact.is_empty());
    }

    #[test]
    fn test_foreign_file_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("TrackerExtension.swift");
        std::fs::write(&path, "// hand written\n").unwrap();
        let err = DispatchArtifact::load(&path, HEADER, "}").unwrap_err();
        assert!(matches!(err, CompilerError::MalformedDispatch { .. }));
    }

    #[test]
    fn test_trailing_whitespace_does_not_defeat_idempotency() {
        let dir = TempDir::new().unwrap();
        let mut artifact = load(&dir);
        artifact.append(PING);
        assert!(!artifact.append(&PING.replace("{\n", "{  \n")));
    }
}
