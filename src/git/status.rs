//! Parsing of `git status --porcelain` output.

/// One entry from porcelain status output.
///
/// `index` is the staged column and `worktree` the unstaged column, e.g.
/// `M ` is staged-only while ` M` is modified but not staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub index: char,
    pub worktree: char,
    /// Destination path for renames and copies (`R  old -> new`).
    pub path: String,
}

impl StatusEntry {
    /// Whether this entry has changes outside the index.
    ///
    /// Only a modified (`M`) or untracked (`?`) worktree column counts.
    pub fn is_unstaged(&self) -> bool {
        matches!(self.worktree, 'M' | '?')
    }
}

/// Parse porcelain v1 status output into entries.
///
/// Lines too short to carry both status columns are skipped.
pub fn parse_porcelain(output: &str) -> Vec<StatusEntry> {
    output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<StatusEntry> {
    let mut chars = line.chars();
    let index = chars.next()?;
    let worktree = chars.next()?;
    let rest = chars.as_str().trim_start();

    let path = rest.split_once(" -> ").map_or(rest, |(_, to)| to);

    Some(StatusEntry {
        index,
        worktree,
        path: path.to_string(),
    })
}

/// Whether porcelain output describes a tree with nothing left to stage.
pub fn is_clean(output: &str) -> bool {
    !parse_porcelain(output).iter().any(StatusEntry::is_unstaged)
}
