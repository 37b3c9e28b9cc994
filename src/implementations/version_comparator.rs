//! Line-level comparison of agreement versions.
//!
//! The edit script is a shortest one, found with the linear-space variant of
//! Myers' O((N+M)D) algorithm, with no context lines. Within each run of
//! changes, removals are listed before additions, the way a zero-context
//! unified diff reads once its file headers and hunk markers are dropped.
//!
//! The script is always computed on the pair in a fixed order, so comparing
//! B to A reports exactly the lines A to B reports, with the signs swapped.

use std::ops::{ Index, IndexMut, Range };
use std::path::{ Path, PathBuf };

use log::{ debug, info };

use crate::errors::DocCompareResult;
use crate::implementations::document_store::{ list_text_files, read_document };
use crate::models::diff::VersionDiff;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Equal,
    Delete(usize),
    Insert(usize),
}

impl Edit {
    fn transposed(self) -> Edit {
        match self {
            Edit::Equal => Edit::Equal,
            Edit::Delete(i) => Edit::Insert(i),
            Edit::Insert(j) => Edit::Delete(j),
        }
    }
}

/// Changed lines from `text_a` to `text_b`, each prefixed with '+' or '-'
pub fn diff(text_a: &str, text_b: &str) -> Vec<String> {
    let a: Vec<&str> = text_a.lines().collect();
    let b: Vec<&str> = text_b.lines().collect();

    // Common prefix and suffix never take part in the edit script
    let prefix = common_prefix(&a, &b);
    let suffix = common_suffix(&a[prefix..], &b[prefix..]);
    let a_mid = &a[prefix..a.len() - suffix];
    let b_mid = &b[prefix..b.len() - suffix];

    let script = if a_mid <= b_mid {
        edit_script(a_mid, b_mid)
    } else {
        edit_script(b_mid, a_mid)
            .into_iter()
            .map(Edit::transposed)
            .collect()
    };

    let mut changes = Vec::new();
    let mut removed: Vec<&str> = Vec::new();
    let mut added: Vec<&str> = Vec::new();

    for edit in script {
        match edit {
            Edit::Delete(i) => removed.push(a_mid[i]),
            Edit::Insert(j) => added.push(b_mid[j]),
            Edit::Equal => flush(&mut changes, &mut removed, &mut added),
        }
    }
    flush(&mut changes, &mut removed, &mut added);
    changes
}

fn flush(changes: &mut Vec<String>, removed: &mut Vec<&str>, added: &mut Vec<&str>) {
    changes.extend(removed.drain(..).map(|line| format!("-{}", line)));
    changes.extend(added.drain(..).map(|line| format!("+{}", line)));
}

fn common_prefix(a: &[&str], b: &[&str]) -> usize {
    a.iter()
        .zip(b.iter())
        .take_while(|(x, y)| x == y)
        .count()
}

fn common_suffix(a: &[&str], b: &[&str]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Furthest x reached on each diagonal k, indexed by k
struct Frontier {
    offset: isize,
    v: Vec<usize>,
}

impl Frontier {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            v: vec![0; 2 * max_d],
        }
    }
}

impl Index<isize> for Frontier {
    type Output = usize;

    fn index(&self, k: isize) -> &usize {
        &self.v[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        &mut self.v[(k + self.offset) as usize]
    }
}

fn max_d(n: usize, m: usize) -> usize {
    (n + m + 1) / 2 + 1
}

/// Shortest edit script between `a` and `b`, in document order. Memory is
/// linear in the input size.
fn edit_script(a: &[&str], b: &[&str]) -> Vec<Edit> {
    let max_d = max_d(a.len(), b.len());
    let mut forward = Frontier::new(max_d);
    let mut backward = Frontier::new(max_d);
    let mut edits = Vec::with_capacity(a.len() + b.len());
    conquer(a, 0..a.len(), b, 0..b.len(), &mut forward, &mut backward, &mut edits);
    edits
}

fn conquer(
    a: &[&str],
    mut a_range: Range<usize>,
    b: &[&str],
    mut b_range: Range<usize>,
    forward: &mut Frontier,
    backward: &mut Frontier,
    edits: &mut Vec<Edit>
) {
    let prefix = common_prefix(&a[a_range.clone()], &b[b_range.clone()]);
    edits.extend(std::iter::repeat(Edit::Equal).take(prefix));
    a_range.start += prefix;
    b_range.start += prefix;

    let suffix = common_suffix(&a[a_range.clone()], &b[b_range.clone()]);
    a_range.end -= suffix;
    b_range.end -= suffix;

    if a_range.is_empty() {
        edits.extend(b_range.map(Edit::Insert));
    } else if b_range.is_empty() {
        edits.extend(a_range.map(Edit::Delete));
    } else {
        let snake = middle_snake(&a[a_range.clone()], &b[b_range.clone()], forward, backward);
        match snake {
            Some((x, y)) => {
                let (a_split, b_split) = (a_range.start + x, b_range.start + y);
                conquer(a, a_range.start..a_split, b, b_range.start..b_split, forward, backward, edits);
                conquer(a, a_split..a_range.end, b, b_split..b_range.end, forward, backward, edits);
            }
            None => {
                edits.extend(a_range.map(Edit::Delete));
                edits.extend(b_range.map(Edit::Insert));
            }
        }
    }

    edits.extend(std::iter::repeat(Edit::Equal).take(suffix));
}

/// Point where the forward and backward searches meet. Splitting there
/// leaves two subproblems whose edit distances add up to the whole.
fn middle_snake(
    a: &[&str],
    b: &[&str],
    forward: &mut Frontier,
    backward: &mut Frontier
) -> Option<(usize, usize)> {
    let n = a.len();
    let m = b.len();
    let delta = n as isize - m as isize;
    let odd = delta & 1 == 1;

    forward[1] = 0;
    backward[1] = 0;

    for d in 0..max_d(n, m) as isize {
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && forward[k - 1] < forward[k + 1]) {
                forward[k + 1]
            } else {
                forward[k - 1] + 1
            };
            let y = (x as isize - k) as usize;
            let (x0, y0) = (x, y);
            if x < n && y < m {
                x += common_prefix(&a[x..], &b[y..]);
            }
            forward[k] = x;

            if odd && (k - delta).abs() <= d - 1 && forward[k] + backward[-(k - delta)] >= n {
                return Some((x0, y0));
            }
        }

        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && backward[k - 1] < backward[k + 1]) {
                backward[k + 1]
            } else {
                backward[k - 1] + 1
            };
            let mut y = (x as isize - k) as usize;
            if x < n && y < m {
                let advance = common_suffix(&a[..n - x], &b[..m - y]);
                x += advance;
                y += advance;
            }
            backward[k] = x;

            if !odd && (k - delta).abs() <= d && backward[k] + forward[-(k - delta)] >= n {
                return Some((n - x, m - y));
            }
        }
    }
    None
}

/// Compares stored versions of an agreement under one document root
#[derive(Debug, Clone)]
pub struct VersionComparator {
    root: PathBuf,
}

impl VersionComparator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Version identifiers for `base_name`, sorted. The order decides which
    /// version is the baseline and which the amendment.
    pub fn list_versions(&self, base_name: &str) -> DocCompareResult<Vec<String>> {
        let versions = list_text_files(&self.root, base_name)?;
        debug!("Found {} versions of {}", versions.len(), base_name);
        Ok(versions)
    }

    /// Diff two stored versions. Both identifiers are validated before either
    /// file is read.
    pub fn compare(&self, version_from: &str, version_to: &str) -> DocCompareResult<VersionDiff> {
        let text_a = read_document(&self.root, version_from)?;
        let text_b = read_document(&self.root, version_to)?;

        let changes = diff(&text_a, &text_b);
        info!("{} -> {}: {} changed lines", version_from, version_to, changes.len());

        Ok(VersionDiff {
            version_from: version_from.to_string(),
            version_to: version_to.to_string(),
            changes,
        })
    }

    /// Diffs between each consecutive pair of versions of `base_name`
    pub fn compare_history(&self, base_name: &str) -> DocCompareResult<Vec<VersionDiff>> {
        let versions = self.list_versions(base_name)?;
        versions
            .windows(2)
            .map(|pair| self.compare(&pair[0], &pair[1]))
            .collect()
    }
}
