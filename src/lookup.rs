use std::sync::{Arc, OnceLock};

use indexmap::IndexSet;

use crate::source::SourcePosition;

/// A single rename record.
///
/// The generated text `compiled` starts at `position` and stands in for the
/// original name until the next record takes over.
#[derive(Clone, Debug)]
pub(crate) struct RenameSpan {
    pub(crate) position: SourcePosition,
    /// Index into the interned name set of the owning [`RenameMapping`].
    pub(crate) name_idx: usize,
    pub(crate) compiled: String,
}

/// An immutable index of compiled-name / original-name associations for one
/// generated source.
///
/// Lookups work by finding the rename closest at or before the queried
/// generated position. It would be more correct to parse the generated code
/// and use scopes, but doing so is relatively slow. This is probably good
/// enough.
///
/// Cloning is cheap, a clone shares the underlying index. Queries take
/// `&self` and can run concurrently.
#[derive(Clone, Debug)]
pub struct RenameMapping {
    inner: Arc<RenameIndex>,
}

#[derive(Debug, Default)]
struct RenameIndex {
    names: IndexSet<String>,
    /// Sorted by position ascending; entries at the same position keep their
    /// build order. The closest-rename scan relies on this ordering for its
    /// early exit.
    spans: Vec<RenameSpan>,
}

impl RenameMapping {
    /// The shared empty mapping, used whenever no renames apply.
    ///
    /// Every lookup on it returns `None`, so callers never need a separate
    /// "no renames" check.
    pub fn empty() -> Self {
        static EMPTY: OnceLock<RenameMapping> = OnceLock::new();
        EMPTY
            .get_or_init(|| Self {
                inner: Arc::new(RenameIndex::default()),
            })
            .clone()
    }

    pub(crate) fn from_parts(names: IndexSet<String>, spans: Vec<RenameSpan>) -> Self {
        Self {
            inner: Arc::new(RenameIndex { names, spans }),
        }
    }

    /// Returns `true` if this mapping holds no renames at all.
    pub fn is_empty(&self) -> bool {
        self.inner.spans.is_empty()
    }

    /// Gets the original identifier name from a compiled name, with execution
    /// paused at the given generated position.
    pub fn get_original_name(&self, compiled_name: &str, position: SourcePosition) -> Option<&str> {
        let span = self.closest_rename(position, |s| s.compiled == compiled_name)?;
        self.inner
            .names
            .get_index(span.name_idx)
            .map(|name| name.as_str())
    }

    /// Gets the compiled identifier name from an original name, with execution
    /// paused at the given generated position.
    pub fn get_compiled_name(&self, original_name: &str, position: SourcePosition) -> Option<&str> {
        let name_idx = self.inner.names.get_index_of(original_name)?;
        let span = self.closest_rename(position, |s| s.name_idx == name_idx)?;
        Some(span.compiled.as_str())
    }

    /// Returns the matching rename closest at or before `position`.
    ///
    /// The most recent matching span starting at or before `position` wins.
    /// Spans are sorted by position, so the scan can stop at the first match
    /// past the queried position once a candidate has been recorded.
    fn closest_rename<F>(&self, position: SourcePosition, filter: F) -> Option<&RenameSpan>
    where
        F: Fn(&RenameSpan) -> bool,
    {
        let mut best = None;

        for span in &self.inner.spans {
            if !filter(span) {
                continue;
            }

            if span.position > position {
                if best.is_some() {
                    return best;
                }
            } else {
                best = Some(span);
            }
        }

        best
    }
}
