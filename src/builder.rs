use indexmap::IndexSet;
use sourcemap::DecodedMap;

use crate::lookup::{RenameMapping, RenameSpan};
use crate::source::{SourceContext, SourcePosition};

/// One decoded source-map segment, as consumed by the rename index builder.
///
/// Segments are expected in generated-position order, which is the order
/// source-map decoders emit them in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MappingEntry<'a> {
    /// Line in the generated file, 0-based.
    pub line: u32,
    /// Column in the generated file, 0-based, in UTF-16 code points.
    pub column: u32,
    /// The original name associated with this segment, if any.
    pub name: Option<&'a str>,
}

impl RenameMapping {
    /// Builds a rename index from the generated source and the decoded
    /// segments of its source map.
    ///
    /// Every name-bearing segment opens a span that is closed by the next
    /// segment, or by the end of the source. The generated text between the
    /// two positions is recorded as the compiled name for that span.
    ///
    /// A sequence without any name-bearing segments yields the shared
    /// [`RenameMapping::empty`] instance.
    pub fn from_mappings<'a, I>(source: &str, mappings: I) -> Self
    where
        I: IntoIterator<Item = MappingEntry<'a>>,
    {
        let ctx = match SourceContext::new(source) {
            Ok(ctx) => ctx,
            Err(_) => {
                tracing::debug!("source has no usable offset table, no renames");
                return Self::empty();
            }
        };

        let mut names = IndexSet::new();
        let mut spans = Vec::new();

        let mut pending: Option<(SourcePosition, &str)> = None;
        for entry in mappings {
            let position = SourcePosition::new(entry.line, entry.column);

            if let Some((start, name)) = pending.take() {
                let from = ctx.position_to_offset(start) as usize;
                let to = ctx.position_to_offset(position) as usize;
                let name_idx = names.insert_full(name.to_owned()).0;
                spans.push(RenameSpan {
                    position: start,
                    name_idx,
                    // an inverted range means the segments arrived out of
                    // order, degrade to an empty compiled name
                    compiled: source.get(from..to).unwrap_or_default().to_owned(),
                });
            }

            if let Some(name) = entry.name {
                pending = Some((position, name));
            }
        }

        // the last name-bearing segment runs to the end of the source
        if let Some((start, name)) = pending {
            let from = ctx.position_to_offset(start) as usize;
            let name_idx = names.insert_full(name.to_owned()).0;
            spans.push(RenameSpan {
                position: start,
                name_idx,
                compiled: source.get(from..).unwrap_or_default().to_owned(),
            });
        }

        if spans.is_empty() {
            return Self::empty();
        }

        // decoders emit segments ordered by generated position, but nothing
        // enforces that; the sort is stable so spans at the same position
        // keep their build order
        spans.sort_by_key(|span| span.position);

        tracing::debug!(
            spans = spans.len(),
            names = names.len(),
            "built rename index"
        );

        Self::from_parts(names, spans)
    }

    /// Builds a rename index from the generated source and its decoded
    /// source map.
    ///
    /// Indexed source maps have to be flattened by the caller first; an
    /// unflattened index map yields the shared empty mapping.
    pub fn from_sourcemap(source: &str, map: &DecodedMap) -> Self {
        let tokens = match map {
            DecodedMap::Regular(sm) => sm.tokens(),
            DecodedMap::Hermes(smh) => smh.tokens(),
            DecodedMap::Index(_) => {
                tracing::debug!("unflattened index map, no renames");
                return Self::empty();
            }
        };

        Self::from_mappings(
            source,
            tokens.map(|token| MappingEntry {
                line: token.get_dst_line(),
                column: token.get_dst_col(),
                name: token.get_name(),
            }),
        )
    }
}
