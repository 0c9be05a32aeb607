//! Best-effort resolution of original identifier names in generated JS code,
//! using the `names` information of its source map.
//!
//! When execution is paused inside generated code, debug tooling wants to
//! show variables under the names the developer wrote, not the names the
//! compiler or minifier emitted. A [`RenameMapping`] answers that question in
//! both directions for a single generated source: it is built once from the
//! generated text and the decoded source map, and is queried by generated
//! position from then on.
//!
//! Renames are a heuristic. The index associates each name with the stretch
//! of generated text up to the next mapped segment, and lookups pick the
//! association closest at or before the queried position, without any real
//! scope analysis. Whenever the inputs are unavailable (missing file
//! content, a map that failed to load), callers should fall back to
//! [`RenameMapping::empty`] instead of surfacing an error. The feature then
//! degrades to showing generated names unchanged.
//!
//! # Examples
//!
//! ```
//! use js_source_renames::{MappingEntry, RenameMapping, SourcePosition};
//!
//! let source = "let n=1;";
//! let mappings = [
//!     MappingEntry { line: 0, column: 4, name: Some("count") },
//!     MappingEntry { line: 0, column: 5, name: None },
//! ];
//!
//! let renames = RenameMapping::from_mappings(source, mappings);
//!
//! let paused_at = SourcePosition::new(0, 5);
//! assert_eq!(renames.get_original_name("n", paused_at), Some("count"));
//! assert_eq!(renames.get_compiled_name("count", paused_at), Some("n"));
//! ```

mod builder;
mod lookup;
mod source;

pub use builder::MappingEntry;
pub use lookup::RenameMapping;
pub use source::{SourceContext, SourceContextError, SourcePosition};
