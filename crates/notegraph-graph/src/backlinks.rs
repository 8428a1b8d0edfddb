//! Backlink queries: which notes reference a given title.
//!
//! Nothing is cached. Every call re-parses the collection so the result
//! always reflects current note content.

use notegraph_core::{GraphConfig, NoteCollection, titles_match};
use notegraph_parser::ParsedNote;
use serde::{Deserialize, Serialize};

/// A note that references the queried title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backlink {
    pub note_id: String,
    pub note_title: String,
    /// Text around the first reference; never empty
    pub context: String,
}

/// Backlinks to `title` using the default context radius.
///
/// # Example
/// ```
/// use notegraph_core::{Note, NoteCollection};
/// use notegraph_graph::get_backlinks;
///
/// let notes: NoteCollection = vec![
///     Note::new("a", "A", "See [[B]] for details"),
///     Note::new("b", "B", ""),
/// ]
/// .into_iter()
/// .collect();
///
/// let backlinks = get_backlinks("b", &notes);
/// assert_eq!(backlinks.len(), 1);
/// assert_eq!(backlinks[0].note_id, "a");
/// assert_eq!(backlinks[0].context, "See [[B]] for details");
/// ```
pub fn get_backlinks(title: &str, collection: &NoteCollection) -> Vec<Backlink> {
    get_backlinks_with_radius(
        title,
        collection,
        GraphConfig::default().backlink_context_radius,
    )
}

/// Backlinks to `title`, keeping `radius` characters of context either side.
///
/// Notes are visited in collection order. The note `title` resolves to is
/// never its own backlink; other notes sharing that title still count.
pub fn get_backlinks_with_radius(
    title: &str,
    collection: &NoteCollection,
    radius: usize,
) -> Vec<Backlink> {
    let target_id = collection.find_by_title(title).map(|n| n.id.as_str());

    let backlinks: Vec<Backlink> = collection
        .iter()
        .filter(|note| Some(note.id.as_str()) != target_id)
        .filter_map(|note| {
            let parsed = ParsedNote::parse(&note.content);
            let reference = parsed
                .references
                .iter()
                .find(|r| !r.text().is_empty() && titles_match(r.text(), title))?;

            let context = parsed
                .link_context(title, radius)
                .unwrap_or_else(|| format!("[[{}]]", reference.text()));

            Some(Backlink {
                note_id: note.id.clone(),
                note_title: note.title.clone(),
                context,
            })
        })
        .collect();

    log::debug!("Found {} backlinks to {:?}", backlinks.len(), title);
    backlinks
}
