//! # Photo Facets
//!
//! The filtering, tag-logic and search engine behind a photography portfolio.
//! Every listing page (all photos, an album, a tag) and both search pages run
//! through the same functions here, so a photo lands in the same relative
//! position wherever it is reached from.
//!
//! # Architecture: One Recompute Per Interaction
//!
//! Nothing is cached between interactions. Each change to a filter control
//! builds a fresh [`filter::FilterState`] and reruns the whole pipeline over
//! the in-memory corpus:
//!
//! ```text
//! corpus ─ scope(listing) ─ filter(state) ─ sort(direction) ─┬─ grid
//!                                                            ├─ available tags
//!                                                            └─ viewer / listeners
//! ```
//!
//! The corpus is a few hundred to a few thousand records, so a full pass per
//! keystroke is cheap and the result is always consistent with the controls.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Content records: `Photo`, `Album`, `Entry` |
//! | [`corpus`] | Loads the corpus JSON, rejects duplicate photo ids, resolves album titles |
//! | [`settings`] | Parses free-form EXIF strings like `f/2.8, 1/250s, ISO 400` |
//! | [`tags`] | Tag normalization: trim + lowercase, blanks dropped |
//! | [`filter`] | `FilterState` and the eight-dimension predicate |
//! | [`facets`] | Tag availability under AND/OR, option counts, slider bounds |
//! | [`sort`] | Canonical, total ordering for photos, albums and entries |
//! | [`search`] | Token AND-match search with relevance ranking |
//! | [`gallery`] | Listing pipeline and per-page `Session` |
//! | [`sync`] | Facet-change channel and viewer bridge |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Empty Means Unconstrained
//!
//! An empty selection and a `None` range impose nothing. Clearing every
//! control shows the whole corpus. Sliders that still cover the corpus
//! bounds are folded back to `None` ([`filter::Range::narrowed_from`]) so an
//! untouched slider never hides a photo that lacks EXIF data.
//!
//! ## Explicit Viewer, No Globals
//!
//! The full-screen viewer is handed to [`sync::ViewSync`] when a page opens.
//! With no viewer attached, pushing photos is a no-op. Listeners subscribe to
//! facet changes through [`sync::FacetChannel::on_filter_change`] instead of
//! an ambient event bus.
//!
//! ## The Engine Never Fails
//!
//! Malformed EXIF parses partially, a dangling album has no title, an empty
//! query finds nothing and contradictory controls give an empty result.
//! Errors exist only where files are read: [`config::ConfigError`] and
//! [`corpus::CorpusError`].

pub mod config;
pub mod corpus;
pub mod facets;
pub mod filter;
pub mod gallery;
pub mod output;
pub mod search;
pub mod settings;
pub mod sort;
pub mod sync;
pub mod tags;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
