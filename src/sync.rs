//! The seam between the engine and whatever renders its output.
//!
//! Two consumers need to hear about every recompute:
//!
//! 1. **Facet listeners** (the gallery grid, the full-screen viewer) want to
//!    know when the tag selection or tag logic changes. They subscribe to a
//!    [`FacetChannel`] with [`FacetChannel::on_filter_change`] and receive a
//!    [`FacetChange`]. Delivery is fire-and-forget: no acknowledgment, no
//!    queue. A listener added later only sees later changes; it can read
//!    [`FacetChannel::current`] to catch up.
//!
//! 2. **The viewer** keeps its own navigable photo list, which has to follow
//!    the active filter. It is handed to [`ViewSync`] explicitly as a
//!    [`Viewer`]; with no viewer attached, pushing photos does nothing.
//!
//! An `mpsc::Sender<ViewerUpdate>` is a [`Viewer`], so a viewer living on
//! another thread can be fed through a channel the same way build progress
//! is streamed to a printer thread.

use crate::filter::{FilterState, TagLogic};
use crate::types::Photo;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;

/// Payload published when tag selection or logic changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetChange {
    /// Normalized, sorted.
    pub active_tags: Vec<String>,
    pub tag_logic: TagLogic,
}

impl FacetChange {
    pub fn from_state(state: &FilterState) -> Self {
        Self {
            active_tags: state.selected_tags.iter().cloned().collect(),
            tag_logic: state.tag_logic,
        }
    }
}

/// Handle returned by [`FacetChannel::on_filter_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler = Box<dyn FnMut(&FacetChange)>;

/// Single named publish/subscribe channel for [`FacetChange`] payloads.
pub struct FacetChannel {
    name: String,
    next_id: u64,
    listeners: Vec<(ListenerId, Handler)>,
    current: Option<FacetChange>,
}

impl FacetChannel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            next_id: 0,
            listeners: Vec::new(),
            current: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a handler for future changes.
    pub fn on_filter_change<F>(&mut self, handler: F) -> ListenerId
    where
        F: FnMut(&FacetChange) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(handler)));
        id
    }

    /// Returns false if the id was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver to every current listener, in registration order.
    pub fn publish(&mut self, change: FacetChange) {
        for (_, handler) in &mut self.listeners {
            handler(&change);
        }
        self.current = Some(change);
    }

    /// Last published payload.
    pub fn current(&self) -> Option<&FacetChange> {
        self.current.as_ref()
    }
}

impl std::fmt::Debug for FacetChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacetChannel")
            .field("name", &self.name)
            .field("listeners", &self.listeners.len())
            .field("current", &self.current)
            .finish()
    }
}

/// A full-screen viewer whose photo list follows the active filter.
pub trait Viewer {
    fn update_photos(&mut self, photos: &[&Photo]);

    /// False once the viewer has gone away; [`ViewSync`] then drops it.
    fn is_open(&self) -> bool {
        true
    }
}

/// Message sent to a channel-backed viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerUpdate {
    Photos(Vec<Photo>),
}

impl Viewer for Sender<ViewerUpdate> {
    fn update_photos(&mut self, photos: &[&Photo]) {
        let owned = photos.iter().map(|&p| p.clone()).collect();
        // A closed receiver means the viewer is gone; nothing to update
        let _ = self.send(ViewerUpdate::Photos(owned));
    }
}

/// Pushes each recompute to the facet channel and the viewer.
pub struct ViewSync {
    channel: FacetChannel,
    viewer: Option<Box<dyn Viewer>>,
    last_published: Option<FacetChange>,
}

pub const FACET_CHANNEL: &str = "gallery:filter-change";

impl ViewSync {
    pub fn new(viewer: Option<Box<dyn Viewer>>) -> Self {
        Self {
            channel: FacetChannel::new(FACET_CHANNEL),
            viewer,
            last_published: None,
        }
    }

    pub fn channel(&self) -> &FacetChannel {
        &self.channel
    }

    pub fn on_filter_change<F>(&mut self, handler: F) -> ListenerId
    where
        F: FnMut(&FacetChange) + 'static,
    {
        self.channel.on_filter_change(handler)
    }

    pub fn attach_viewer(&mut self, viewer: Box<dyn Viewer>) {
        self.viewer = Some(viewer);
    }

    pub fn detach_viewer(&mut self) -> Option<Box<dyn Viewer>> {
        self.viewer.take()
    }

    pub fn has_viewer(&self) -> bool {
        self.viewer.is_some()
    }

    /// Replace the viewer's photo list. No-op without an open viewer.
    pub fn update_viewer_photos(&mut self, photos: &[&Photo]) {
        if self.viewer.as_ref().is_some_and(|v| !v.is_open()) {
            self.viewer = None;
        }
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.update_photos(photos);
        }
    }

    /// Publish a facet change if tags or logic moved, then push photos.
    ///
    /// Returns whether a facet change was published.
    pub fn sync(&mut self, state: &FilterState, photos: &[&Photo]) -> bool {
        let change = FacetChange::from_state(state);
        let changed = self.last_published.as_ref() != Some(&change);
        if changed {
            self.last_published = Some(change.clone());
            self.channel.publish(change);
        }
        self.update_viewer_photos(photos);
        changed
    }
}

impl std::fmt::Debug for ViewSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewSync")
            .field("channel", &self.channel)
            .field("has_viewer", &self.viewer.is_some())
            .field("last_published", &self.last_published)
            .finish()
    }
}

impl Default for ViewSync {
    fn default() -> Self {
        Self::new(None)
    }
}
