//! Project gallery engine.
//!
//! [`ProjectGallery`] combines the fetched [`ProjectStore`], the active
//! [`SortKey`] and the [`Pagination`] machine into the set of live cards.
//! The hero banner ([`rotator::HeroRotator`]) runs separately.

pub mod card;
pub mod pagination;
pub mod rotator;
pub mod slideshow;
pub mod sort;

use serde::Serialize;

use crate::models::project::ProjectStore;
use crate::render::{Element, Node};
use crate::scheduler::{Scheduler, TaskId};

pub use card::Card;
pub use pagination::{Pagination, Status};
pub use sort::SortKey;

/// Renderable snapshot of the gallery.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryView {
    pub sort: SortKey,
    pub total: usize,
    pub visible: usize,
    pub expanded: bool,
    pub status: String,
    pub toggle: Option<String>,
    pub cards: Vec<Node>,
}

impl GalleryView {
    pub fn to_node(&self) -> Node {
        let mut grid = Element::new("div")
            .class("projects-grid")
            .attr("id", "projectsGrid");
        for card in &self.cards {
            grid = grid.child(card.clone());
        }

        let mut section = Element::new("section")
            .class("projects")
            .child(grid)
            .child(
                Element::new("p")
                    .class("projects-status")
                    .attr("id", "projectsStatus")
                    .text(&self.status),
            );
        if let Some(label) = &self.toggle {
            section = section.child(
                Element::new("a")
                    .class("btn projects-load-more")
                    .attr("id", "projectsLoadMore")
                    .attr("href", &toggle_href(self.sort, !self.expanded))
                    .text(label),
            );
        }
        section.into()
    }
}

fn toggle_href(sort: SortKey, expanded: bool) -> String {
    format!("?sort={}&expanded={}", sort.as_str(), expanded)
}

pub struct ProjectGallery {
    store: ProjectStore,
    sort: SortKey,
    pagination: Pagination,
    media_root: String,
    cards: Vec<Card>,
}

impl ProjectGallery {
    pub fn new(media_root: &str) -> Self {
        Self::with_pagination(media_root, Pagination::default())
    }

    pub fn with_pagination(media_root: &str, pagination: Pagination) -> Self {
        ProjectGallery {
            store: ProjectStore::default(),
            sort: SortKey::Default,
            pagination,
            media_root: media_root.to_string(),
            cards: Vec::new(),
        }
    }

    /// Completion of the data fetch. A failed fetch leaves an empty gallery.
    pub fn load(&mut self, fetched: Result<ProjectStore, String>, scheduler: &mut dyn Scheduler) {
        self.store = match fetched {
            Ok(store) => store,
            Err(e) => {
                log::error!("[gallery] Error loading projects: {}", e);
                ProjectStore::default()
            }
        };
        self.pagination.on_loaded(self.store.len());
        self.rebuild(scheduler);
    }

    /// Re-sort. Pagination is left as it was.
    pub fn set_sort(&mut self, key: SortKey, scheduler: &mut dyn Scheduler) {
        self.sort = key;
        self.rebuild(scheduler);
    }

    pub fn toggle(&mut self, scheduler: &mut dyn Scheduler) {
        self.pagination.toggle();
        self.rebuild(scheduler);
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn activate(&mut self, card: usize, scheduler: &mut dyn Scheduler) -> bool {
        match self.cards.get_mut(card) {
            Some(c) => c.activate(scheduler),
            None => false,
        }
    }

    pub fn deactivate(&mut self, card: usize, scheduler: &mut dyn Scheduler) -> bool {
        match self.cards.get_mut(card) {
            Some(c) => c.deactivate(scheduler),
            None => false,
        }
    }

    /// Route a fired timer to the card that owns it.
    pub fn on_timer(&mut self, task: TaskId) -> bool {
        self.cards.iter_mut().any(|c| c.on_timer(task))
    }

    fn rebuild(&mut self, scheduler: &mut dyn Scheduler) {
        for card in &mut self.cards {
            card.deactivate(scheduler);
        }
        let visible = self.pagination.visible();
        self.cards = sort::sort(self.store.all(), self.sort)
            .into_iter()
            .take(visible)
            .map(|p| Card::build(p, &self.media_root))
            .collect();
    }

    pub fn view(&self) -> GalleryView {
        GalleryView {
            sort: self.sort,
            total: self.pagination.total(),
            visible: self.cards.len(),
            expanded: self.pagination.is_expanded(),
            status: self.pagination.status().to_string(),
            toggle: self.pagination.toggle_label().map(|l| l.to_string()),
            cards: self.cards.iter().map(Card::view).collect(),
        }
    }
}
