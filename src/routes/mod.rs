pub mod api;
pub mod public;

use crate::config::SiteConfig;
use crate::gallery::{GalleryView, ProjectGallery, SortKey};
use crate::models::project::ProjectStore;
use crate::scheduler::ManualScheduler;

/// Build the project grid for one request. The feed is read fresh each time;
/// no card is activated, so the throwaway scheduler never holds a task.
pub(crate) fn gallery_view(
    config: &SiteConfig,
    sort: Option<&str>,
    expanded: Option<bool>,
) -> GalleryView {
    let mut sched = ManualScheduler::new();
    let mut gallery = ProjectGallery::new(&config.media_url_root);
    gallery.load(ProjectStore::from_file(&config.projects_file), &mut sched);
    gallery.set_sort(SortKey::parse(sort.unwrap_or("default")), &mut sched);
    if expanded.unwrap_or(false) && !gallery.pagination().is_expanded() {
        gallery.toggle(&mut sched);
    }
    gallery.view()
}
