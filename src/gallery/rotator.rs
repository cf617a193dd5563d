use std::time::Duration;

use crate::media::{self, MediaItem};
use crate::render::{Element, Node};
use crate::scheduler::{Scheduler, TaskId};

pub const ROTATE_INTERVAL: Duration = Duration::from_millis(7000);
pub const FADE_DELAY: Duration = Duration::from_millis(200);
pub const MAX_SLOTS: usize = 3;

/// One stable display position of the hero banner.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub item: usize,
    pub visible: bool,
    pub content: Option<Element>,
}

/// Hero banner: a window of `min(3, total)` slots cycled through the item
/// list. Each tick advances the window by its own width and fades every slot
/// out, swaps its content after [`FADE_DELAY`], then fades it back in.
#[derive(Debug)]
pub struct HeroRotator {
    media_root: String,
    items: Vec<MediaItem>,
    start: usize,
    slots: Vec<Slot>,
    started: bool,
    timer: Option<TaskId>,
    pending_swap: Option<TaskId>,
}

impl HeroRotator {
    pub fn new(items: Vec<MediaItem>, media_root: &str) -> Self {
        let window = MAX_SLOTS.min(items.len());
        let slots = (0..window)
            .map(|i| Slot {
                item: i,
                visible: false,
                content: None,
            })
            .collect();
        HeroRotator {
            media_root: media_root.to_string(),
            items,
            start: 0,
            slots,
            started: false,
            timer: None,
            pending_swap: None,
        }
    }

    pub fn window(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot_items(&self) -> Vec<usize> {
        self.slots.iter().map(|s| s.item).collect()
    }

    pub fn is_rotating(&self) -> bool {
        self.timer.is_some()
    }

    /// First render, plus the rotation timer when there is more to show
    /// than fits. Calling it again is a no-op.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) {
        if self.started || self.slots.is_empty() {
            return;
        }
        self.started = true;
        self.begin_fade(scheduler);
        if self.items.len() > self.window() {
            self.timer = Some(scheduler.every(ROTATE_INTERVAL));
        }
    }

    pub fn on_timer(&mut self, task: TaskId, scheduler: &mut dyn Scheduler) -> bool {
        if self.timer == Some(task) {
            self.advance();
            self.begin_fade(scheduler);
            true
        } else if self.pending_swap == Some(task) {
            self.pending_swap = None;
            self.swap_content();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) {
        let total = self.items.len();
        let window = self.window();
        self.start = (self.start + window) % total;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.item = (self.start + i) % total;
        }
    }

    fn begin_fade(&mut self, scheduler: &mut dyn Scheduler) {
        for slot in &mut self.slots {
            slot.visible = false;
        }
        if let Some(old) = self.pending_swap.take() {
            scheduler.cancel(old);
        }
        self.pending_swap = Some(scheduler.once(FADE_DELAY));
    }

    fn swap_content(&mut self) {
        for slot in &mut self.slots {
            let Some(item) = self.items.get(slot.item) else {
                continue;
            };
            slot.content = Some(media::media_element(
                &self.media_root,
                &item.name,
                item.kind,
                &item.name,
                false,
            ));
            slot.visible = true;
        }
    }

    pub fn view(&self) -> Node {
        let mut grid = Element::new("div").attr("id", "hero-gallery");
        for slot in &self.slots {
            let opacity = if slot.visible { "opacity:1" } else { "opacity:0" };
            let mut fig = Element::new("figure")
                .class("hero-gallery-slide")
                .attr("style", opacity);
            if let Some(content) = &slot.content {
                fig = fig.child(content.clone());
            }
            grid = grid.child(fig);
        }
        grid.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaKind;
    use crate::scheduler::ManualScheduler;

    fn items(n: usize) -> Vec<MediaItem> {
        (0..n)
            .map(|i| MediaItem {
                name: format!("construccionimagen{}.jpg", i + 1),
                kind: MediaKind::Image,
            })
            .collect()
    }

    fn drive(rotator: &mut HeroRotator, sched: &mut ManualScheduler, by: Duration) {
        for task in sched.advance(by) {
            rotator.on_timer(task, sched);
        }
    }

    #[test]
    fn test_four_items_window_three() {
        let mut sched = ManualScheduler::new();
        let mut rotator = HeroRotator::new(items(4), "assets/");
        rotator.start(&mut sched);
        assert_eq!(rotator.slot_items(), vec![0, 1, 2]);
        assert!(rotator.is_rotating());

        drive(&mut rotator, &mut sched, ROTATE_INTERVAL);
        assert_eq!(rotator.slot_items(), vec![3, 0, 1]);

        drive(&mut rotator, &mut sched, ROTATE_INTERVAL);
        assert_eq!(rotator.slot_items(), vec![2, 3, 0]);
    }

    #[test]
    fn test_fade_then_swap() {
        let mut sched = ManualScheduler::new();
        let mut rotator = HeroRotator::new(items(5), "assets/");
        rotator.start(&mut sched);
        assert!(rotator.slots().iter().all(|s| !s.visible && s.content.is_none()));

        drive(&mut rotator, &mut sched, FADE_DELAY);
        assert!(rotator.slots().iter().all(|s| s.visible));
        assert_eq!(
            rotator.slots()[0].content.as_ref().unwrap().get_attr("src"),
            Some("assets/construccionimagen1.jpg")
        );

        drive(&mut rotator, &mut sched, ROTATE_INTERVAL - FADE_DELAY);
        assert!(rotator.slots().iter().all(|s| !s.visible));
        // old content stays attached during the fade
        assert_eq!(
            rotator.slots()[0].content.as_ref().unwrap().get_attr("src"),
            Some("assets/construccionimagen1.jpg")
        );

        drive(&mut rotator, &mut sched, FADE_DELAY);
        assert_eq!(rotator.slot_items(), vec![3, 4, 0]);
        assert_eq!(
            rotator.slots()[0].content.as_ref().unwrap().get_attr("src"),
            Some("assets/construccionimagen4.jpg")
        );
        assert!(rotator.slots().iter().all(|s| s.visible));
    }

    #[test]
    fn test_small_list_is_static() {
        for n in 1..=3 {
            let mut sched = ManualScheduler::new();
            let mut rotator = HeroRotator::new(items(n), "assets/");
            rotator.start(&mut sched);
            assert_eq!(rotator.window(), n);
            assert!(!rotator.is_rotating());
            drive(&mut rotator, &mut sched, ROTATE_INTERVAL * 3);
            assert_eq!(rotator.slot_items(), (0..n).collect::<Vec<_>>());
            assert_eq!(sched.live_count(), 0);
        }
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        let mut sched = ManualScheduler::new();
        let mut rotator = HeroRotator::new(Vec::new(), "assets/");
        rotator.start(&mut sched);
        assert_eq!(rotator.window(), 0);
        assert_eq!(sched.live_count(), 0);
        assert!(rotator.view().as_element().unwrap().children.is_empty());
    }

    #[test]
    fn test_start_twice_keeps_one_timer() {
        let mut sched = ManualScheduler::new();
        let mut rotator = HeroRotator::new(items(6), "assets/");
        rotator.start(&mut sched);
        rotator.start(&mut sched);
        // rotation timer plus the first fade
        assert_eq!(sched.live_count(), 2);
    }

    #[test]
    fn test_video_slot_and_view() {
        let mut sched = ManualScheduler::new();
        let list = vec![
            MediaItem {
                name: "obra.mp4".into(),
                kind: MediaKind::Video,
            },
            MediaItem {
                name: "obra 2.jpg".into(),
                kind: MediaKind::Image,
            },
        ];
        let mut rotator = HeroRotator::new(list, "assets/");
        rotator.start(&mut sched);
        drive(&mut rotator, &mut sched, FADE_DELAY);
        let html = rotator.view().to_html();
        assert!(html.contains("<video src=\"assets/obra.mp4\""));
        assert!(html.contains("<img src=\"assets/obra%202.jpg\" alt=\"obra 2.jpg\">"));
        assert_eq!(html.matches("opacity:1").count(), 2);
    }
}
