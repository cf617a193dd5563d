use crate::gallery::slideshow::Slideshow;
use crate::media;
use crate::models::project::{Amount, Project};
use crate::render::{Element, Node};
use crate::scheduler::{Scheduler, TaskId};

/// Format a number the way es-MX shows MXN: `$1,234,567.89`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

/// Numbers get currency formatting, text passes through untouched.
pub fn format_amount(amount: Option<&Amount>) -> String {
    match amount {
        Some(Amount::Number(n)) => format_currency(*n),
        Some(Amount::Text(t)) => t.clone(),
        None => String::new(),
    }
}

fn thumb_element(media_root: &str, file_name: &str, label: &str) -> Element {
    media::media_element(media_root, file_name, media::classify(file_name), label, true)
}

/// Display unit for one project, with its own hover/focus slideshow.
///
/// Cards do not own a scheduler, so a running card must be deactivated
/// before it is dropped or its timer keeps firing into nothing.
#[derive(Debug)]
pub struct Card {
    media_root: String,
    badge: Option<String>,
    media: Vec<String>,
    media_label: String,
    title: String,
    description: String,
    year: i32,
    client: String,
    amount: String,
    active: Option<Element>,
    slideshow: Option<Slideshow>,
}

impl Card {
    pub fn build(project: &Project, media_root: &str) -> Self {
        let media = project.gallery.normalized();
        let media_label = project.media_label().to_string();
        let active = media
            .first()
            .map(|first| thumb_element(media_root, first, &media_label));
        let badge = project
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(|c| c.to_uppercase());

        Card {
            media_root: media_root.to_string(),
            badge,
            slideshow: Slideshow::new(media.len()),
            media,
            media_label,
            title: project.title.clone(),
            description: project.description.clone(),
            year: project.year,
            client: project.client_or_empty().to_string(),
            amount: format_amount(project.amount.as_ref()),
            active,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Index of the media item currently shown.
    pub fn current_index(&self) -> usize {
        self.slideshow.as_ref().map(|s| s.index()).unwrap_or(0)
    }

    pub fn active_element(&self) -> Option<&Element> {
        self.active.as_ref()
    }

    pub fn has_slideshow(&self) -> bool {
        self.slideshow.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.slideshow.as_ref().map(|s| s.is_running()).unwrap_or(false)
    }

    fn show(&mut self, index: usize) {
        if let Some(name) = self.media.get(index) {
            self.active = Some(thumb_element(&self.media_root, name, &self.media_label));
        }
    }

    pub fn activate(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        match self.slideshow.as_mut() {
            Some(show) => show.activate(scheduler),
            None => false,
        }
    }

    pub fn deactivate(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        let stopped = match self.slideshow.as_mut() {
            Some(show) => show.deactivate(scheduler),
            None => false,
        };
        if stopped {
            self.show(0);
        }
        stopped
    }

    /// Returns `true` if the task belonged to this card and the media swapped.
    pub fn on_timer(&mut self, task: TaskId) -> bool {
        let next = self.slideshow.as_mut().and_then(|s| s.on_timer(task));
        match next {
            Some(index) => {
                self.show(index);
                true
            }
            None => false,
        }
    }

    pub fn view(&self) -> Node {
        let mut article = Element::new("article").class("card project-card");

        if let Some(badge) = &self.badge {
            article = article.child(Element::new("div").class("pill").text(badge));
        }

        if let Some(active) = &self.active {
            let mut thumb = Element::new("div")
                .class("project-thumb")
                .attr("tabindex", "0");
            if let Some(show) = &self.slideshow {
                thumb = thumb
                    .attr("data-slideshow-interval", &show.interval().as_millis().to_string())
                    .attr("data-slide-count", &self.media.len().to_string());
            }
            article = article.child(thumb.child(active.clone()));
        }

        let meta_line = |label: &str, value: &str| {
            Element::new("li")
                .child(Element::new("strong").text(label))
                .text(&format!(" {}", value))
        };

        article
            .child(Element::new("h3").text(&self.title))
            .child(Element::new("p").text(&self.description))
            .child(
                Element::new("ul")
                    .class("project-meta-list")
                    .child(meta_line("Año:", &self.year.to_string()))
                    .child(meta_line("Cliente:", &self.client))
                    .child(meta_line("Importe ejecutado:", &self.amount)),
            )
            .into()
    }
}
