use std::fmt;

/// How many projects the grid shows before "Ver más obras".
pub const INITIAL_VISIBLE: usize = 6;

pub const LABEL_SHOW_MORE: &str = "Ver más obras";
pub const LABEL_SHOW_LESS: &str = "Ver menos";

/// Expand/collapse state of the project grid.
///
/// `Collapsed` shows the first `threshold` projects and `Expanded` shows all
/// of them. A data set no larger than the threshold locks the machine in
/// `Expanded` with the toggle hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    threshold: usize,
    total: usize,
    visible: usize,
    expanded: bool,
    locked: bool,
}

/// Status line under the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Empty,
    All { total: usize },
    Partial { shown: usize, total: usize },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Empty => write!(f, "No hay obras para mostrar."),
            Status::All { total } => write!(f, "Mostrando todas las {} obras.", total),
            Status::Partial { shown, total } => write!(
                f,
                "Mostrando primeras {} de {} obras. Usa “Ver más” para ver el resto.",
                shown, total
            ),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(INITIAL_VISIBLE)
    }
}

impl Pagination {
    pub fn new(threshold: usize) -> Self {
        Pagination {
            threshold,
            total: 0,
            visible: 0,
            expanded: false,
            locked: false,
        }
    }

    /// Called once the data set arrives.
    pub fn on_loaded(&mut self, total: usize) {
        self.total = total;
        if total <= self.threshold {
            self.expanded = true;
            self.locked = true;
            self.visible = total;
        } else {
            self.expanded = false;
            self.locked = false;
            self.visible = self.threshold;
        }
    }

    /// The "show more / show less" control. No-op while locked.
    pub fn toggle(&mut self) {
        if self.locked {
            return;
        }
        if self.expanded {
            self.expanded = false;
            self.visible = self.threshold.min(self.total);
        } else {
            self.expanded = true;
            self.visible = self.total;
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn visible(&self) -> usize {
        if self.expanded {
            self.total
        } else {
            self.visible.min(self.total)
        }
    }

    /// Label for the toggle, or `None` when it is hidden.
    pub fn toggle_label(&self) -> Option<&'static str> {
        if self.locked || self.total <= self.threshold {
            None
        } else if self.expanded {
            Some(LABEL_SHOW_LESS)
        } else {
            Some(LABEL_SHOW_MORE)
        }
    }

    pub fn status(&self) -> Status {
        let shown = self.visible();
        if self.total == 0 {
            Status::Empty
        } else if self.expanded || shown == self.total {
            Status::All { total: self.total }
        } else {
            Status::Partial {
                shown,
                total: self.total,
            }
        }
    }
}
