//! Desktop icon selection and single/double-click disambiguation.

use crate::{model::WindowType, timer::CancellableTimer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopIcon {
    pub window_type: WindowType,
    pub label: String,
    pub image: String,
    pub selected: bool,
}

impl DesktopIcon {
    pub fn new(window_type: &str, label: &str, image: &str) -> Self {
        Self {
            window_type: WindowType::from(window_type),
            label: label.to_string(),
            image: image.to_string(),
            selected: false,
        }
    }

    pub fn dom_id(&self) -> String {
        format!("desktop-icon-{}", self.window_type)
    }
}

/// Result of a click on a desktop icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First click: the icon is selected and the disambiguation timer armed with this generation.
    Armed { generation: u64 },
    /// Second click inside the disambiguation window: open this window type.
    Open(WindowType),
}

/// Owns the selected-icon flag. At most one icon is selected at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IconSelection {
    icons: Vec<DesktopIcon>,
    click_timer: CancellableTimer,
    pending_click: Option<WindowType>,
}

impl IconSelection {
    pub fn new(icons: Vec<DesktopIcon>) -> Self {
        Self {
            icons,
            ..Self::default()
        }
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    pub fn selected(&self) -> Option<&WindowType> {
        self.icons
            .iter()
            .find(|icon| icon.selected)
            .map(|icon| &icon.window_type)
    }

    /// Whether a single click is still waiting to be confirmed or upgraded to a double-click.
    pub fn click_pending(&self) -> bool {
        self.click_timer.is_pending()
    }

    pub fn select_icon(&mut self, window_type: &WindowType) {
        for icon in &mut self.icons {
            icon.selected = &icon.window_type == window_type;
        }
    }

    pub fn deselect_all(&mut self) {
        for icon in &mut self.icons {
            icon.selected = false;
        }
    }

    /// Selects immediately; a second click on the same icon while the timer is pending opens it.
    pub fn click(&mut self, window_type: &WindowType) -> ClickOutcome {
        if self.click_timer.is_pending() && self.pending_click.as_ref() == Some(window_type) {
            return ClickOutcome::Open(self.double_click(window_type));
        }

        self.select_icon(window_type);
        self.pending_click = Some(window_type.clone());
        ClickOutcome::Armed {
            generation: self.click_timer.start(),
        }
    }

    /// Handles an explicit double-click, suppressing the pending single-click timer.
    pub fn double_click(&mut self, window_type: &WindowType) -> WindowType {
        self.click_timer.cancel();
        self.pending_click = None;
        self.select_icon(window_type);
        window_type.clone()
    }

    /// The single click became final. Returns `false` for stale or cancelled timers.
    pub fn click_timer_elapsed(&mut self, generation: u64) -> bool {
        if self.click_timer.expire(generation) {
            self.pending_click = None;
            true
        } else {
            false
        }
    }

    /// Enter key: open the selected icon, if any.
    pub fn activate_selected(&self) -> Option<WindowType> {
        self.selected().cloned()
    }

    /// Pointer pressed anywhere; `hit` is the icon actually under the pointer at event time.
    pub fn pointer_down(&mut self, hit: Option<&WindowType>) {
        if hit.is_none() {
            self.deselect_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn selection() -> IconSelection {
        IconSelection::new(vec![
            DesktopIcon::new("about", "About Me", "icons/about.png"),
            DesktopIcon::new("projects", "Projects", "icons/projects.png"),
        ])
    }

    fn selected_count(selection: &IconSelection) -> usize {
        selection.icons().iter().filter(|icon| icon.selected).count()
    }

    #[test]
    fn selecting_an_icon_deselects_the_previous_one() {
        let mut selection = selection();
        selection.select_icon(&WindowType::from("about"));
        selection.select_icon(&WindowType::from("projects"));

        assert_eq!(selected_count(&selection), 1);
        assert_eq!(selection.selected(), Some(&WindowType::from("projects")));
    }

    #[test]
    fn single_click_selects_and_arms_timer_without_opening() {
        let mut selection = selection();
        let about = WindowType::from("about");

        let ClickOutcome::Armed { generation } = selection.click(&about) else {
            panic!("first click should arm the timer");
        };
        assert_eq!(selection.selected(), Some(&about));
        assert!(selection.click_timer_elapsed(generation));
        assert!(!selection.click_pending());
        assert_eq!(selection.selected(), Some(&about));
    }

    #[test]
    fn second_click_inside_window_opens_and_disarms_timer() {
        let mut selection = selection();
        let about = WindowType::from("about");

        let ClickOutcome::Armed { generation } = selection.click(&about) else {
            panic!("first click should arm the timer");
        };
        assert_eq!(selection.click(&about), ClickOutcome::Open(about.clone()));
        assert!(!selection.click_pending());
        assert!(!selection.click_timer_elapsed(generation));
    }

    #[test]
    fn click_on_another_icon_rearms_instead_of_opening() {
        let mut selection = selection();
        let ClickOutcome::Armed { generation: first } = selection.click(&WindowType::from("about"))
        else {
            panic!("first click should arm the timer");
        };
        let outcome = selection.click(&WindowType::from("projects"));

        assert!(matches!(outcome, ClickOutcome::Armed { .. }));
        assert!(!selection.click_timer_elapsed(first));
        assert_eq!(selection.selected(), Some(&WindowType::from("projects")));
    }

    #[test]
    fn pointer_down_outside_icons_clears_selection() {
        let mut selection = selection();
        let about = WindowType::from("about");
        selection.select_icon(&about);

        selection.pointer_down(Some(&about));
        assert_eq!(selection.selected(), Some(&about));

        selection.pointer_down(None);
        assert_eq!(selection.selected(), None);
        assert_eq!(selection.activate_selected(), None);
    }
}
