//! The mount point pages render into: root markup, navigation icons, the receipt
//! modal, blocking alerts and the file input.

use serde::Serialize;

use crate::controller::bills::EyeIcon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIcon {
    Window,
    Mail,
}

impl NavIcon {
    pub fn as_str(self) -> &'static str {
        match self {
            NavIcon::Window => "window",
            NavIcon::Mail => "mail",
        }
    }

    pub fn test_id(self) -> &'static str {
        match self {
            NavIcon::Window => "icon-window",
            NavIcon::Mail => "icon-mail",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalImage {
    pub src: String,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub image: ModalImage,
    pub markup: String,
}

#[derive(Debug, Default)]
pub struct Document {
    root: String,
    active_icon: Option<NavIcon>,
    modal: Option<Modal>,
    alerts: Vec<String>,
    file_input: String,
    eye_icons: Vec<EyeIcon>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the root region and moves the active marker to `active_icon`.
    pub fn mount(&mut self, active_icon: Option<NavIcon>, markup: String) {
        self.root = markup;
        self.active_icon = active_icon;
        self.modal = None;
        self.file_input.clear();
        self.eye_icons.clear();
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Root markup followed by the open modal, if any.
    pub fn html(&self) -> String {
        match &self.modal {
            Some(modal) => format!("{}\n{}", self.root, modal.markup),
            None => self.root.clone(),
        }
    }

    pub fn active_icon(&self) -> Option<NavIcon> {
        self.active_icon
    }

    pub fn is_icon_active(&self, icon: NavIcon) -> bool {
        self.active_icon == Some(icon)
    }

    pub fn open_modal(&mut self, modal: Modal) {
        self.modal = Some(modal);
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    /// Blocking notification shown to the user.
    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Hands pending alerts to whoever shows them.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    pub fn set_file_input(&mut self, file_name: impl Into<String>) {
        self.file_input = file_name.into();
    }

    pub fn clear_file_input(&mut self) {
        self.file_input.clear();
    }

    pub fn file_input_value(&self) -> &str {
        &self.file_input
    }

    /// Eye icons of the mounted bills table, one per row in display order.
    pub fn eye_icons(&self) -> &[EyeIcon] {
        &self.eye_icons
    }

    pub fn set_eye_icons(&mut self, icons: Vec<EyeIcon>) {
        self.eye_icons = icons;
    }

    /// Number of elements carrying `data-testid="{test_id}"` in the root markup.
    pub fn count_test_id(&self, test_id: &str) -> usize {
        self.root
            .matches(&format!("data-testid=\"{test_id}\""))
            .count()
    }

    pub fn contains_text(&self, text: &str) -> bool {
        self.html().contains(text)
    }
}
