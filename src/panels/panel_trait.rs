use egui::Ui;

use crate::data::session::TradeSession;

#[derive(Debug, Clone)]
pub struct PanelState {
    pub title: &'static str,
    pub icon: Option<&'static str>,
    pub visible: bool,
}

impl PanelState {
    pub fn new(title: &'static str, icon: &'static str) -> Self {
        Self {
            title,
            icon: Some(icon),
            visible: true,
        }
    }
}

/// A dockable piece of the viewer UI operating on the shared session.
///
/// Panels only mutate the session; the app runs
/// [`TradeSession::recompute`] once after all panels rendered.
pub trait Panel {
    fn state(&self) -> &PanelState;
    fn state_mut(&mut self) -> &mut PanelState;

    fn title(&self) -> &'static str {
        self.state().title
    }

    fn icon_only(&self) -> Option<&'static str> {
        self.state().icon
    }

    fn title_and_icon(&self) -> String {
        match self.icon_only() {
            Some(icon) => format!("{} {}", icon, self.title()),
            None => self.title().to_string(),
        }
    }

    /// Entry in the "View" menu; default toggles visibility.
    fn render_menu(&mut self, ui: &mut Ui, _session: &mut TradeSession) {
        let label = self.title_and_icon();
        let st = self.state_mut();
        ui.checkbox(&mut st.visible, label);
    }

    fn render_panel(&mut self, ui: &mut Ui, session: &mut TradeSession);
}
