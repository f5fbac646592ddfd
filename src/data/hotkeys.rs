//! Keyboard shortcuts: configurable bindings and per-frame detection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use eframe::egui;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    None,
    Ctrl,
    Alt,
    Shift,
    CtrlShift,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modifier::None => "",
            Modifier::Ctrl => "Ctrl",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
            Modifier::CtrlShift => "Ctrl+Shift",
        };
        write!(f, "{}", s)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotkey {
    pub modifier: Modifier,
    pub key: char,
}

impl Hotkey {
    pub fn new(modifier: Modifier, key: char) -> Self {
        Self {
            modifier,
            key: key.to_ascii_uppercase(),
        }
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key {
            ' ' => "Space".to_string(),
            other => other.to_string(),
        };
        if self.modifier == Modifier::None {
            write!(f, "{}", key)
        } else {
            write!(f, "{}+{}", self.modifier, key)
        }
    }
}

impl FromStr for Hotkey {
    type Err = String;

    /// Parse `"Ctrl+O"`, `"shift + h"`, `"Space"` and the like.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<String> = s.split('+').map(|p| p.trim().to_lowercase()).collect();
        let (last, mods) = match parts.split_last() {
            Some((last, mods)) if !last.is_empty() => (last, mods),
            _ => return Err(format!("invalid hotkey '{}'", s)),
        };
        let key = match last.as_str() {
            "space" => ' ',
            k if k.chars().count() == 1 => k.chars().next().unwrap_or(' '),
            k => return Err(format!("unknown key '{}'", k)),
        };
        let mut ctrl = false;
        let mut alt = false;
        let mut shift = false;
        for m in mods {
            match m.as_str() {
                "ctrl" | "control" | "cmd" => ctrl = true,
                "alt" => alt = true,
                "shift" => shift = true,
                other => return Err(format!("unknown modifier '{}'", other)),
            }
        }
        let modifier = match (ctrl, alt, shift) {
            (false, false, false) => Modifier::None,
            (true, false, false) => Modifier::Ctrl,
            (false, true, false) => Modifier::Alt,
            (false, false, true) => Modifier::Shift,
            (true, false, true) => Modifier::CtrlShift,
            _ => return Err(format!("unsupported modifier combination in '{}'", s)),
        };
        Ok(Hotkey::new(modifier, key))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotkeys {
    pub open_file: Option<Hotkey>,
    pub toggle_cumulative: Option<Hotkey>,
    pub toggle_histogram: Option<Hotkey>,
    pub include_all: Option<Hotkey>,
    pub include_none: Option<Hotkey>,
    pub fit_view: Option<Hotkey>,
    pub save_png: Option<Hotkey>,
}

impl Default for Hotkeys {
    fn default() -> Self {
        Self {
            open_file: Some(Hotkey::new(Modifier::Ctrl, 'O')),
            toggle_cumulative: Some(Hotkey::new(Modifier::None, 'C')),
            toggle_histogram: Some(Hotkey::new(Modifier::None, 'H')),
            include_all: Some(Hotkey::new(Modifier::Ctrl, 'A')),
            include_none: Some(Hotkey::new(Modifier::CtrlShift, 'A')),
            fit_view: Some(Hotkey::new(Modifier::None, 'F')),
            save_png: Some(Hotkey::new(Modifier::None, 'S')),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HotkeyName {
    OpenFile,
    ToggleCumulative,
    ToggleHistogram,
    IncludeAll,
    IncludeNone,
    FitView,
    SavePng,
}

impl Hotkeys {
    pub fn reset_defaults(&mut self) {
        *self = Hotkeys::default();
    }

    fn bindings(&self) -> [(Option<Hotkey>, HotkeyName); 7] {
        [
            (self.open_file, HotkeyName::OpenFile),
            (self.toggle_cumulative, HotkeyName::ToggleCumulative),
            (self.toggle_histogram, HotkeyName::ToggleHistogram),
            (self.include_all, HotkeyName::IncludeAll),
            (self.include_none, HotkeyName::IncludeNone),
            (self.fit_view, HotkeyName::FitView),
            (self.save_png, HotkeyName::SavePng),
        ]
    }

    /// Actions bound to `hk`, in declaration order.
    pub fn actions_for(&self, hk: &Hotkey) -> Vec<HotkeyName> {
        self.bindings()
            .into_iter()
            .filter(|(bound, _)| bound.as_ref() == Some(hk))
            .map(|(_, name)| name)
            .collect()
    }
}

fn mods_to_modifier(m: egui::Modifiers) -> Option<Modifier> {
    let ctrl = m.ctrl || m.command;
    match (ctrl, m.alt, m.shift) {
        (false, false, false) => Some(Modifier::None),
        (true, false, false) => Some(Modifier::Ctrl),
        (false, true, false) => Some(Modifier::Alt),
        (false, false, true) => Some(Modifier::Shift),
        (true, false, true) => Some(Modifier::CtrlShift),
        _ => None,
    }
}

fn event_to_hotkey(ev: &egui::Event) -> Option<Hotkey> {
    let egui::Event::Key {
        key,
        pressed: true,
        repeat: false,
        modifiers,
        ..
    } = ev
    else {
        return None;
    };
    let ch = match key {
        egui::Key::Space => ' ',
        other => {
            let name = other.name();
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphanumeric() => c,
                _ => return None,
            }
        }
    };
    mods_to_modifier(*modifiers).map(|m| Hotkey::new(m, ch))
}

/// Hotkey actions triggered this frame. Nothing fires while a text field
/// has keyboard focus.
pub fn detect_hotkey_actions(cfg: &Hotkeys, ctx: &egui::Context) -> Vec<HotkeyName> {
    if ctx.wants_keyboard_input() {
        return Vec::new();
    }
    let mut actions = Vec::new();
    ctx.input(|i| {
        for hk in i.events.iter().filter_map(event_to_hotkey) {
            for act in cfg.actions_for(&hk) {
                if !actions.contains(&act) {
                    actions.push(act);
                }
            }
        }
    });
    actions
}
