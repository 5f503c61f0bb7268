//! TUI key handling
//!
//! Translates key events into AppState mutations. No rendering, no IO:
//! the runner drains `pending_submit` and drives the network side.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::config::DefaultsConfig;
use crate::options;

use super::state::{AppState, FormField, InteractionMode, PickerState, PickerTarget};

/// How far PageUp/PageDown move the plan pane
const PLAN_SCROLL_STEP: u16 = 5;

/// The TUI application
pub struct App {
    /// Application state
    pub state: AppState,
}

impl App {
    pub fn new(defaults: &DefaultsConfig) -> Self {
        debug!("App::new: called");
        Self {
            state: AppState::new(defaults),
        }
    }

    /// Handle a key event. Returns true if the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        if key.kind == KeyEventKind::Release {
            return false;
        }

        // Any keypress clears a transient notification
        self.state.notification = None;

        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            debug!("App::handle_key: Ctrl+C, quitting");
            self.state.should_quit = true;
            return true;
        }

        match &self.state.interaction_mode {
            InteractionMode::Help => {
                debug!("App::handle_key: closing help overlay");
                self.state.interaction_mode = InteractionMode::Form;
            }
            InteractionMode::Picker(_) => self.handle_picker_key(key),
            InteractionMode::Form => {
                if self.handle_form_key(key) {
                    return true;
                }
            }
        }

        self.state.should_quit
    }

    /// Keys inside the multi-select picker overlay
    fn handle_picker_key(&mut self, key: KeyEvent) {
        debug!(?key.code, "App::handle_picker_key: called");
        let InteractionMode::Picker(picker) = &mut self.state.interaction_mode else {
            return;
        };
        let len = picker.target.catalog().len();

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                picker.cursor = if picker.cursor == 0 { len - 1 } else { picker.cursor - 1 };
            }
            KeyCode::Down | KeyCode::Char('j') => {
                picker.cursor = (picker.cursor + 1) % len;
            }
            KeyCode::Char(' ') => {
                let cursor = picker.cursor;
                let flags = match picker.target {
                    PickerTarget::Kpis => &mut self.state.kpi_selected,
                    PickerTarget::Channels => &mut self.state.channel_selected,
                };
                flags[cursor] = !flags[cursor];
                debug!(cursor, selected = flags[cursor], "App::handle_picker_key: toggled");
            }
            KeyCode::Enter | KeyCode::Esc => {
                debug!("App::handle_picker_key: closing picker");
                self.state.interaction_mode = InteractionMode::Form;
            }
            _ => {}
        }
    }

    /// Keys in normal form navigation. Returns true if the app should exit.
    fn handle_form_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key.code, focus = ?self.state.focus, "App::handle_form_key: called");
        match key.code {
            KeyCode::Esc => {
                debug!("App::handle_form_key: Esc, quitting");
                self.state.should_quit = true;
                return true;
            }
            KeyCode::Char('q') if !self.state.focus.is_text() => {
                debug!("App::handle_form_key: q, quitting");
                self.state.should_quit = true;
                return true;
            }
            KeyCode::Char('?') if !self.state.focus.is_text() => {
                debug!("App::handle_form_key: opening help overlay");
                self.state.interaction_mode = InteractionMode::Help;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.state.focus = self.state.focus.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.focus = self.state.focus.prev();
            }
            KeyCode::Left => self.cycle_focused_field(false),
            KeyCode::Right => self.cycle_focused_field(true),
            KeyCode::PageUp => {
                self.state.plan_scroll = self.state.plan_scroll.saturating_sub(PLAN_SCROLL_STEP);
            }
            KeyCode::PageDown => {
                self.state.plan_scroll = self.state.plan_scroll.saturating_add(PLAN_SCROLL_STEP);
            }
            KeyCode::Enter => match self.state.focus {
                FormField::Kpis => {
                    debug!("App::handle_form_key: opening KPI picker");
                    self.state.interaction_mode = InteractionMode::Picker(PickerState::new(PickerTarget::Kpis));
                }
                FormField::Channels => {
                    debug!("App::handle_form_key: opening channel picker");
                    self.state.interaction_mode = InteractionMode::Picker(PickerState::new(PickerTarget::Channels));
                }
                FormField::Submit => {
                    debug!("App::handle_form_key: queuing submit");
                    self.state.pending_submit = Some(self.state.build_request());
                }
                _ => {
                    self.state.focus = self.state.focus.next();
                }
            },
            KeyCode::Backspace => match self.state.focus {
                FormField::Brand => {
                    self.state.brand_input.pop();
                }
                FormField::Budget => {
                    self.state.budget_input.pop();
                }
                _ => {}
            },
            KeyCode::Char(c) => match self.state.focus {
                FormField::Brand => {
                    self.state.brand_input.push(c);
                }
                FormField::Budget if c.is_ascii_digit() => {
                    self.state.budget_input.push(c);
                }
                _ => {}
            },
            _ => {}
        }

        false
    }

    /// Cycle a single-choice field left or right (wrapping)
    fn cycle_focused_field(&mut self, forward: bool) {
        debug!(focus = ?self.state.focus, forward, "App::cycle_focused_field: called");
        let (index, len) = match self.state.focus {
            FormField::Year => (&mut self.state.year_index, options::year_choices().len()),
            FormField::Timeframe => (&mut self.state.timeframe_index, options::TIMEFRAMES.len()),
            FormField::Allocation => (&mut self.state.allocation_index, options::ALLOCATIONS.len()),
            _ => return,
        };

        *index = if forward {
            (*index + 1) % len
        } else if *index == 0 {
            len - 1
        } else {
            *index - 1
        };
    }
}
