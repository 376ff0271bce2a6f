//! Gateway remote-control screen — command menu plus a response log.

use color_eyre::eyre::Result;
use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Paragraph};
use tracing::debug;
use tui_input::Input;

use loradeck_core::model::Eui64;
use loradeck_core::remote::GatewayCommand;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::edit;

/// Commands in menu order. Start and Reboot pick up the config URI and
/// checksum fields at dispatch time.
const COMMAND_LABELS: [&str; 6] = ["Ping", "Uptime", "Temperature", "Start", "Reboot", "Stop"];

/// Oldest log lines are dropped past this point.
const LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Commands,
    Gateway,
    ConfigUri,
    Checksum,
}

struct LogLine {
    time: DateTime<Utc>,
    text: String,
    is_error: bool,
}

pub struct GatewayScreen {
    focused: bool,
    focus: Focus,
    gateway_input: Input,
    config_uri_input: Input,
    checksum_input: Input,
    selected_command: usize,
    /// Latest entries last; rendered bottom-up.
    log: Vec<LogLine>,
    input_error: Option<String>,
    /// One command in flight at a time; dispatch is disabled meanwhile.
    busy: bool,
}

impl GatewayScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            focus: Focus::Commands,
            gateway_input: Input::default(),
            config_uri_input: Input::default(),
            checksum_input: Input::default(),
            selected_command: 0,
            log: Vec::new(),
            input_error: None,
            busy: false,
        }
    }

    fn command(&self) -> GatewayCommand {
        match self.selected_command {
            0 => GatewayCommand::Ping,
            1 => GatewayCommand::Uptime,
            2 => GatewayCommand::Temperature,
            3 => GatewayCommand::Start {
                config_uri: self.config_uri_input.value().to_owned(),
                checksum: self.checksum_input.value().to_owned(),
            },
            4 => GatewayCommand::Reboot {
                config_uri: self.config_uri_input.value().to_owned(),
                checksum: self.checksum_input.value().to_owned(),
            },
            _ => GatewayCommand::Stop,
        }
    }

    fn push_log(&mut self, text: String, is_error: bool) {
        self.log.push(LogLine {
            time: Utc::now(),
            text,
            is_error,
        });
        if self.log.len() > LOG_CAPACITY {
            let excess = self.log.len() - LOG_CAPACITY;
            self.log.drain(..excess);
        }
    }

    fn dispatch(&mut self) -> Option<Action> {
        if self.busy {
            return None;
        }
        self.input_error = None;

        let gateway_id = match self.gateway_input.value().parse::<Eui64>() {
            Ok(eui) => eui,
            Err(e) => {
                self.input_error = Some(e.to_string());
                return None;
            }
        };

        let command = self.command();
        let message = command.message(&gateway_id);
        debug!(%gateway_id, command = command.label(), "dispatching remote command");
        self.push_log(format!("→ {} {gateway_id}", command.label()), false);
        self.busy = true;
        Some(Action::RequestRemote {
            gateway_id,
            message,
        })
    }

    fn render_fields(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

        let field = |title: &'static str, active: bool| {
            Block::default()
                .title(title)
                .title_style(theme::field_label())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if active {
                    theme::border_focused()
                } else {
                    theme::border_default()
                })
        };

        for (idx, (title, input, focus)) in [
            ("Gateway EUI", &self.gateway_input, Focus::Gateway),
            ("Config URI (start/reboot)", &self.config_uri_input, Focus::ConfigUri),
            ("Checksum (start/reboot)", &self.checksum_input, Focus::Checksum),
        ]
        .into_iter()
        .enumerate()
        {
            let block = field(title, self.focus == focus);
            let inner = block.inner(rows[idx]);
            frame.render_widget(block, rows[idx]);
            frame.render_widget(Paragraph::new(input.value()), inner);
        }
    }

    fn render_commands(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Commands ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focus == Focus::Commands {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let items: Vec<ListItem> = COMMAND_LABELS
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                let style = if idx == self.selected_command {
                    theme::list_selected()
                } else {
                    theme::list_row()
                };
                ListItem::new(Line::from(Span::styled(format!(" {label}"), style)))
            })
            .collect();
        frame.render_widget(List::new(items), inner);
    }

    fn render_log(&self, frame: &mut Frame, area: Rect) {
        let title = if self.busy { " Log (waiting…) " } else { " Log " };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let visible = usize::from(inner.height);
        let lines: Vec<Line> = self
            .log
            .iter()
            .rev()
            .take(visible)
            .rev()
            .map(|entry| {
                let style = if entry.is_error {
                    theme::field_error()
                } else {
                    theme::list_row()
                };
                Line::from(vec![
                    Span::styled(
                        entry.time.format("%H:%M:%S ").to_string(),
                        theme::key_hint(),
                    ),
                    Span::styled(entry.text.clone(), style),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for GatewayScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let input = match self.focus {
            Focus::Commands => {
                match key.code {
                    KeyCode::Char('e') => self.focus = Focus::Gateway,
                    KeyCode::Down | KeyCode::Char('j') => {
                        self.selected_command =
                            (self.selected_command + 1).min(COMMAND_LABELS.len() - 1);
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        self.selected_command = self.selected_command.saturating_sub(1);
                    }
                    KeyCode::Enter => return Ok(self.dispatch()),
                    _ => {}
                }
                return Ok(None);
            }
            Focus::Gateway => &mut self.gateway_input,
            Focus::ConfigUri => &mut self.config_uri_input,
            Focus::Checksum => &mut self.checksum_input,
        };

        match key.code {
            KeyCode::Esc => self.focus = Focus::Commands,
            // Enter moves through the fields and back to the menu.
            KeyCode::Enter | KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Gateway => Focus::ConfigUri,
                    Focus::ConfigUri => Focus::Checksum,
                    _ => Focus::Commands,
                };
            }
            _ => edit::apply_key(input, key),
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::RemoteCompleted(outcome) = action {
            self.busy = false;
            match outcome {
                Ok(response) => self.push_log(format!("← {response}"), false),
                Err(e) => self.push_log(format!("✗ {e}"), true),
            }
        }
        Ok(None)
    }

    fn capturing_input(&self) -> bool {
        self.focus != Focus::Commands
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Min(5), Constraint::Length(1)]).split(area);
        let cols =
            Layout::horizontal([Constraint::Length(40), Constraint::Min(30)]).split(rows[0]);

        let left =
            Layout::vertical([Constraint::Length(9), Constraint::Min(5)]).split(cols[0]);
        self.render_fields(frame, left[0]);
        self.render_commands(frame, left[1]);
        self.render_log(frame, cols[1]);

        let mut hints = vec![
            Span::styled(" e ", theme::key_hint_key()),
            Span::styled("edit fields  ", theme::key_hint()),
            Span::styled("j/k ", theme::key_hint_key()),
            Span::styled("command  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("send", theme::key_hint()),
        ];
        if let Some(ref err) = self.input_error {
            hints.push(Span::styled(format!("  {err}"), theme::field_error()));
        }
        frame.render_widget(Paragraph::new(Line::from(hints)), rows[1]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "gateways"
    }
}
