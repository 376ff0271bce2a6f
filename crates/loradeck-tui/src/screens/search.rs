//! Device location screen — uplink snapshot map and per-gateway cards.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Context};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tracing::debug;
use tui_input::Input;

use loradeck_core::model::Eui64;
use loradeck_core::search::{
    FocusPoint, GatewayCard, Palette, RenderOutput, SearchController, SearchPhase, render,
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::edit;
use crate::widgets::fmt::{fmt_coords, fmt_distance, fmt_signal};
use crate::widgets::geo;

/// Which part of the screen owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    DevEui,
    Limit,
    Cards,
}

pub struct SearchScreen {
    focused: bool,
    focus: Focus,
    dev_eui_input: Input,
    limit_input: Input,
    /// Input-stage error (bad EUI or limit), shown until the next submit.
    input_error: Option<String>,
    controller: SearchController,
    palette: Palette,
    focus_point: Option<FocusPoint>,
    default_center: (f64, f64),
    selected_card: usize,
    throbber: ThrobberState,
}

impl SearchScreen {
    pub fn new(default_center: (f64, f64), default_limit: u32) -> Self {
        let mut controller = SearchController::new();
        controller.set_limit_input(default_limit.to_string());
        Self {
            focused: false,
            focus: Focus::DevEui,
            dev_eui_input: Input::default(),
            limit_input: Input::new(default_limit.to_string()),
            input_error: None,
            controller,
            palette: Palette::default(),
            focus_point: None,
            default_center,
            selected_card: 0,
            throbber: ThrobberState::default(),
        }
    }

    /// Validate both fields and hand out a query ticket.
    fn submit(&mut self) -> Option<Action> {
        self.input_error = None;

        let dev_eui = match self.dev_eui_input.value().parse::<Eui64>() {
            Ok(eui) => eui,
            Err(e) => {
                self.input_error = Some(e.to_string());
                return None;
            }
        };

        self.controller.set_limit_input(self.limit_input.value());
        match self.controller.begin_search() {
            Ok(ticket) => {
                debug!(%dev_eui, seq = ticket.seq, limit = ticket.limit, "search submitted");
                Some(Action::RequestSearch {
                    dev_eui,
                    seq: ticket.seq,
                    limit: ticket.limit,
                })
            }
            Err(e) => {
                self.input_error = Some(e.to_string());
                None
            }
        }
    }

    fn render_output(&self) -> RenderOutput {
        render(self.controller.index().active_receptions(), &self.palette)
    }

    fn select_snapshot(&mut self, index: usize) {
        let before = self.controller.index().selected();
        self.controller.index_mut().select(index);
        if self.controller.index().selected() != before {
            self.selected_card = 0;
        }
    }

    /// Center the map on the selected card's gateway, if it has a fix.
    fn recenter_on_selected(&mut self) {
        let output = self.render_output();
        let Some(card) = output.cards.get(self.selected_card) else {
            return;
        };
        if let (Some(location), Some(focus)) = (card.location, self.focus_point.as_mut()) {
            focus.recenter(location);
        }
    }

    fn handle_cards_key(&mut self, key: KeyEvent) -> Option<Action> {
        let card_count = self.render_output().cards.len();
        match key.code {
            KeyCode::Char('e') => self.focus = Focus::DevEui,
            KeyCode::Char('l') => self.focus = Focus::Limit,
            KeyCode::Enter => return self.submit(),
            KeyCode::Down | KeyCode::Char('j') => {
                if card_count > 0 {
                    self.selected_card = (self.selected_card + 1).min(card_count - 1);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Left => {
                let selected = self.controller.index().selected();
                self.select_snapshot(selected.saturating_sub(1));
            }
            KeyCode::Right => {
                let selected = self.controller.index().selected();
                self.select_snapshot(selected + 1);
            }
            KeyCode::Char('f') => self.recenter_on_selected(),
            _ => {}
        }
        None
    }

    fn render_inputs(&self, frame: &mut Frame, area: Rect) {
        let cols = Layout::horizontal([
            Constraint::Min(24),
            Constraint::Length(12),
            Constraint::Min(20),
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

        let eui_block = field("Device EUI", self.focus == Focus::DevEui);
        let eui_inner = eui_block.inner(cols[0]);
        frame.render_widget(eui_block, cols[0]);
        frame.render_widget(Paragraph::new(self.dev_eui_input.value()), eui_inner);

        let limit_block = field("Limit", self.focus == Focus::Limit);
        let limit_inner = limit_block.inner(cols[1]);
        frame.render_widget(limit_block, cols[1]);
        frame.render_widget(Paragraph::new(self.limit_input.value()), limit_inner);

        // Phase / error indicator in the remaining column.
        let status: Line = if let Some(ref err) = self.input_error {
            Line::from(Span::styled(err.clone(), theme::field_error()))
        } else if let Some(err) = self.controller.error() {
            Line::from(Span::styled(err.to_owned(), theme::field_error()))
        } else {
            match self.controller.phase() {
                SearchPhase::Idle => Line::from(Span::styled(
                    "Enter a device EUI and press Enter",
                    theme::key_hint(),
                )),
                SearchPhase::Loading => Line::from(Span::styled(
                    "Searching…",
                    Style::default().fg(theme::ACCENT_AMBER),
                )),
                SearchPhase::Loaded => {
                    let n = self.controller.index().len();
                    Line::from(Span::styled(
                        format!("{n} snapshot{}", if n == 1 { "" } else { "s" }),
                        Style::default().fg(theme::SUCCESS_GREEN),
                    ))
                }
            }
        };
        let status_area = Rect {
            x: cols[2].x + 1,
            y: cols[2].y + 1,
            width: cols[2].width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(status).wrap(Wrap { trim: true }), status_area);

        if self.controller.phase() == SearchPhase::Loading {
            let throbber = Throbber::default()
                .throbber_style(Style::default().fg(theme::ACCENT_AMBER));
            let spinner_area = Rect {
                x: cols[2].x,
                y: cols[2].y + 1,
                width: 1,
                height: 1,
            };
            let mut state = self.throbber.clone();
            frame.render_stateful_widget(throbber, spinner_area, &mut state);
        }
    }

    fn render_snapshot_tabs(&self, frame: &mut Frame, area: Rect) {
        let labels = self.controller.index().labels();
        if labels.is_empty() {
            return;
        }
        let titles: Vec<Line> = labels
            .iter()
            .map(|l| Line::from(format!(" {} ", l.label)))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.controller.index().selected())
            .style(theme::tab_inactive())
            .highlight_style(theme::tab_active())
            .divider(Span::styled("│", theme::key_hint()));
        frame.render_widget(tabs, area);
    }

    fn render_map(&self, frame: &mut Frame, area: Rect, output: &RenderOutput) {
        let block = Block::default()
            .title(" Map ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if output.is_empty() {
            let placeholder = match self.controller.phase() {
                SearchPhase::Loading => "Searching…",
                _ => "No uplink snapshots loaded",
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(placeholder, theme::key_hint())))
                    .centered(),
                inner,
            );
            return;
        }

        let focus = self.focus_point.unwrap_or(FocusPoint {
            latitude: self.default_center.0,
            longitude: self.default_center.1,
        });
        let bounds = geo::map_bounds(focus, &output.overlays);

        let canvas = Canvas::default()
            .x_bounds(bounds.x)
            .y_bounds(bounds.y)
            .paint(|ctx: &mut Context<'_>| {
                for overlay in &output.overlays {
                    let color = theme::gateway_color(overlay.color);
                    ctx.draw(&Circle {
                        x: overlay.location.longitude,
                        y: overlay.location.latitude,
                        radius: geo::meters_to_lat_degrees(overlay.radius_m),
                        color,
                    });
                    ctx.print(
                        overlay.location.longitude,
                        overlay.location.latitude,
                        Span::styled(overlay.label.clone(), Style::default().fg(color)),
                    );
                }
            });
        frame.render_widget(canvas, inner);
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect, output: &RenderOutput) {
        let block = Block::default()
            .title(" Gateways ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focus == Focus::Cards {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if output.cards.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled("No receptions", theme::key_hint()))),
                inner,
            );
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        for (idx, card) in output.cards.iter().enumerate() {
            lines.extend(card_lines(card, idx == self.selected_card));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Three display lines per gateway card.
fn card_lines(card: &GatewayCard, selected: bool) -> Vec<Line<'static>> {
    let color = theme::gateway_color(card.color);
    let name_style = if selected {
        theme::list_selected()
    } else {
        theme::list_row()
    };

    let header = Line::from(vec![
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(card.gateway_id.clone(), name_style),
    ]);
    let signal = Line::from(vec![
        Span::raw("  "),
        Span::styled(
            fmt_signal(card.signal.rssi, card.signal.snr),
            theme::list_row(),
        ),
        Span::styled(
            format!("  ~{}", fmt_distance(card.distance_m)),
            theme::key_hint(),
        ),
    ]);
    let location = match card.location {
        Some(loc) => Line::from(vec![
            Span::raw("  "),
            Span::styled(fmt_coords(loc.latitude, loc.longitude), theme::key_hint()),
        ]),
        None => Line::from(vec![
            Span::raw("  "),
            Span::styled("No location detected", theme::field_error()),
        ]),
    };
    vec![header, signal, location]
}

impl Component for SearchScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.focus {
            Focus::DevEui => match key.code {
                KeyCode::Esc => self.focus = Focus::Cards,
                KeyCode::Tab => self.focus = Focus::Limit,
                KeyCode::Enter => return Ok(self.submit()),
                _ => edit::apply_key(&mut self.dev_eui_input, key),
            },
            Focus::Limit => match key.code {
                KeyCode::Esc => self.focus = Focus::Cards,
                KeyCode::Tab => self.focus = Focus::DevEui,
                KeyCode::Enter => return Ok(self.submit()),
                _ => edit::apply_key(&mut self.limit_input, key),
            },
            Focus::Cards => return Ok(self.handle_cards_key(key)),
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SearchCompleted { seq, outcome } => {
                // A discarded stale outcome must not touch the view.
                let applied = self.controller.complete(*seq, outcome.clone());
                if applied && self.controller.phase() == SearchPhase::Loaded {
                    self.focus_point = Some(FocusPoint::initial(
                        self.controller.index().series(),
                        self.default_center,
                    ));
                    self.selected_card = 0;
                    self.focus = Focus::Cards;
                }
            }
            Action::Tick => {
                if self.controller.phase() == SearchPhase::Loading {
                    self.throbber.calc_next();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn capturing_input(&self) -> bool {
        matches!(self.focus, Focus::DevEui | Focus::Limit)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(3), // inputs
            Constraint::Length(1), // snapshot tabs
            Constraint::Min(5),    // map + cards
            Constraint::Length(1), // hints
        ])
        .split(area);

        self.render_inputs(frame, rows[0]);
        self.render_snapshot_tabs(frame, rows[1]);

        let output = self.render_output();
        let cols =
            Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)])
                .split(rows[2]);
        self.render_map(frame, cols[0], &output);
        self.render_cards(frame, cols[1], &output);

        let hints = Line::from(vec![
            Span::styled(" e ", theme::key_hint_key()),
            Span::styled("EUI  ", theme::key_hint()),
            Span::styled("l ", theme::key_hint_key()),
            Span::styled("limit  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
            Span::styled("←→ ", theme::key_hint_key()),
            Span::styled("snapshot  ", theme::key_hint()),
            Span::styled("j/k ", theme::key_hint_key()),
            Span::styled("gateway  ", theme::key_hint()),
            Span::styled("f ", theme::key_hint_key()),
            Span::styled("find on map", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), rows[3]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "search"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use loradeck_core::CoreError;
    use loradeck_core::model::{GeoPoint, ReceptionRecord, Signal, Snapshot, SnapshotSeries};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_str(screen: &mut SearchScreen, s: &str) {
        for c in s.chars() {
            screen.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn located(gw: &str, lat: f64, lon: f64) -> ReceptionRecord {
        ReceptionRecord {
            gateway_id: gw.into(),
            signal: Signal::default(),
            location: Some(GeoPoint {
                latitude: lat,
                longitude: lon,
                altitude: 0.0,
            }),
            distance_m: 100.0,
        }
    }

    fn two_gateway_series(lat: f64, lon: f64) -> SnapshotSeries {
        SnapshotSeries::new(vec![Snapshot {
            time: chrono::Utc::now(),
            receptions: vec![located("gw-a", lat, lon), located("gw-b", lat + 0.1, lon)],
        }])
    }

    fn submit(screen: &mut SearchScreen) -> u64 {
        let Some(Action::RequestSearch { seq, .. }) =
            screen.handle_key_event(key(KeyCode::Enter)).unwrap()
        else {
            panic!("expected RequestSearch");
        };
        seq
    }

    #[test]
    fn submit_with_bad_eui_stays_idle() {
        let mut screen = SearchScreen::new((52.0, 4.9), 5);
        type_str(&mut screen, "not-an-eui");
        let action = screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(action.is_none());
        assert!(screen.input_error.is_some());
        assert_eq!(screen.controller.phase(), SearchPhase::Idle);
    }

    #[test]
    fn submit_dispatches_request_with_entered_limit() {
        let mut screen = SearchScreen::new((52.0, 4.9), 5);
        type_str(&mut screen, "a84041ffff1f2e3d");
        screen.handle_key_event(key(KeyCode::Tab)).unwrap();
        // Replace the pre-filled limit.
        screen.limit_input = Input::new("20".into());

        let action = screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        match action {
            Some(Action::RequestSearch { dev_eui, limit, .. }) => {
                assert_eq!(dev_eui.as_str(), "a84041ffff1f2e3d");
                assert_eq!(limit, 20);
            }
            other => panic!("expected RequestSearch, got {other:?}"),
        }
        assert_eq!(screen.controller.phase(), SearchPhase::Loading);
        // The entered limit is still in the field.
        assert_eq!(screen.limit_input.value(), "20");
    }

    #[test]
    fn completion_sets_focus_point_from_series() {
        let mut screen = SearchScreen::new((40.0, -3.7), 5);
        type_str(&mut screen, "a84041ffff1f2e3d");
        let action = screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        let Some(Action::RequestSearch { seq, .. }) = action else {
            panic!("expected RequestSearch");
        };

        let series = SnapshotSeries::new(vec![Snapshot {
            time: chrono::Utc::now(),
            receptions: vec![],
        }]);
        screen
            .update(&Action::SearchCompleted {
                seq,
                outcome: Ok(series),
            })
            .unwrap();

        assert_eq!(screen.controller.phase(), SearchPhase::Loaded);
        let focus = screen.focus_point.unwrap();
        // No located reception → configured default center.
        assert!((focus.latitude - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn failure_surfaces_error_and_returns_to_idle() {
        let mut screen = SearchScreen::new((52.0, 4.9), 5);
        type_str(&mut screen, "a84041ffff1f2e3d");
        let Some(Action::RequestSearch { seq, .. }) =
            screen.handle_key_event(key(KeyCode::Enter)).unwrap()
        else {
            panic!("expected RequestSearch");
        };

        screen
            .update(&Action::SearchCompleted {
                seq,
                outcome: Err(CoreError::ConnectionFailed {
                    reason: "refused".into(),
                }),
            })
            .unwrap();

        assert_eq!(screen.controller.phase(), SearchPhase::Idle);
        assert!(screen.controller.error().unwrap().contains("refused"));
    }

    #[test]
    fn stale_completion_leaves_view_state_alone() {
        let mut screen = SearchScreen::new((52.0, 4.9), 5);
        type_str(&mut screen, "a84041ffff1f2e3d");
        let first = submit(&mut screen);
        let second = submit(&mut screen);

        screen
            .update(&Action::SearchCompleted {
                seq: second,
                outcome: Ok(two_gateway_series(52.0, 4.9)),
            })
            .unwrap();
        assert_eq!(screen.controller.phase(), SearchPhase::Loaded);

        // Operator picks the second gateway and re-centers on it.
        screen.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        screen.handle_key_event(key(KeyCode::Char('f'))).unwrap();
        assert_eq!(screen.selected_card, 1);
        let focus = screen.focus_point.unwrap();
        assert!((focus.latitude - 52.1).abs() < f64::EPSILON);

        // The superseded first query finally answers, far away.
        screen
            .update(&Action::SearchCompleted {
                seq: first,
                outcome: Ok(two_gateway_series(10.0, 20.0)),
            })
            .unwrap();

        let focus = screen.focus_point.unwrap();
        assert!((focus.latitude - 52.1).abs() < f64::EPSILON);
        assert_eq!(screen.selected_card, 1);
        assert_eq!(
            screen.controller.index().active_receptions()[0].gateway_id,
            "gw-a"
        );
    }

    #[test]
    fn out_of_range_snapshot_arrow_keeps_card_selection() {
        let mut screen = SearchScreen::new((52.0, 4.9), 5);
        type_str(&mut screen, "a84041ffff1f2e3d");
        let seq = submit(&mut screen);
        screen
            .update(&Action::SearchCompleted {
                seq,
                outcome: Ok(two_gateway_series(52.0, 4.9)),
            })
            .unwrap();

        screen.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(screen.selected_card, 1);

        // Only one snapshot: both arrows leave the selection as-is.
        screen.handle_key_event(key(KeyCode::Right)).unwrap();
        assert_eq!(screen.selected_card, 1);
        screen.handle_key_event(key(KeyCode::Left)).unwrap();
        assert_eq!(screen.selected_card, 1);
    }
}
