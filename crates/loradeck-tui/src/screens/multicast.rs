//! Multicast-group form screen.
//!
//! The form edits a raw string draft; validation happens in one step on
//! submit and failures are pinned to their fields. The region selector
//! is populated from the server's enabled region configurations.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};
use tui_input::Input;

use loradeck_core::model::{
    ClassCSchedulingType, FieldError, MulticastGroupDraft, MulticastGroupType, Region,
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::edit;

/// One form row. Order here is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldId {
    Application,
    Name,
    McAddr,
    NwkKey,
    AppKey,
    FCnt,
    Dr,
    Frequency,
    Region,
    GroupType,
    PingSlot,
    Scheduling,
}

impl FieldId {
    fn label(self) -> &'static str {
        match self {
            Self::Application => "Application ID",
            Self::Name => "Name",
            Self::McAddr => "Multicast address",
            Self::NwkKey => "Network session key",
            Self::AppKey => "Application session key",
            Self::FCnt => "Frame counter",
            Self::Dr => "Data rate (0-15)",
            Self::Frequency => "Frequency (Hz)",
            Self::Region => "Region",
            Self::GroupType => "Group type",
            Self::PingSlot => "Ping-slot periodicity",
            Self::Scheduling => "Class-C scheduling",
        }
    }

    /// Key into [`FieldError::field`] for error placement.
    fn error_key(self) -> &'static str {
        match self {
            Self::Application => "application_id",
            Self::Name => "name",
            Self::McAddr => "mc_addr",
            Self::NwkKey => "mc_nwk_s_key",
            Self::AppKey => "mc_app_s_key",
            Self::FCnt => "f_cnt",
            Self::Dr => "dr",
            Self::Frequency => "frequency_hz",
            Self::Region => "region",
            Self::GroupType => "group_type",
            Self::PingSlot => "class_b_ping_slot_period",
            Self::Scheduling => "class_c_scheduling_type",
        }
    }

    fn is_selector(self) -> bool {
        matches!(self, Self::Region | Self::GroupType | Self::Scheduling)
    }
}

pub struct MulticastScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    inputs: Vec<(FieldId, Input)>,
    /// Regions enabled on the server: display label plus parsed value.
    regions: Vec<(String, Region)>,
    region_idx: usize,
    group_type: MulticastGroupType,
    scheduling: ClassCSchedulingType,
    selected: usize,
    editing: bool,
    errors: Vec<FieldError>,
    status: Option<(String, bool)>,
    busy: bool,
    /// Set after the first successful create; later submits update.
    saved_id: Option<String>,
}

impl MulticastScreen {
    pub fn new() -> Self {
        let inputs = [
            FieldId::Application,
            FieldId::Name,
            FieldId::McAddr,
            FieldId::NwkKey,
            FieldId::AppKey,
            FieldId::FCnt,
            FieldId::Dr,
            FieldId::Frequency,
            FieldId::PingSlot,
        ]
        .into_iter()
        .map(|id| (id, Input::default()))
        .collect();

        Self {
            focused: false,
            action_tx: None,
            inputs,
            regions: Vec::new(),
            region_idx: 0,
            group_type: MulticastGroupType::ClassC,
            scheduling: ClassCSchedulingType::Delay,
            selected: 0,
            editing: false,
            errors: Vec::new(),
            status: None,
            busy: false,
            saved_id: None,
        }
    }

    /// Rows currently on the form. The ping-slot row only exists for
    /// Class-B groups; the scheduling row only for Class-C.
    fn visible_fields(&self) -> Vec<FieldId> {
        let mut fields = vec![
            FieldId::Application,
            FieldId::Name,
            FieldId::McAddr,
            FieldId::NwkKey,
            FieldId::AppKey,
            FieldId::FCnt,
            FieldId::Dr,
            FieldId::Frequency,
            FieldId::Region,
            FieldId::GroupType,
        ];
        match self.group_type {
            MulticastGroupType::ClassB => fields.push(FieldId::PingSlot),
            MulticastGroupType::ClassC => fields.push(FieldId::Scheduling),
        }
        fields
    }

    fn selected_field(&self) -> FieldId {
        let fields = self.visible_fields();
        fields[self.selected.min(fields.len() - 1)]
    }

    fn input_value(&self, id: FieldId) -> String {
        self.inputs
            .iter()
            .find(|(fid, _)| *fid == id)
            .map(|(_, input)| input.value().to_owned())
            .unwrap_or_default()
    }

    fn input_mut(&mut self, id: FieldId) -> Option<&mut Input> {
        self.inputs
            .iter_mut()
            .find(|(fid, _)| *fid == id)
            .map(|(_, input)| input)
    }

    fn cycle_selector(&mut self, id: FieldId, forward: bool) {
        match id {
            FieldId::Region => {
                if self.regions.is_empty() {
                    return;
                }
                let len = self.regions.len();
                self.region_idx = if forward {
                    (self.region_idx + 1) % len
                } else {
                    (self.region_idx + len - 1) % len
                };
            }
            FieldId::GroupType => {
                self.group_type = match self.group_type {
                    MulticastGroupType::ClassB => MulticastGroupType::ClassC,
                    MulticastGroupType::ClassC => MulticastGroupType::ClassB,
                };
                // The conditional row swap can shrink the field list.
                self.selected = self.selected.min(self.visible_fields().len() - 1);
            }
            FieldId::Scheduling => {
                self.scheduling = match self.scheduling {
                    ClassCSchedulingType::Delay => ClassCSchedulingType::GpsTime,
                    ClassCSchedulingType::GpsTime => ClassCSchedulingType::Delay,
                };
            }
            _ => {}
        }
    }

    fn draft(&self) -> MulticastGroupDraft {
        MulticastGroupDraft {
            id: self.saved_id.clone(),
            application_id: self.input_value(FieldId::Application),
            name: self.input_value(FieldId::Name),
            mc_addr: self.input_value(FieldId::McAddr),
            mc_nwk_s_key: self.input_value(FieldId::NwkKey),
            mc_app_s_key: self.input_value(FieldId::AppKey),
            f_cnt: self.input_value(FieldId::FCnt),
            dr: self.input_value(FieldId::Dr),
            frequency_hz: self.input_value(FieldId::Frequency),
            region: self.regions.get(self.region_idx).map(|(_, r)| *r),
            group_type: Some(self.group_type),
            class_b_ping_slot_period: self.input_value(FieldId::PingSlot),
            class_c_scheduling_type: Some(self.scheduling),
        }
    }

    fn submit(&mut self) -> Option<Action> {
        if self.busy {
            return None;
        }
        self.status = None;
        match self.draft().build() {
            Ok(group) => {
                debug!(name = %group.name, "multicast form validated");
                self.errors.clear();
                self.busy = true;
                Some(Action::RequestSaveMulticast(group))
            }
            Err(errors) => {
                debug!(count = errors.len(), "multicast form invalid");
                self.errors = errors;
                None
            }
        }
    }

    fn error_for(&self, id: FieldId) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == id.error_key())
    }

    fn field_display(&self, id: FieldId) -> String {
        match id {
            FieldId::Region => self.regions.get(self.region_idx).map_or_else(
                || "(loading regions…)".to_owned(),
                |(label, _)| format!("◂ {label} ▸"),
            ),
            FieldId::GroupType => format!("◂ {} ▸", self.group_type),
            FieldId::Scheduling => format!("◂ {} ▸", self.scheduling),
            other => self.input_value(other),
        }
    }
}

impl Component for MulticastScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        // Region options come from the server; fetch them once on mount.
        action_tx.send(Action::RequestRegions)?;
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let field = self.selected_field();

        if self.editing {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.editing = false,
                _ => {
                    if let Some(input) = self.input_mut(field) {
                        edit::apply_key(input, key);
                    }
                }
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(self.visible_fields().len() - 1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Left | KeyCode::Char('h') => self.cycle_selector(field, false),
            KeyCode::Right | KeyCode::Char('l') => self.cycle_selector(field, true),
            KeyCode::Enter => {
                if !field.is_selector() {
                    self.editing = true;
                }
            }
            KeyCode::Char('s') => return Ok(self.submit()),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::RegionsLoaded(Ok(items)) => {
                self.regions = items
                    .iter()
                    .filter_map(|item| match item.region.parse::<Region>() {
                        Ok(region) => {
                            let label = if item.description.is_empty() {
                                item.region.clone()
                            } else {
                                format!("{} ({})", item.region, item.description)
                            };
                            Some((label, region))
                        }
                        Err(_) => {
                            warn!(region = %item.region, "skipping unknown region");
                            None
                        }
                    })
                    .collect();
                self.region_idx = 0;
            }
            Action::RegionsLoaded(Err(e)) => {
                self.status = Some((format!("failed to load regions: {e}"), true));
            }
            Action::MulticastSaved(Ok(id)) => {
                self.busy = false;
                self.status = Some((format!("saved multicast group {id}"), false));
                self.saved_id = Some(id.clone());
            }
            Action::MulticastSaved(Err(e)) => {
                self.busy = false;
                self.status = Some((e.to_string(), true));
            }
            _ => {}
        }
        Ok(None)
    }

    fn capturing_input(&self) -> bool {
        self.editing
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = match self.saved_id {
            Some(_) => " Multicast Group (editing) ",
            None => " New Multicast Group ",
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let fields = self.visible_fields();
        let mut lines: Vec<Line> = Vec::new();
        for (idx, field) in fields.iter().enumerate() {
            let selected = idx == self.selected;
            let label_style = if selected {
                theme::list_selected()
            } else {
                theme::field_label()
            };
            let marker = if selected && self.editing { "✎ " } else { "  " };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{:<24}", field.label()), label_style),
                Span::styled(self.field_display(*field), theme::list_row()),
            ]));
            if let Some(err) = self.error_for(*field) {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(err.message.clone(), theme::field_error()),
                ]));
            }
        }

        lines.push(Line::from(""));
        if let Some((ref message, is_error)) = self.status {
            let style = if is_error {
                theme::field_error()
            } else {
                Style::default().fg(theme::SUCCESS_GREEN)
            };
            lines.push(Line::from(Span::styled(message.clone(), style)));
        } else if self.busy {
            lines.push(Line::from(Span::styled(
                "Saving…",
                Style::default().fg(theme::ACCENT_AMBER),
            )));
        }

        let rows =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(inner);
        frame.render_widget(Paragraph::new(lines), rows[0]);

        let hints = Line::from(vec![
            Span::styled(" j/k ", theme::key_hint_key()),
            Span::styled("field  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("edit  ", theme::key_hint()),
            Span::styled("←→ ", theme::key_hint_key()),
            Span::styled("choose  ", theme::key_hint()),
            Span::styled("s ", theme::key_hint_key()),
            Span::styled("save", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), rows[1]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "multicast"
    }
}
