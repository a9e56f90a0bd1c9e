use crate::calc::{validate, HolidayCalendar, ValidationRules};
use crate::cmd::request::submit;
use crate::cmd::requests::cancel_request;
use crate::data::{
    AppSettings, Holiday, LeaveBalance, LeaveCategory, LeaveRequestData, LeaveRequestDraft,
    LeaveType,
};
use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::collections::HashSet;
use std::io::Stdout;
use std::time::Duration as StdDuration;

// Highlight for the range being selected
const RANGE_COLOR: Color = Color::Indexed(208);

const SECTION_BG: Color = Color::Rgb(40, 44, 52);

#[derive(Debug, PartialEq)]
enum Mode {
    Normal,
    /// A range passed validation; collecting notes before booking it.
    Notes { start: NaiveDate, end: NaiveDate, days: u32 },
}

#[derive(Debug, PartialEq, Default)]
enum ViewState {
    #[default]
    Calendar,
    Requests,
    Holidays,
}

pub struct App<'a> {
    requests: &'a mut LeaveRequestData,
    balance: &'a mut LeaveBalance,
    settings: AppSettings,
    rules: ValidationRules,
    /// Custom and feed holidays, merged into every rebuilt calendar.
    external: Vec<Holiday>,
    calendar: HolidayCalendar,
    calendar_year: i32,
    today: NaiveDate,
    selected_date: NaiveDate,
    /// First day of the range being selected.
    anchor: Option<NaiveDate>,
    leave_type: LeaveType,
    category: LeaveCategory,
    mode: Mode,
    input_buffer: String,
    /// Last outcome shown to the user (message, color). Cleared on next keypress.
    status: Option<(String, Color)>,
    view_state: ViewState,
    list_cursor: usize,
}

impl<'a> App<'a> {
    pub fn new(
        requests: &'a mut LeaveRequestData,
        balance: &'a mut LeaveBalance,
        settings: AppSettings,
        rules: ValidationRules,
        external: Vec<Holiday>,
        today: NaiveDate,
    ) -> Self {
        let calendar = build_year_calendar(today.year(), &settings, &external);
        App {
            requests,
            balance,
            settings,
            rules,
            external,
            calendar,
            calendar_year: today.year(),
            today,
            selected_date: today,
            anchor: None,
            leave_type: LeaveType::default(),
            category: LeaveCategory::default(),
            mode: Mode::Normal,
            input_buffer: String::new(),
            status: None,
            view_state: ViewState::Calendar,
            list_cursor: 0,
        }
    }

    fn move_selection(&mut self, date: NaiveDate) {
        self.selected_date = date;
        if date.year() != self.calendar_year {
            self.calendar_year = date.year();
            self.calendar = build_year_calendar(date.year(), &self.settings, &self.external);
        }
    }

    /// Called when the second end of a range is marked. Runs the validator
    /// and either reports the rejection or asks for notes.
    fn on_range_selected(&mut self, start: NaiveDate, end: NaiveDate) {
        let draft = self.draft(start, end);
        let holidays = self.holidays_for(start, end);
        match validate(
            &draft,
            &self.requests.requests,
            self.balance,
            &holidays,
            &self.rules,
            self.today,
        ) {
            Ok(accepted) => {
                self.mode = Mode::Notes {
                    start: accepted.start_date,
                    end: accepted.end_date,
                    days: accepted.working_days,
                };
                self.input_buffer.clear();
            }
            Err(rejection) => {
                self.status = Some((format!("Rejected: {rejection}"), Color::Red));
            }
        }
    }

    fn book(&mut self, start: NaiveDate, end: NaiveDate) {
        let mut draft = self.draft(start, end);
        draft.notes = Some(self.input_buffer.clone());
        let holidays = self.holidays_for(start, end);
        match submit(
            &draft,
            self.requests,
            self.balance,
            &holidays,
            &self.rules,
            self.today,
        ) {
            Ok(request) => {
                self.status = Some((
                    format!(
                        "Booked {} day(s) of {} leave, {} remaining",
                        request.working_days,
                        request.leave_type,
                        self.balance.remaining()
                    ),
                    Color::Green,
                ));
            }
            Err(rejection) => {
                self.status = Some((format!("Rejected: {rejection}"), Color::Red));
            }
        }
    }

    fn draft(&self, start: NaiveDate, end: NaiveDate) -> LeaveRequestDraft {
        LeaveRequestDraft {
            leave_type: self.leave_type,
            category: self.category,
            department: self.settings.default_department.clone(),
            ..LeaveRequestDraft::new(Some(start), Some(end))
        }
    }

    /// Holiday dates for a range that may leave the currently viewed year.
    fn holidays_for(&self, start: NaiveDate, end: NaiveDate) -> HashSet<NaiveDate> {
        HolidayCalendar::covering(start.min(end), start.max(end), self.settings.region)
            .with_external(self.external.iter().cloned())
            .day_off_dates()
    }

    /// Returns true when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            return true;
        }

        match self.view_state {
            ViewState::Requests => return self.handle_requests_key(code),
            ViewState::Holidays => return self.handle_holidays_key(code),
            ViewState::Calendar => {}
        }

        self.status = None;

        if let Mode::Notes { start, end, .. } = self.mode {
            match code {
                KeyCode::Enter => {
                    self.book(start, end);
                    self.input_buffer.clear();
                    self.anchor = None;
                    self.mode = Mode::Normal;
                }
                KeyCode::Esc => {
                    self.input_buffer.clear();
                    self.anchor = None;
                    self.mode = Mode::Normal;
                }
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Char(c) => {
                    self.input_buffer.push(c);
                }
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Left => self.move_selection(self.selected_date - Duration::days(1)),
            KeyCode::Right => self.move_selection(self.selected_date + Duration::days(1)),
            KeyCode::Up => self.move_selection(self.selected_date - Duration::days(7)),
            KeyCode::Down => self.move_selection(self.selected_date + Duration::days(7)),
            KeyCode::Char('n') => self.move_selection(add_months(self.selected_date, 1)),
            KeyCode::Char('p') => self.move_selection(add_months(self.selected_date, -1)),
            KeyCode::Char('T') => self.move_selection(self.today),
            KeyCode::Char('t') => self.leave_type = self.leave_type.next(),
            KeyCode::Char('c') => self.category = self.category.next(),
            KeyCode::Char(' ') | KeyCode::Enter => match self.anchor.take() {
                None => self.anchor = Some(self.selected_date),
                Some(start) => self.on_range_selected(start, self.selected_date),
            },
            KeyCode::Esc => self.anchor = None,
            KeyCode::Tab => {
                self.view_state = ViewState::Requests;
                self.list_cursor = 0;
            }
            _ => {}
        }
        false
    }

    fn handle_requests_key(&mut self, code: KeyCode) -> bool {
        let len = self.requests.requests.len();
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => self.list_cursor = self.list_cursor.saturating_sub(1),
            KeyCode::Down => {
                if len > 0 && self.list_cursor < len - 1 {
                    self.list_cursor += 1;
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.requests.requests.get(self.list_cursor).map(|r| r.id.clone()) {
                    match cancel_request(self.requests, self.balance, &id) {
                        Ok(removed) => {
                            self.status = Some((
                                format!("Cancelled, {} day(s) returned", removed.working_days),
                                Color::Yellow,
                            ));
                        }
                        Err(e) => self.status = Some((e.to_string(), Color::Red)),
                    }
                    let new_len = self.requests.requests.len();
                    if self.list_cursor > 0 && self.list_cursor >= new_len {
                        self.list_cursor -= 1;
                    }
                }
            }
            KeyCode::Tab => {
                self.view_state = ViewState::Holidays;
                self.list_cursor = 0;
            }
            KeyCode::Esc => self.view_state = ViewState::Calendar,
            _ => {}
        }
        false
    }

    fn handle_holidays_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => self.list_cursor = self.list_cursor.saturating_sub(1),
            KeyCode::Down => {
                let year = self.calendar_year;
                let count = self.calendar.holidays().iter().filter(|h| h.date.year() == year).count();
                if self.list_cursor + 1 < count {
                    self.list_cursor += 1;
                }
            }
            KeyCode::Tab | KeyCode::Esc => self.view_state = ViewState::Calendar,
            _ => {}
        }
        false
    }

    pub fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        match self.view_state {
            ViewState::Requests => self.render_requests_view(f, area),
            ViewState::Holidays => self.render_holiday_view(f, area),
            ViewState::Calendar => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(9),  // three months, max 8 rows + 1 padding
                        Constraint::Length(11), // selection + balance table
                        Constraint::Min(6),     // day details + help
                    ])
                    .split(area);
                self.render_calendar(f, chunks[0]);
                self.render_summary(f, chunks[1]);
                self.render_details_and_help(f, chunks[2]);
            }
        }
    }

    fn selection_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self.mode {
            Mode::Notes { start, end, .. } => Some((start, end)),
            Mode::Normal => self.anchor.map(|a| {
                (a.min(self.selected_date), a.max(self.selected_date))
            }),
        }
    }

    fn render_calendar(&self, f: &mut Frame, area: Rect) {
        const MONTH_WIDTH: u16 = 21;
        const GAP_WIDTH: u16 = 4;
        let month_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(MONTH_WIDTH),
                Constraint::Length(GAP_WIDTH),
                Constraint::Length(MONTH_WIDTH),
                Constraint::Length(GAP_WIDTH),
                Constraint::Length(MONTH_WIDTH),
                Constraint::Min(0),
            ])
            .split(area);
        let month_rects = [month_chunks[0], month_chunks[2], month_chunks[4]];
        let range = self.selection_range();

        for (i, rect) in month_rects.iter().enumerate() {
            let month_date = add_months(self.selected_date, i as i32);
            let year = month_date.year();
            let month = month_date.month();
            let Some(first_of_month) = NaiveDate::from_ymd_opt(year, month, 1) else {
                continue;
            };
            let mut lines: Vec<Line> = vec![
                Line::from(Span::styled(
                    format!("{:^21}", format!("{} {}", month_name(month), year)),
                    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                )),
                Line::from("Su Mo Tu We Th Fr Sa"),
            ];

            let days = days_in_month(year, month);
            let start_dow = first_of_month.weekday().num_days_from_sunday() as usize;
            let mut day = 1u32;
            for row in 0..6 {
                if day > days {
                    break;
                }
                let mut spans = Vec::new();
                for col in 0..7usize {
                    if (row == 0 && col < start_dow) || day > days {
                        spans.push(Span::raw("   "));
                        continue;
                    }
                    let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                        break;
                    };
                    let leave = self.requests.on_date(date).first().map(|r| r.leave_type);
                    let style = calendar_day_style(
                        date == self.selected_date,
                        range.is_some_and(|(s, e)| s <= date && date <= e),
                        leave,
                        self.calendar.is_holiday(date),
                        date == self.today,
                        !crate::calc::workday::is_workday(date),
                    );
                    spans.push(Span::styled(format!("{:2}", day), style));
                    spans.push(Span::raw(" "));
                    day += 1;
                }
                lines.push(Line::from(spans));
            }

            let widget = Paragraph::new(lines).block(Block::default().borders(Borders::NONE));
            f.render_widget(widget, *rect);
        }
    }

    fn render_summary(&self, f: &mut Frame, area: Rect) {
        let selection = match (&self.mode, self.anchor) {
            (Mode::Notes { start, end, days }, _) => {
                format!("{} to {} ({} working day(s))", start, end, days)
            }
            (Mode::Normal, Some(a)) => format!("from {} (mark the end date)", a),
            (Mode::Normal, None) => "none".to_string(),
        };
        let rows = vec![
            section_header("Request"),
            data_row("Type", colored(self.leave_type.to_string(), self.leave_type.info().color)),
            data_row("Category", plain(self.category.to_string())),
            data_row("Selection", plain(selection)),
            data_row("Region", plain(self.settings.region.to_string())),
            section_header("Balance"),
            data_row("Allowance", plain(self.balance.total.to_string())),
            data_row("Used", plain(self.balance.used.to_string())),
            data_row("Remaining", colored(self.balance.remaining().to_string(), Color::Green)),
        ];
        let table = Table::new(rows, [Constraint::Length(14), Constraint::Min(20)])
            .block(Block::default().borders(Borders::ALL).title("Leave Planner"));
        f.render_widget(table, area);
    }

    fn render_details_and_help(&self, f: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        let date = self.selected_date;
        lines.push(Line::from(Span::styled(
            date.format("%A %d %B %Y").to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for h in self.calendar.on(date) {
            let suffix = if h.observed { " (observed)" } else { "" };
            lines.push(Line::from(Span::styled(
                format!("  {} [{}]{}", h.name, h.region, suffix),
                Style::default().fg(Color::Green),
            )));
        }
        for r in self.requests.on_date(date) {
            lines.push(Line::from(Span::styled(
                format!("  {} leave, {} ({})", r.leave_type, r.category, r.status),
                Style::default().fg(r.leave_type.info().color),
            )));
        }

        if let Mode::Notes { .. } = self.mode {
            lines.push(Line::from(format!("Notes: {}_", self.input_buffer)));
            lines.push(Line::from("Enter: book   Esc: discard"));
        }
        if let Some((msg, color)) = &self.status {
            lines.push(Line::from(Span::styled(msg.clone(), Style::default().fg(*color))));
        }
        lines.push(Line::from(Span::styled(
            "←→↑↓ move  n/p month  T today  space mark start/end  t type  c category  Tab requests  q quit",
            Style::default().add_modifier(Modifier::DIM),
        )));

        let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, area);
    }

    fn render_requests_view(&self, f: &mut Frame, area: Rect) {
        let header = Row::new(vec!["Type", "Category", "Start", "End", "Days", "Status"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = self
            .requests
            .requests
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let row = Row::new(vec![
                    colored(r.leave_type.to_string(), r.leave_type.info().color),
                    plain(r.category.to_string()),
                    plain(r.start_date.to_string()),
                    plain(r.end_date.to_string()),
                    plain(r.working_days.to_string()),
                    plain(r.status.to_string()),
                ]);
                if i == self.list_cursor {
                    row.style(Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    row
                }
            })
            .collect();
        let title = match &self.status {
            Some((msg, _)) => format!("Requests - {}", msg),
            None => "Requests (↑↓ select, d cancel, Tab holidays, Esc back)".to_string(),
        };
        let table = Table::new(
            rows,
            [
                Constraint::Length(15),
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Length(12),
                Constraint::Length(6),
                Constraint::Min(9),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(table, area);
    }

    fn render_holiday_view(&self, f: &mut Frame, area: Rect) {
        let year = self.calendar_year;
        let rows: Vec<Row> = self
            .calendar
            .holidays()
            .iter()
            .filter(|h| h.date.year() == year)
            .skip(self.list_cursor)
            .map(|h| {
                let name = if h.observed {
                    format!("{} (observed)", h.name)
                } else {
                    h.name.clone()
                };
                Row::new(vec![
                    plain(h.date.format("%Y-%m-%d %a").to_string()),
                    plain(h.region.to_string()),
                    plain(name),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [Constraint::Length(16), Constraint::Length(4), Constraint::Min(20)],
        )
        .header(Row::new(vec!["Date", "", "Name"]).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Holidays {} (↑↓ scroll, Esc back)", year)),
        );
        f.render_widget(table, area);
    }
}

/// Covers `year` and the next, enough for the three months shown from any
/// selected date.
fn build_year_calendar(year: i32, settings: &AppSettings, external: &[Holiday]) -> HolidayCalendar {
    HolidayCalendar::for_years(year, year + 1, settings.region)
        .with_external(external.iter().cloned())
}

fn section_header(title: &str) -> Row<'static> {
    Row::new(vec![
        Cell::from(title.to_string())
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Cell::from(""),
    ])
    .style(Style::default().bg(SECTION_BG))
}

/// A data row with a two-space indent on the label.
fn data_row(label: impl Into<String>, value: Cell<'static>) -> Row<'static> {
    Row::new(vec![Cell::from(format!("  {}", label.into())), value])
}

fn plain(s: impl Into<String>) -> Cell<'static> {
    Cell::from(s.into())
}

fn colored(s: impl Into<String>, color: Color) -> Cell<'static> {
    Cell::from(s.into()).style(Style::default().fg(color))
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}

// ── Calendar helpers ──────────────────────────────────────────────────────────

pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    match (
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
        NaiveDate::from_ymd_opt(year, month, 1),
    ) {
        (Some(next), Some(first)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

pub(crate) fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let new_total = date.month() as i32 - 1 + months;
    let new_month = (new_total.rem_euclid(12) + 1) as u32;
    let new_year = date.year() + new_total.div_euclid(12);
    let new_day = date.day().min(days_in_month(new_year, new_month));
    NaiveDate::from_ymd_opt(new_year, new_month, new_day).unwrap_or(date)
}

/// Determines the ratatui `Style` for a calendar day cell based on its state.
pub(crate) fn calendar_day_style(
    is_selected: bool,
    in_range: bool,
    leave: Option<LeaveType>,
    is_holiday: bool,
    is_today: bool,
    is_weekend: bool,
) -> Style {
    if is_selected {
        let bg = if in_range {
            RANGE_COLOR
        } else if let Some(t) = leave {
            t.info().color
        } else if is_holiday {
            Color::Green
        } else {
            Color::White
        };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else if in_range {
        Style::default().fg(Color::Black).bg(RANGE_COLOR)
    } else if let Some(t) = leave {
        let mut s = Style::default()
            .fg(t.info().color)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        if is_today {
            s = s.add_modifier(Modifier::REVERSED);
        }
        s
    } else if is_holiday {
        let mut s = Style::default().fg(Color::Green);
        if is_today {
            s = s.add_modifier(Modifier::REVERSED);
        }
        s
    } else if is_today {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else if is_weekend {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{LeaveRequest, RegionSelector, RequestStatus};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn settings() -> AppSettings {
        AppSettings {
            region: RegionSelector::Us,
            max_months_ahead: Some(12),
            max_concurrent_requests: Some(2),
            default_department: "Engineering".to_string(),
            ..AppSettings::default()
        }
    }

    fn make_test_app<'a>(
        requests: &'a mut LeaveRequestData,
        balance: &'a mut LeaveBalance,
        today: NaiveDate,
    ) -> App<'a> {
        let settings = settings();
        let rules = settings.rules().unwrap();
        App::new(requests, balance, settings, rules, Vec::new(), today)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(code, KeyModifiers::NONE)
    }

    fn press_n(app: &mut App, code: KeyCode, n: usize) {
        for _ in 0..n {
            press(app, code);
        }
    }

    // ── calendar_day_style tests ──────────────────────────────────────────────

    #[test]
    fn test_style_selected_plain() {
        let s = calendar_day_style(true, false, None, false, false, false);
        assert_eq!(s, Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD));
    }

    #[test]
    fn test_style_selected_in_range() {
        let s = calendar_day_style(true, true, None, false, false, false);
        assert_eq!(s, Style::default().fg(Color::Black).bg(RANGE_COLOR).add_modifier(Modifier::BOLD));
    }

    #[test]
    fn test_style_leave_uses_type_color() {
        let s = calendar_day_style(false, false, Some(LeaveType::Sick), false, false, false);
        assert_eq!(s.fg, Some(LeaveType::Sick.info().color));
    }

    #[test]
    fn test_style_holiday_today() {
        let s = calendar_day_style(false, false, None, true, true, false);
        assert_eq!(s, Style::default().fg(Color::Green).add_modifier(Modifier::REVERSED));
    }

    #[test]
    fn test_style_weekend() {
        let s = calendar_day_style(false, false, None, false, false, true);
        assert_eq!(s, Style::default().add_modifier(Modifier::DIM));
    }

    // ── helpers ───────────────────────────────────────────────────────────────

    #[test]
    fn test_add_months_across_year_and_clamp() {
        assert_eq!(add_months(d(2024, 11, 15), 2), d(2025, 1, 15));
        assert_eq!(add_months(d(2025, 1, 15), -2), d(2024, 11, 15));
        assert_eq!(add_months(d(2024, 1, 31), 1), d(2024, 2, 29));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "Unknown");
    }

    // ── key handling ──────────────────────────────────────────────────────────

    #[test]
    fn test_arrow_keys_move_selected_date() {
        let mut requests = LeaveRequestData::default();
        let mut balance = LeaveBalance::new(25);
        let mut app = make_test_app(&mut requests, &mut balance, d(2024, 6, 17));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.selected_date, d(2024, 6, 18));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_date, d(2024, 6, 25));
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.selected_date, d(2024, 6, 17));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.selected_date, d(2024, 7, 17));
        press(&mut app, KeyCode::Char('T'));
        assert_eq!(app.selected_date, d(2024, 6, 17));
    }

    #[test]
    fn test_crossing_year_rebuilds_calendar() {
        let mut requests = LeaveRequestData::default();
        let mut balance = LeaveBalance::new(25);
        let mut app = make_test_app(&mut requests, &mut balance, d(2024, 12, 31));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.calendar_year, 2025);
        assert!(app.calendar.is_holiday(d(2025, 7, 4)));
    }

    #[test]
    fn test_year_calendar_covers_months_shown_after_december() {
        let mut requests = LeaveRequestData::default();
        let mut balance = LeaveBalance::new(25);
        let app = make_test_app(&mut requests, &mut balance, d(2024, 12, 15));
        assert_eq!(app.calendar_year, 2024);
        // January and February 2025 are drawn next to December 2024.
        assert!(app.calendar.is_holiday(d(2025, 1, 1)));
        assert!(app.calendar.is_holiday(d(2025, 2, 17)));
    }

    #[test]
    fn test_mark_range_then_book() {
        let mut requests = LeaveRequestData::default();
        let mut balance = LeaveBalance::new(25);
        {
            // Monday
            let mut app = make_test_app(&mut requests, &mut balance, d(2024, 6, 17));
            press_n(&mut app, KeyCode::Down, 2); // 2024-07-01
            press(&mut app, KeyCode::Char(' '));
            assert_eq!(app.anchor, Some(d(2024, 7, 1)));
            press_n(&mut app, KeyCode::Right, 4); // 2024-07-05, 4 July is a holiday
            press(&mut app, KeyCode::Char(' '));
            assert_eq!(
                app.mode,
                Mode::Notes { start: d(2024, 7, 1), end: d(2024, 7, 5), days: 4 }
            );
            for c in "beach".chars() {
                press(&mut app, KeyCode::Char(c));
            }
            press(&mut app, KeyCode::Enter);
            assert_eq!(app.mode, Mode::Normal);
            assert!(app.anchor.is_none());
            assert_eq!(app.status.as_ref().map(|s| s.1), Some(Color::Green));
        }
        assert_eq!(requests.requests.len(), 1);
        assert_eq!(requests.requests[0].notes.as_deref(), Some("beach"));
        assert_eq!(requests.requests[0].department, "Engineering");
        assert_eq!(balance.used, 4);
    }

    #[test]
    fn test_rejected_range_shows_reason_and_books_nothing() {
        let mut requests = LeaveRequestData::default();
        let mut balance = LeaveBalance::new(25);
        {
            let mut app = make_test_app(&mut requests, &mut balance, d(2024, 6, 17));
            press(&mut app, KeyCode::Char(' '));
            press_n(&mut app, KeyCode::Right, 5); // Saturday
            press(&mut app, KeyCode::Char(' '));
            assert_eq!(app.mode, Mode::Normal);
            let (msg, color) = app.status.clone().unwrap();
            assert!(msg.contains("weekend"));
            assert_eq!(color, Color::Red);
        }
        assert!(requests.requests.is_empty());
        assert_eq!(balance.used, 0);
    }

    #[test]
    fn test_esc_in_notes_discards_booking() {
        let mut requests = LeaveRequestData::default();
        let mut balance = LeaveBalance::new(25);
        {
            let mut app = make_test_app(&mut requests, &mut balance, d(2024, 6, 17));
            press(&mut app, KeyCode::Char(' '));
            press(&mut app, KeyCode::Char(' '));
            assert!(matches!(app.mode, Mode::Notes { days: 1, .. }));
            press(&mut app, KeyCode::Char('x'));
            press(&mut app, KeyCode::Backspace);
            assert!(app.input_buffer.is_empty());
            press(&mut app, KeyCode::Esc);
            assert_eq!(app.mode, Mode::Normal);
        }
        assert!(requests.requests.is_empty());
    }

    #[test]
    fn test_type_and_category_cycle() {
        let mut requests = LeaveRequestData::default();
        let mut balance = LeaveBalance::new(25);
        let mut app = make_test_app(&mut requests, &mut balance, d(2024, 6, 17));
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.leave_type, LeaveType::Sick);
        assert_eq!(app.category, LeaveCategory::Medical);
    }

    #[test]
    fn test_cancel_from_requests_view_releases_balance() {
        let mut requests = LeaveRequestData::default();
        requests.add(LeaveRequest {
            id: "r1".to_string(),
            leave_type: LeaveType::Annual,
            category: LeaveCategory::Vacation,
            department: "Engineering".to_string(),
            start_date: d(2024, 7, 1),
            end_date: d(2024, 7, 5),
            notes: None,
            status: RequestStatus::Pending,
            working_days: 5,
        });
        let mut balance = LeaveBalance { total: 25, used: 5 };
        {
            let mut app = make_test_app(&mut requests, &mut balance, d(2024, 6, 17));
            press(&mut app, KeyCode::Tab);
            assert_eq!(app.view_state, ViewState::Requests);
            press(&mut app, KeyCode::Char('d'));
            assert_eq!(app.list_cursor, 0);
            press(&mut app, KeyCode::Tab);
            assert_eq!(app.view_state, ViewState::Holidays);
            press(&mut app, KeyCode::Esc);
            assert_eq!(app.view_state, ViewState::Calendar);
        }
        assert!(requests.requests.is_empty());
        assert_eq!(balance.used, 0);
    }

    #[test]
    fn test_q_and_ctrl_c_quit() {
        let mut requests = LeaveRequestData::default();
        let mut balance = LeaveBalance::new(25);
        let mut app = make_test_app(&mut requests, &mut balance, d(2024, 6, 17));
        assert!(!press(&mut app, KeyCode::Char('x')));
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_q_in_notes_mode_is_text() {
        let mut requests = LeaveRequestData::default();
        let mut balance = LeaveBalance::new(25);
        let mut app = make_test_app(&mut requests, &mut balance, d(2024, 6, 17));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char(' '));
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.input_buffer, "q");
    }
}
