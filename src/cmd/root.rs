use crate::data::{AppSettings, LeaveBalance, LeaveRequestData, Persistable};
use crate::ui::calendar_view::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::NaiveDate;

pub fn run(today: NaiveDate) -> Result<()> {
    let settings = AppSettings::load()?;
    let rules = settings.rules()?;
    let mut requests = LeaveRequestData::load()?;
    let mut balance = LeaveBalance::load_or_new(settings.annual_allowance)?;
    // Read before entering the alternate screen so feed warnings stay visible.
    let external = super::load_external_holidays(&settings)?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let mut app = App::new(&mut requests, &mut balance, settings, rules, external, today);
    let result = run_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    drop(app);

    requests.save()?;
    balance.save()?;
    tracing::debug!(requests = requests.requests.len(), "session saved");

    result
}
