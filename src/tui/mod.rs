pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::admin::ContentManager;
use crate::app::{AppContext, Result};
use crate::auth::Session;
use crate::config::Config;
use crate::pipeline::SearchScope;

use self::app::{ActivePane, InputMode, PendingDelete, Tab, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>, session: Option<Session>) -> Result<()> {
    let mut tui_app = TuiApp::new(
        ctx.doas(SearchScope::Public)?,
        ctx.hadiths(SearchScope::Public)?,
        session,
    );
    if let Some(session) = &tui_app.session {
        let message = format!(
            "Logged in as {} at {}",
            session.username(),
            session.started_at().with_timezone(&chrono::Local).format("%H:%M")
        );
        tui_app.set_status(message);
    }

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, tui_app, &ctx, &config);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(terminal: &mut Tui, mut tui_app: TuiApp, ctx: &AppContext, config: &Config) -> Result<()> {
    let event_handler = EventHandler::new(Duration::from_millis(100));

    loop {
        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                if let Some(pending) = tui_app.pending_delete.take() {
                    confirm_delete(&mut tui_app, ctx, pending, key.code)?;
                    continue;
                }

                if tui_app.mode == InputMode::Search {
                    handle_search_key(&mut tui_app, key);
                    continue;
                }

                tui_app.clear_status();
                match config.keybindings.get_action(&key) {
                    Action::Quit => tui_app.should_quit = true,
                    Action::MoveUp => tui_app.move_up(),
                    Action::MoveDown => tui_app.move_down(),
                    Action::NextPage => tui_app.next_page(),
                    Action::PrevPage => tui_app.prev_page(),
                    Action::NextPane => tui_app.active_pane = tui_app.active_pane.next(),
                    Action::PrevPane => tui_app.active_pane = tui_app.active_pane.prev(),
                    Action::Select => match tui_app.active_pane {
                        ActivePane::Categories => tui_app.apply_selected_category(),
                        ActivePane::Items => tui_app.active_pane = ActivePane::Preview,
                        ActivePane::Preview => {}
                    },
                    Action::Search => tui_app.start_search(),
                    Action::ClearFilter => tui_app.clear_filter(),
                    Action::SwitchCollection => tui_app.switch_tab(),
                    Action::Refresh => {
                        tui_app.refresh()?;
                        tui_app.set_status("Reloaded".to_string());
                    }
                    Action::ToggleMaximize => tui_app.toggle_maximize(),
                    Action::DeleteItem => tui_app.request_delete(),
                    Action::None => {}
                }
            }
            AppEvent::Tick => {
                tui_app.poll()?;
            }
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_search_key(tui_app: &mut TuiApp, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => tui_app.end_search(),
        KeyCode::Backspace => tui_app.pop_query_char(),
        KeyCode::Char(c) => tui_app.push_query_char(c),
        _ => {}
    }
}

fn confirm_delete(
    tui_app: &mut TuiApp,
    ctx: &AppContext,
    pending: PendingDelete,
    code: KeyCode,
) -> Result<()> {
    if !matches!(code, KeyCode::Char('y') | KeyCode::Char('Y')) {
        tui_app.set_status("Delete cancelled".to_string());
        return Ok(());
    }
    let Some(session) = tui_app.session.as_ref() else {
        return Ok(());
    };

    let cms = ContentManager::new(ctx.store.as_ref(), session);
    let outcome = match pending.tab {
        Tab::Doa => cms.delete_doa(&pending.id),
        Tab::Hadith => cms.delete_hadith(&pending.id),
    };
    match outcome {
        Ok(()) => {
            tui_app.poll()?;
            tui_app.set_status(format!("Deleted: {}", pending.title));
        }
        Err(e) => tui_app.set_status(format!("Delete failed: {}", e)),
    }
    Ok(())
}
