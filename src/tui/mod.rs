pub mod app;
pub mod ui;

use std::{error::Error, io, time::Duration};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use app::{App, InputMode, ViewMode};
use ui::ui;

pub fn run_tui() -> Result<(), Box<dyn Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new();

    // Run loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        // Poll with a timeout so the undo window can lapse without input.
        if !event::poll(Duration::from_millis(250))? {
            app.tick();
            continue;
        }

        if let Event::Key(key) = event::read()? {
            match app.input_mode {
                InputMode::Normal => match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Down | KeyCode::Char('j') => app.next(),
                    KeyCode::Up | KeyCode::Char('k') => app.previous(),
                    KeyCode::Char('v') => app.toggle_view(),
                    KeyCode::Char('t') => app.toggle_theme(),
                    _ => match app.view_mode {
                        ViewMode::Tasks => match key.code {
                            KeyCode::Char(' ') => app.toggle_selected(),
                            KeyCode::Char('a') => app.start_add(),
                            KeyCode::Char('e') => app.start_edit(),
                            KeyCode::Char('u') => app.undo_edit(),
                            KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                            KeyCode::Char('c') => app.toggle_completed_visibility(),
                            KeyCode::Char('s') => app.sort_by_due_date(),
                            _ => {}
                        },
                        ViewMode::Trash => match key.code {
                            KeyCode::Char('r') => app.restore_selected(),
                            KeyCode::Char('x') | KeyCode::Delete => app.purge_selected(),
                            KeyCode::Char('X') => app.empty_trash(),
                            _ => {}
                        },
                    },
                },
                InputMode::Editing | InputMode::Adding => match key.code {
                    KeyCode::Enter => app.handle_input(),
                    KeyCode::Esc => {
                        app.input_mode = InputMode::Normal;
                        app.input_buffer.clear();
                    }
                    KeyCode::Char(c) => {
                        app.input_buffer.push(c);
                    }
                    KeyCode::Backspace => {
                        app.input_buffer.pop();
                    }
                    _ => {}
                },
            }
        }
        app.tick();
    }
}
