use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mcq_generator::ai_worker::spawn_gen_worker;
use mcq_generator::logger;
use mcq_generator::models::AppState;
use mcq_generator::session::App;
use mcq_generator::ui::{draw_input, draw_leave_confirmation, draw_quiz, draw_summary};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::mpsc;
use std::time::Duration;

fn main() -> io::Result<()> {
    logger::init();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (req_tx, req_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    spawn_gen_worker(resp_tx, req_rx);

    let mut app = App::new(req_tx, resp_rx);

    loop {
        // Drain worker replies before drawing so a finished generation
        // shows up on this frame, not the next keypress.
        while let Ok(response) = app.gen_rx.try_recv() {
            app.process_gen_response(response);
        }

        let state = app.state;
        terminal.draw(|f| match state {
            AppState::Input => draw_input(f, &mut app),
            AppState::Quiz => {
                if let Some(quiz) = &app.quiz {
                    draw_quiz(f, quiz, app.status_line.as_deref());
                }
            }
            AppState::QuizLeaveConfirm => draw_leave_confirmation(f),
            AppState::Summary => {
                if let Some(quiz) = &app.quiz {
                    draw_summary(f, quiz, app.status_line.as_deref());
                }
            }
        })?;

        // Poll with a timeout so the loop keeps ticking while a
        // generation is in flight.
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    break;
                }
                let state = app.state;
                match state {
                    AppState::Input => app.handle_input_key(key),
                    AppState::Quiz => app.handle_quiz_key(key),
                    AppState::QuizLeaveConfirm => app.handle_confirm_key(key),
                    AppState::Summary => {
                        if key.code == KeyCode::Char('q') {
                            break;
                        }
                        app.handle_summary_key(key);
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
