// Viewer event loop and terminal lifecycle
use crate::application::curve_service::{CurveService, QueryOutcome};
use crate::infrastructure::config::ViewerConfig;
use crate::infrastructure::http_repository::HttpTurbineRepository;
use crate::presentation::viewer::input::QueryForm;
use crate::presentation::viewer::state::CurveView;
use crate::presentation::viewer::ui;
use anyhow::Result;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub struct ViewerApp {
    pub form: QueryForm,
    pub view: CurveView,
    service: CurveService,
    tx: mpsc::UnboundedSender<(u64, QueryOutcome)>,
    rx: mpsc::UnboundedReceiver<(u64, QueryOutcome)>,
}

impl ViewerApp {
    pub fn new(service: CurveService) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            form: QueryForm::new(),
            view: CurveView::new(),
            service,
            tx,
            rx,
        }
    }

    /// Apply any completed fetches. Stale completions are dropped by the
    /// view's sequence check.
    pub fn drain_completions(&mut self) {
        while let Ok((seq, outcome)) = self.rx.try_recv() {
            self.view.apply(seq, outcome);
        }
    }

    /// Validate the form and, if it passes, run the fetch on a
    /// background task. The trigger is inert while a fetch is in flight.
    pub fn trigger_fetch(&mut self) {
        if self.view.is_loading() {
            return;
        }
        let Some(query) = self.form.submit() else {
            return;
        };
        let seq = self.view.begin();
        let service = self.service.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = service.fetch_curve(&query).await;
            // The receiver is gone only when the viewer is shutting down.
            let _ = tx.send((seq, outcome));
        });
    }

    /// Returns true when the viewer should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            return true;
        }
        match key.code {
            KeyCode::Esc => {
                self.view.dismiss();
                self.form.field_error = None;
            }
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::BackTab => self.form.focus_previous(),
            KeyCode::Enter => self.trigger_fetch(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) => self.form.push_char(c),
            _ => {}
        }
        false
    }
}

pub async fn run(config: ViewerConfig) -> Result<()> {
    let repository = Arc::new(HttpTurbineRepository::new(
        &config.base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?);
    let mut app = ViewerApp::new(CurveService::new(repository));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);
    cleanup_terminal(&mut terminal)?;
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut ViewerApp,
) -> Result<()> {
    loop {
        app.drain_completions();
        terminal.draw(|frame| ui::draw(frame, &app.form, &app.view))?;
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) {
                    break;
                }
            }
        }
    }
    Ok(())
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    terminal.show_cursor()?;
    Ok(())
}
