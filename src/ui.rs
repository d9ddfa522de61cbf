//! TUI module using ratatui.
//!
//! A URL input line, a spinner while a summary is being produced and a
//! scrollable output pane. The event loop is the interactive side of the
//! [`Orchestrator`]: it is the only place the display state is touched.

use crate::orchestrator::{DisplaySurface, Orchestrator, TaskEvent};
use crate::pipeline::Pipeline;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    layout::{Constraint, Layout, Position},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph, Wrap},
    DefaultTerminal, Frame,
};
use std::sync::Arc;
use std::time::Duration;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TICK_RATE: Duration = Duration::from_millis(80);
const PAGE_SCROLL: u16 = 10;

/// Terminal-side state: everything the user sees
#[derive(Debug)]
pub struct App {
    input: String,
    output: String,
    busy: bool,
    trigger_enabled: bool,
    scroll: u16,
    max_scroll: u16,
    spin_idx: usize,
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self {
            input: String::new(),
            output: "Enter a website URL and press Enter to summarise it.".to_string(),
            busy: false,
            trigger_enabled: true,
            scroll: 0,
            max_scroll: 0,
            spin_idx: 0,
            should_quit: false,
        }
    }
}

impl DisplaySurface for App {
    fn set_text(&mut self, text: &str) {
        self.output = text.to_string();
        self.scroll = 0;
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        self.spin_idx = 0;
    }

    fn set_trigger_enabled(&mut self, enabled: bool) {
        self.trigger_enabled = enabled;
    }
}

enum Step {
    Task(TaskEvent),
    Input(Event),
    InputClosed,
    Tick,
}

impl App {
    pub fn output(&self) -> &str {
        &self.output
    }

    fn tick(&mut self) {
        if self.busy {
            self.spin_idx = (self.spin_idx + 1) % SPINNER_FRAMES.len();
        }
    }

    fn handle_key(&mut self, key: KeyEvent, orchestrator: &mut Orchestrator) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Enter if self.trigger_enabled => {
                let input = self.input.clone();
                orchestrator.trigger(&input, self);
            }
            KeyCode::Char(ch) => self.input.push(ch),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(PAGE_SCROLL),
            KeyCode::PageDown => self.scroll_down(PAGE_SCROLL),
            _ => {}
        }
    }

    fn scroll_up(&mut self, rows: u16) {
        self.scroll = self.scroll.saturating_sub(rows);
    }

    fn scroll_down(&mut self, rows: u16) {
        self.scroll = self.scroll.saturating_add(rows).min(self.max_scroll);
    }

    /// Record how far the output pane can scroll for the given inner size
    fn fit_output(&mut self, width: u16, height: u16) {
        let rows = wrapped_line_count(&self.output, usize::from(width));
        self.max_scroll = u16::try_from(rows.saturating_sub(usize::from(height))).unwrap_or(u16::MAX);
        self.scroll = self.scroll.min(self.max_scroll);
    }

    fn draw(&mut self, frame: &mut Frame) {
        let [title_area, input_area, status_area, output_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(
            Line::from("🌐 sitebrief - website summariser").bold().centered(),
            title_area,
        );

        let input_style = if self.trigger_enabled {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(
            Paragraph::new(self.input.as_str())
                .style(input_style)
                .block(Block::bordered().title(" Website URL ")),
            input_area,
        );
        if self.trigger_enabled {
            let typed = u16::try_from(self.input.chars().count()).unwrap_or(u16::MAX);
            let x = input_area
                .x
                .saturating_add(1)
                .saturating_add(typed)
                .min(input_area.right().saturating_sub(2));
            frame.set_cursor_position(Position::new(x, input_area.y + 1));
        }

        let status = if self.busy {
            Line::from(format!("{} working...", SPINNER_FRAMES[self.spin_idx])).yellow()
        } else {
            Line::from("")
        };
        frame.render_widget(status, status_area);

        let output_block = Block::bordered().title(" Summary ");
        let inner = output_block.inner(output_area);
        self.fit_output(inner.width, inner.height);
        frame.render_widget(
            Paragraph::new(self.output.as_str())
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0))
                .block(output_block),
            output_area,
        );

        frame.render_widget(
            Line::from("Enter: summarise  ↑/↓ PgUp/PgDn: scroll  Esc: quit").dim(),
            help_area,
        );
    }
}

/// Rows `text` occupies when word-wrapped to `width` columns
fn wrapped_line_count(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }

    text.split('\n')
        .map(|line| {
            let mut rows = 1;
            let mut col = 0;
            for word in line.split(' ') {
                let len = word.chars().count();
                let needed = if col == 0 { len } else { col + 1 + len };
                if needed <= width {
                    col = needed;
                } else if col > 0 {
                    rows += 1;
                    col = len;
                } else {
                    col = len;
                }
                while col > width {
                    rows += 1;
                    col -= width;
                }
            }
            rows
        })
        .sum()
}

/// Run the TUI until the user quits
pub async fn run(pipeline: Arc<Pipeline>) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, pipeline).await;
    ratatui::restore();
    result
}

async fn event_loop(terminal: &mut DefaultTerminal, pipeline: Arc<Pipeline>) -> anyhow::Result<()> {
    let mut app = App::default();
    let mut orchestrator = Orchestrator::new(pipeline);
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);

    while !app.should_quit {
        terminal.draw(|frame| app.draw(frame))?;

        let step = tokio::select! {
            Some(event) = orchestrator.next_event() => Step::Task(event),
            input = events.next() => match input {
                Some(event) => Step::Input(event?),
                None => Step::InputClosed,
            },
            _ = ticker.tick() => Step::Tick,
        };

        match step {
            Step::Task(event) => orchestrator.apply(event, &mut app),
            Step::Input(Event::Key(key)) => app.handle_key(key, &mut orchestrator),
            Step::Input(_) => {}
            Step::InputClosed => break,
            Step::Tick => app.tick(),
        }
    }

    Ok(())
}
