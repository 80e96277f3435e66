//! Step player state and event loop

use super::panes::{self, ListingScrollState, MemoryRenderData, StatusRenderData};
use crate::cursor::PlaybackCursor;
use crate::engine::{OperationKind, Outcome, Params, Variant};
use crate::memory::MemoryState;
use crate::snapshot::Variables;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// One executed operation, ready to be replayed
#[derive(Debug, Clone)]
pub struct Recording {
    pub variant: Variant,
    pub operation: OperationKind,
    pub params: Params,
    pub listing: &'static [&'static str],
    pub cursor: PlaybackCursor,
    pub outcome: Option<Outcome>,
}

impl Recording {
    /// `insertAt(5, @2)` style title
    pub fn title(&self) -> String {
        let mut args = Vec::new();
        if let Some(value) = &self.params.value {
            args.push(value.to_string());
        }
        if let Some(position) = self.params.position {
            args.push(format!("@{}", position));
        }
        format!("{} {}({})", self.variant, self.operation, args.join(", "))
    }
}

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Listing,
    Description,
    Memory,
    Variables,
}

impl FocusedPane {
    /// Clockwise: listing -> description -> memory -> variables
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Listing => FocusedPane::Description,
            FocusedPane::Description => FocusedPane::Memory,
            FocusedPane::Memory => FocusedPane::Variables,
            FocusedPane::Variables => FocusedPane::Listing,
        }
    }
}

/// The main application state
pub struct App {
    recordings: Vec<Recording>,
    selected: usize,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub listing_scroll: ListingScrollState,
    pub memory_scroll: usize,
    pub variables_scroll: usize,

    pub should_quit: bool,
    pub status_message: String,

    pub is_playing: bool,
    pub last_play_time: Instant,
    /// Delay between steps while auto-playing
    pub interval: Duration,
}

impl App {
    pub fn new(recordings: Vec<Recording>, interval: Duration) -> Self {
        let mut app = App {
            recordings,
            selected: 0,
            focused_pane: FocusedPane::Listing,
            listing_scroll: ListingScrollState::default(),
            memory_scroll: 0,
            variables_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            interval,
        };
        app.select(app.recordings.len().saturating_sub(1));
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= self.interval {
                if self.cursor_mut().is_some_and(|c| c.next_step()) {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Poll with a timeout so auto-play keeps ticking
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn current(&self) -> Option<&Recording> {
        self.recordings.get(self.selected)
    }

    fn cursor_mut(&mut self) -> Option<&mut PlaybackCursor> {
        self.recordings.get_mut(self.selected).map(|r| &mut r.cursor)
    }

    /// Switch to another recording and show its first step
    fn select(&mut self, index: usize) {
        if index >= self.recordings.len() {
            return;
        }
        self.selected = index;
        self.is_playing = false;
        self.listing_scroll = ListingScrollState::default();
        self.memory_scroll = 0;
        self.variables_scroll = 0;
        if let Some(recording) = self.recordings.get_mut(index) {
            recording.cursor.reset();
            recording.cursor.start();
            self.status_message = recording.title();
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        // Left column: listing (top) | description (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: memory (top) | variables (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        let Some(recording) = self.recordings.get(self.selected) else {
            panes::render_description_pane(frame, columns[0], None, None, false);
            return;
        };

        let step = recording.cursor.current();
        let empty = Variables::new();
        let blank = MemoryState::default();
        let (variables, state) = match step {
            Some(step) => (&step.variables, &step.memory_state),
            None => (&empty, &blank),
        };
        let outcome = if recording.cursor.is_at_end() {
            recording.outcome.as_ref()
        } else {
            None
        };

        panes::render_listing_pane(
            frame,
            left_rows[0],
            &recording.title(),
            recording.listing,
            step.map(|s| s.active_line),
            self.focused_pane == FocusedPane::Listing,
            &mut self.listing_scroll,
        );

        panes::render_description_pane(
            frame,
            left_rows[1],
            step,
            outcome,
            self.focused_pane == FocusedPane::Description,
        );

        panes::render_memory_pane(
            frame,
            right_rows[0],
            MemoryRenderData {
                state,
                variant: recording.variant,
                variables,
            },
            self.focused_pane == FocusedPane::Memory,
            &mut self.memory_scroll,
        );

        panes::render_variables_pane(
            frame,
            right_rows[1],
            variables,
            state,
            self.focused_pane == FocusedPane::Variables,
            &mut self.variables_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                position: recording.cursor.position(),
                total_steps: recording.cursor.len(),
                recording: self.selected,
                total_recordings: self.recordings.len(),
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let mut stepped = 0;
                if let Some(cursor) = self.cursor_mut() {
                    while stepped < n && cursor.next_step() {
                        stepped += 1;
                    }
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Char('n') => {
                if self.selected + 1 < self.recordings.len() {
                    self.select(self.selected + 1);
                }
            }
            KeyCode::Char('p') => {
                if self.selected > 0 {
                    self.select(self.selected - 1);
                }
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                let moved = self.cursor_mut().is_some_and(|c| c.prev_step());
                self.status_message = if moved {
                    "Stepped backward".to_string()
                } else {
                    "Already at the first step".to_string()
                };
            }
            KeyCode::Right => {
                self.is_playing = false;
                let moved = self.cursor_mut().is_some_and(|c| c.next_step());
                self.status_message = if moved {
                    "Stepped forward".to_string()
                } else {
                    "Already at the last step".to_string()
                };
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Listing => {
                    if let Some(row) = self.listing_scroll.target_line_row {
                        self.listing_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Memory => {
                    self.memory_scroll = self.memory_scroll.saturating_sub(1);
                }
                FocusedPane::Variables => {
                    self.variables_scroll = self.variables_scroll.saturating_sub(1);
                }
                FocusedPane::Description => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Listing => {
                    if let Some(row) = self.listing_scroll.target_line_row {
                        self.listing_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Memory => {
                    self.memory_scroll = self.memory_scroll.saturating_add(1);
                }
                FocusedPane::Variables => {
                    self.variables_scroll = self.variables_scroll.saturating_add(1);
                }
                FocusedPane::Description => {}
            },
            KeyCode::Char(' ') => {
                self.is_playing = !self.is_playing;
                if self.is_playing {
                    if self.current().is_some_and(|r| r.cursor.is_at_end()) {
                        if let Some(cursor) = self.cursor_mut() {
                            cursor.start();
                        }
                    }
                    self.last_play_time = Instant::now();
                    self.status_message = "Playing...".to_string();
                } else {
                    self.status_message = "Paused".to_string();
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                if let Some(cursor) = self.cursor_mut() {
                    cursor.seek_end();
                }
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                if let Some(cursor) = self.cursor_mut() {
                    cursor.start();
                }
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crossterm::event::KeyModifiers;

    fn recording() -> Recording {
        let mut engine = Engine::new();
        engine
            .execute(Variant::Singly, OperationKind::InsertHead, Params::value(5))
            .unwrap();
        Recording {
            variant: Variant::Singly,
            operation: OperationKind::InsertHead,
            params: Params::value(5),
            listing: crate::engine::listing(Variant::Singly, OperationKind::InsertHead)
                .unwrap_or(&[]),
            cursor: engine.cursor(),
            outcome: engine.last_outcome().cloned(),
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_recording_title() {
        let mut rec = recording();
        assert_eq!(rec.title(), "singly insertHead(5)");
        rec.params = Params::value(7).at(2);
        assert_eq!(rec.title(), "singly insertHead(7, @2)");
    }

    #[test]
    fn test_keys_move_the_cursor() {
        let mut app = App::new(vec![recording()], Duration::from_millis(10));
        assert_eq!(app.current().and_then(|r| r.cursor.position()), Some(0));

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.current().and_then(|r| r.cursor.position()), Some(2));

        press(&mut app, KeyCode::Enter);
        assert!(app.current().is_some_and(|r| r.cursor.is_at_end()));

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.current().and_then(|r| r.cursor.position()), Some(0));

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_switching_recordings() {
        let mut app = App::new(vec![recording(), recording()], Duration::from_millis(10));
        assert_eq!(app.selected, 1);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.selected, 0);
    }
}
