use crate::state::{Modal, Mode, State};
use crate::tasks::Filter;
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            let ready = match event::poll(tick_rate) {
                Ok(ready) => ready,
                Err(_) => return,
            };
            if ready {
                if let Ok(CrosstermEvent::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press && tx_clone.send(Event::Input(key)).is_err()
                    {
                        return;
                    }
                }
            }
            if tx_clone.send(Event::Tick).is_err() {
                return;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => Ok(dispatch(key, state)),
            Event::Tick => Ok(true),
        }
    }
}

/// Route one key press to the matching controller method. Returns false when
/// an exit was requested.
///
/// Precedence mirrors the draw order: a pending modal captures everything,
/// then the active input mode, then the normal-mode keymap.
pub fn dispatch(key: KeyEvent, state: &mut State) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }

    if state.modal().is_some() {
        dispatch_modal(key, state);
        return true;
    }

    match *state.mode() {
        Mode::AddInput => match key.code {
            KeyCode::Enter => state.submit_add(),
            KeyCode::Esc => state.cancel_add(),
            _ => dispatch_text_input(key, state),
        },
        Mode::EditInput => match key.code {
            KeyCode::Enter => state.commit_edit(),
            KeyCode::Esc => state.cancel_edit(),
            _ => dispatch_text_input(key, state),
        },
        Mode::Normal => return dispatch_normal(key, state),
    }
    true
}

/// Keymap while a modal overlay is open.
///
fn dispatch_modal(key: KeyEvent, state: &mut State) {
    let modal = match state.modal() {
        Some(Modal::ConfirmDelete(_)) => ModalKind::ConfirmDelete,
        Some(Modal::Alert(_)) => ModalKind::Alert,
        Some(Modal::ImportPath) => ModalKind::ImportPath,
        None => return,
    };
    match modal {
        ModalKind::ConfirmDelete => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                debug!("Processing confirm delete event '{:?}'...", key);
                state.confirm_modal();
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                debug!("Processing cancel delete confirmation event '{:?}'...", key);
                state.dismiss_modal();
            }
            _ => {}
        },
        ModalKind::Alert => match key.code {
            KeyCode::Enter | KeyCode::Esc => state.dismiss_modal(),
            _ => {}
        },
        ModalKind::ImportPath => match key.code {
            KeyCode::Enter => {
                debug!("Processing import submit event '{:?}'...", key);
                state.submit_import();
            }
            KeyCode::Esc => state.dismiss_modal(),
            _ => dispatch_text_input(key, state),
        },
    }
}

enum ModalKind {
    ConfirmDelete,
    Alert,
    ImportPath,
}

/// Shared text editing keys for the entry field, the in-place title editor
/// and the import path prompt.
///
fn dispatch_text_input(key: KeyEvent, state: &mut State) {
    match key.code {
        KeyCode::Char(c) => state.input_mut().insert(c),
        KeyCode::Backspace => state.input_mut().backspace(),
        KeyCode::Left => state.input_mut().move_left(),
        KeyCode::Right => state.input_mut().move_right(),
        _ => {}
    }
}

/// Normal-mode keymap. Returns false when an exit was requested.
///
fn dispatch_normal(key: KeyEvent, state: &mut State) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            debug!("Processing exit terminal event '{:?}'...", key);
            return false;
        }
        KeyCode::Char('a') => state.start_add(),
        KeyCode::Char('j') | KeyCode::Down => state.next_row(),
        KeyCode::Char('k') | KeyCode::Up => state.previous_row(),
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            debug!("Processing toggle task completion event '{:?}'...", key);
            state.toggle_selected();
        }
        KeyCode::Char('e') => state.start_edit_selected(),
        KeyCode::Char('d') => {
            debug!("Processing delete task event '{:?}'...", key);
            state.request_delete_selected();
        }
        KeyCode::Char('1') => state.set_filter(Filter::All),
        KeyCode::Char('2') => state.set_filter(Filter::Active),
        KeyCode::Char('3') => state.set_filter(Filter::Completed),
        KeyCode::Char('C') => {
            debug!("Processing clear completed event '{:?}'...", key);
            state.clear_completed();
        }
        KeyCode::Char('s') => state.export(),
        KeyCode::Char('i') => state.start_import(),
        KeyCode::Char('L') => state.toggle_log(),
        _ => {
            debug!("Skipping processing of terminal event '{:?}'...", key);
        }
    }
    true
}
