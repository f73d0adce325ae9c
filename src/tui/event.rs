use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};

use crate::error::{Result, TicklistError};

/// Terminal events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize,
    /// Periodic tick for UI updates
    Tick,
}

/// Event handler with background thread
pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate in milliseconds
    pub fn new(tick_rate: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate);
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                let sent = match event::read() {
                    // Windows reports key releases too
                    Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        sender.send(Event::Key(key))
                    }
                    Ok(event::Event::Resize(_, _)) => sender.send(Event::Resize),
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            } else if sender.send(Event::Tick).is_err() {
                break;
            }
        });

        Self { receiver }
    }

    /// Get the next event, blocking until one is available
    pub fn next(&self) -> Result<Event> {
        self.receiver
            .recv()
            .map_err(|e| TicklistError::Tui(e.to_string()))
    }
}
