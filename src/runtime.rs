//! Event plumbing for the app loop. Keyboard input and the one-second
//! clock are produced on their own threads and funneled through a single
//! channel, so the loop consumes one serialized stream and every state
//! transition runs to completion before the next event is seen.

use std::sync::mpsc::{self, Receiver, RecvError};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app loop
#[derive(Clone, Debug)]
pub enum DrillEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of app events (keyboard, resize, periodic tick)
pub trait DrillEventSource {
    /// Blocks until the next event arrives. An error means every producer
    /// has hung up and no further events can come.
    fn recv(&self) -> Result<DrillEvent, RecvError>;
}

/// Production source: a crossterm read thread plus a tick thread on a
/// fixed cadence, both feeding the same channel.
pub struct TerminalEvents {
    rx: Receiver<DrillEvent>,
}

impl TerminalEvents {
    pub fn spawn(tick_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        let tick_tx = tx.clone();
        thread::spawn(move || loop {
            thread::sleep(tick_interval);

            if tick_tx.send(DrillEvent::Tick).is_err() {
                break;
            }
        });

        thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => Some(DrillEvent::Key(key)),
                Ok(CtEvent::Resize(_, _)) => Some(DrillEvent::Resize),
                Ok(_) => None,
                Err(_) => break,
            };

            if let Some(evt) = evt {
                if tx.send(evt).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl DrillEventSource for TerminalEvents {
    fn recv(&self) -> Result<DrillEvent, RecvError> {
        self.rx.recv()
    }
}

/// Test source fed directly from a channel the test owns. Ticks are sent
/// explicitly, so tests drive the session clock deterministically.
pub struct TestEventSource {
    rx: Receiver<DrillEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<DrillEvent>) -> Self {
        Self { rx }
    }
}

impl DrillEventSource for TestEventSource {
    fn recv(&self) -> Result<DrillEvent, RecvError> {
        self.rx.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_source_passes_events_through_in_order() {
        let (tx, rx) = mpsc::channel();
        tx.send(DrillEvent::Key(KeyEvent::new(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
        )))
        .unwrap();
        tx.send(DrillEvent::Resize).unwrap();
        tx.send(DrillEvent::Tick).unwrap();
        let source = TestEventSource::new(rx);

        assert!(matches!(source.recv(), Ok(DrillEvent::Key(_))));
        assert!(matches!(source.recv(), Ok(DrillEvent::Resize)));
        assert!(matches!(source.recv(), Ok(DrillEvent::Tick)));
    }

    #[test]
    fn test_source_errors_once_producers_hang_up() {
        let (tx, rx) = mpsc::channel();
        tx.send(DrillEvent::Tick).unwrap();
        drop(tx);
        let source = TestEventSource::new(rx);

        assert!(matches!(source.recv(), Ok(DrillEvent::Tick)));
        assert!(source.recv().is_err());
    }

    #[test]
    fn test_terminal_events_tick_thread_delivers() {
        // The read thread will fail without a tty and exit; the tick
        // thread alone must keep the channel alive and ticking.
        let events = TerminalEvents::spawn(Duration::from_millis(5));

        for _ in 0..3 {
            match events.recv() {
                Ok(DrillEvent::Tick) => return,
                Ok(_) => continue,
                Err(_) => panic!("tick producer hung up"),
            }
        }
        panic!("no tick within three events");
    }
}
