use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Records kept before the UI drains them
const MAX_BUFFERED: usize = 100;

pub type LogBuffer = Arc<Mutex<VecDeque<String>>>;

/// Routes `log` records into a shared buffer the UI shows in its log panel,
/// since stdout belongs to the terminal UI.
pub struct TuiLogger {
    log_buffer: LogBuffer,
    level: LevelFilter,
}

impl TuiLogger {
    pub fn new(level: LevelFilter) -> (Self, LogBuffer) {
        let log_buffer = Arc::new(Mutex::new(VecDeque::new()));
        (
            TuiLogger {
                log_buffer: log_buffer.clone(),
                level,
            },
            log_buffer,
        )
    }
}

impl Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = match record.level() {
            Level::Info => format!("{}", record.args()),
            level => format!("{level}: {}", record.args()),
        };
        if let Ok(mut buffer) = self.log_buffer.lock() {
            buffer.push_back(msg);
            while buffer.len() > MAX_BUFFERED {
                buffer.pop_front();
            }
        }
    }

    fn flush(&self) {}
}
