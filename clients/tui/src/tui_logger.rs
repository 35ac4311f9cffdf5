use log::{LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

/// Records kept before the oldest are dropped.
const CAPACITY: usize = 100;

/// Logger for the full-screen front end. Writing to stderr would tear the
/// alternate screen, so records are buffered and shown in the log panel.
pub struct TuiLogger {
    level: LevelFilter,
    log_buffer: Arc<Mutex<Vec<String>>>,
}

impl TuiLogger {
    pub fn new(level: LevelFilter) -> (Self, Arc<Mutex<Vec<String>>>) {
        let log_buffer = Arc::new(Mutex::new(Vec::new()));
        (
            TuiLogger {
                level,
                log_buffer: log_buffer.clone(),
            },
            log_buffer,
        )
    }

    /// Installs the logger globally and returns the buffer it fills.
    pub fn install(level: LevelFilter) -> Result<Arc<Mutex<Vec<String>>>, log::SetLoggerError> {
        let (logger, log_buffer) = Self::new(level);
        log::set_boxed_logger(Box::new(logger))?;
        log::set_max_level(level);
        Ok(log_buffer)
    }
}

impl Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let msg = format!("{:<5} {}", record.level(), record.args());
            if let Ok(mut buffer) = self.log_buffer.lock() {
                buffer.push(msg);
                if buffer.len() > CAPACITY {
                    buffer.remove(0);
                }
            }
        }
    }

    fn flush(&self) {}
}
