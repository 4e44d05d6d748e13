use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// Maps the number of `-v` flags to a level, starting from `Info`.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => Level::Info.to_level_filter(),
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
