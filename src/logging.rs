use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

fn pace_builder() -> Builder {
    let mut builder = Builder::from_default_env();
    builder.format(|buf, record| writeln!(buf, "c {} - {}", record.level(), record.args()));
    builder
}

/// Logger whose lines are PACE comments, so they can share stdout with a `.td`.
pub fn build_pace_logger() {
    pace_builder().init();
}

pub fn build_pace_logger_for_level(level: LevelFilter) {
    pace_builder().filter(None, level).init();
}
