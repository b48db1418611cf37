use std::env;
use std::io::Write;
use std::time::Instant;

use console::{style, Color};
use env_logger::Builder;
use log::Level;

/// Create a customized instance of
/// [env_logger::Logger](https://docs.rs/env_logger/latest/env_logger/struct.Logger.html)
/// with timer offset/color and set the log level based on `verbosity`
pub fn initialize(verbosity: u8) {
    // use occurrences of -v on the commandline to set the log level for the
    // application; respects an already specified RUST_LOG environment variable
    if env::var("RUST_LOG").is_err() {
        // only set log level based on verbosity when RUST_LOG variable doesn't exist
        match verbosity {
            0 => (),
            1 => env::set_var("RUST_LOG", "warn"),
            2 => env::set_var("RUST_LOG", "info"),
            3 => env::set_var("RUST_LOG", "pagesift=debug,info"),
            _ => env::set_var("RUST_LOG", "pagesift=trace,info"),
        }
    }

    let start = Instant::now();

    Builder::from_default_env()
        .format(move |buf, record| {
            let (level_name, level_color) = match record.level() {
                Level::Error => ("ERR", Color::Red),
                Level::Warn => ("WRN", Color::Red),
                Level::Info => ("INF", Color::Cyan),
                Level::Debug => ("DBG", Color::Yellow),
                Level::Trace => ("TRC", Color::Magenta),
            };

            writeln!(
                buf,
                "{} {:10.03} {} {}",
                style(level_name).bg(level_color).black(),
                style(start.elapsed().as_secs_f32()).dim(),
                record.target(),
                style(record.args()).dim(),
            )
        })
        .init();
}
