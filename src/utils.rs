use console::style;

/// simple wrapper to stay DRY; prepends a colorized ERROR tag to the given message
pub fn fmt_err(msg: &str) -> String {
    format!("{}: {}", status_colorizer("ERROR"), msg)
}

/// Add color to a status indicator or log level tag
pub fn status_colorizer(status: &str) -> String {
    match status.chars().next() {
        Some('1') => style(status).blue().to_string(),    // informational
        Some('2') => style(status).green().to_string(),   // success
        Some('3') => style(status).yellow().to_string(),  // redirects
        Some('4') | Some('5') => style(status).red().to_string(), // client/server error
        Some('E') => style(status).red().to_string(),     // ERROR
        _ => status.to_string(),
    }
}

/// Add color to a module path for log/error output
pub fn module_colorizer(module: &str) -> String {
    style(module).cyan().to_string()
}
