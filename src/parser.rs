use clap::{Arg, ArgAction, Command};

use crate::VERSION;

/// Create the app's cli interface
pub fn initialize() -> Command {
    Command::new("pagesift")
        .version(VERSION)
        .about("Fetch a single page, sift elements out of it with CSS selectors, save them to disk")
        .arg(
            Arg::new("url")
                .short('u')
                .long("url")
                .required(true)
                .value_name("URL")
                .help("The target URL"),
        )
        .arg(
            Arg::new("titles")
                .long("titles")
                .action(ArgAction::SetTrue)
                .help("Extract heading elements (h1 through h4) from the page"),
        )
        .arg(
            Arg::new("links")
                .long("links")
                .action(ArgAction::SetTrue)
                .help("Extract anchor elements carrying an href (the default operation)"),
        )
        .arg(
            Arg::new("selector")
                .short('s')
                .long("selector")
                .value_name("EXPR")
                .help("Extract elements matching this CSS selector"),
        )
        .arg(
            Arg::new("test_connection")
                .long("test-connection")
                .action(ArgAction::SetTrue)
                .help("Probe the target once, report whether it answered, and exit"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output file to write extracted elements to (default: target-element.txt)"),
        )
        .arg(
            Arg::new("user_agent")
                .short('a')
                .long("user-agent")
                .value_name("USER_AGENT")
                .help("Sets the User-Agent (default: a standard browser identification string)"),
        )
        .arg(
            Arg::new("timeout")
                .short('T')
                .long("timeout")
                .value_name("SECONDS")
                .help("Number of seconds before a request times out (default: 7)"),
        )
        .arg(
            Arg::new("attempts")
                .long("attempts")
                .value_name("ATTEMPTS")
                .help("Number of connection attempts per scrape (default: 3)"),
        )
        .arg(
            Arg::new("delay")
                .long("delay")
                .value_name("MILLISECONDS")
                .help("Base wait between connection attempts; doubles after each failure (default: 2000)"),
        )
        .arg(
            Arg::new("redirects")
                .short('r')
                .long("redirects")
                .action(ArgAction::SetTrue)
                .help("Allow client to follow redirects"),
        )
        .arg(
            Arg::new("insecure")
                .short('k')
                .long("insecure")
                .action(ArgAction::SetTrue)
                .help("Disables TLS certificate validation"),
        )
        .arg(
            Arg::new("proxy")
                .short('p')
                .long("proxy")
                .value_name("PROXY")
                .help("Proxy to use for requests (ex: http(s)://host:port, socks5(h)://host:port)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Don't echo extracted records to stdout"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .action(ArgAction::Count)
                .help("Increase verbosity level (use -vv or more for greater effect)"),
        )
}
