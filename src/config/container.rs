use std::{
    env::current_dir,
    fs::read_to_string,
    path::PathBuf,
    time::Duration,
};

use anyhow::{anyhow, Result};
use clap::ArgMatches;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::utils::{
    attempts, delay, output, report_and_exit, serialized_type, timeout, user_agent,
};
use crate::{
    client, connector::RetryPolicy, parser, DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_CONFIG_NAME,
};

/// macro helper to abstract away repetitive configuration updates
macro_rules! update_config_if_present {
    ($conf_val:expr, $matches:ident, $arg_name:expr, $arg_type:ty) => {
        match $matches.get_one::<$arg_type>($arg_name) {
            Some(value) => *$conf_val = value.to_owned(), // Update value
            None => {}
        }
    };
}

/// macro helper to abstract away repetitive if not default: update checks
macro_rules! update_if_not_default {
    ($old:expr, $new:expr, $default:expr) => {
        if $new != $default {
            *$old = $new;
        }
    };
}

/// macro helper to abstract away repetitive checks to see if the user has specified a value
/// for a given argument that needs to parse into a number type, i.e. usize, u64, etc
macro_rules! update_config_with_num_type_if_present {
    ($conf_val:expr, $matches:ident, $arg_name:expr, $arg_type:ty) => {
        if let Some(val) = $matches.get_one::<String>($arg_name) {
            match val.parse::<$arg_type>() {
                Ok(v) => *$conf_val = v,
                Err(_) => {
                    report_and_exit(&format!(
                        "Invalid value for --{}, must be a positive integer",
                        $arg_name
                    ));
                }
            }
        }
    };
}

/// Represents the final, global configuration of the program.
///
/// This struct is the combination of the following:
/// - default configuration values
/// - plus overrides read from a configuration file
/// - plus command-line options
///
/// In that order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Configuration {
    #[serde(rename = "type", default = "serialized_type")]
    /// Name of this type of struct, used for serialization, i.e. `{"type":"configuration"}`
    pub kind: String,

    /// Path to the config file used
    #[serde(default)]
    pub config: String,

    /// The target URL
    #[serde(default)]
    pub target_url: String,

    /// Sets the User-Agent (default: a standard browser identification string)
    #[serde(default = "user_agent")]
    pub user_agent: String,

    /// CSS selector for custom extraction; empty when unused
    #[serde(default)]
    pub selector: String,

    /// Extract heading elements (h1 through h4) instead of links
    #[serde(default)]
    pub titles: bool,

    /// Extract anchor elements carrying an href
    #[serde(default)]
    pub links: bool,

    /// Probe the target once and report whether it answered, nothing else
    #[serde(default)]
    pub test_connection: bool,

    /// Output file to write extracted elements to
    #[serde(default = "output")]
    pub output: String,

    /// Number of seconds before a request times out (default: 7)
    #[serde(default = "timeout")]
    pub timeout: u64,

    /// Number of connection attempts per scrape (default: 3)
    #[serde(default = "attempts")]
    pub attempts: usize,

    /// Base wait between connection attempts in milliseconds; doubles after
    /// each failure (default: 2000)
    #[serde(default = "delay")]
    pub delay: u64,

    /// Follow redirects
    #[serde(default)]
    pub redirects: bool,

    /// Disables TLS certificate validation
    #[serde(default)]
    pub insecure: bool,

    /// Proxy to use for requests (ex: http(s)://host:port, socks5(h)://host:port)
    #[serde(default)]
    pub proxy: String,

    /// Don't echo extracted records to stdout
    #[serde(default)]
    pub quiet: bool,

    /// Level of verbosity, equates to log level
    #[serde(default)]
    pub verbosity: u8,

    /// Instance of [reqwest::Client](https://docs.rs/reqwest/latest/reqwest/struct.Client.html)
    #[serde(skip)]
    pub client: Client,
}

impl Default for Configuration {
    /// Builds the default Configuration for pagesift
    fn default() -> Self {
        let timeout = timeout();
        let user_agent = user_agent();
        let client = client::initialize(timeout, &user_agent, false, false, None)
            .expect("Could not build client");
        let kind = serialized_type();

        Configuration {
            kind,
            client,
            timeout,
            user_agent,
            config: String::new(),
            target_url: String::new(),
            selector: String::new(),
            proxy: String::new(),
            output: output(),
            titles: false,
            links: false,
            test_connection: false,
            redirects: false,
            insecure: false,
            quiet: false,
            verbosity: 0,
            attempts: attempts(),
            delay: delay(),
        }
    }
}

impl Configuration {
    /// Creates a [Configuration](struct.Configuration.html) object with the
    /// built-in default values listed on each field, after which any values
    /// defined in a [pagesift-config.toml](constant.DEFAULT_CONFIG_NAME.html)
    /// config file override the built-in defaults.
    ///
    /// `pagesift-config.toml` can be placed in either of the following
    /// locations (in the order shown):
    /// - `CONFIG_DIR/pagesift/`
    /// - The user's current working directory
    ///
    /// If both valid configuration files are found, the second one overwrites
    /// the values found previously.
    ///
    /// Finally, any options/arguments given on the commandline override both
    /// built-in and config-file specified values.
    pub fn new() -> Result<Self> {
        // when compiling for test, we want to eliminate the runtime dependency of the parser
        if cfg!(test) {
            return Ok(Configuration::default());
        }

        let args = parser::initialize().get_matches();

        // Get the default configuration, this is what will apply if nothing
        // else is specified.
        let mut config = Configuration::default();

        // read in all config files
        Self::parse_config_files(&mut config)?;

        // read in the user provided options
        let cli_config = Self::parse_cli_args(&args);

        // merge the cli options into the config file options and return the result
        Self::merge_config(&mut config, cli_config);

        // rebuilding the client is the last step, so it reflects merged settings
        Self::try_rebuild_client(&mut config);

        Ok(config)
    }

    /// Parse all possible versions of the pagesift-config.toml file, adhering
    /// to the order of precedence outlined above
    fn parse_config_files(config: &mut Self) -> Result<()> {
        // merge a config found at ~/.config/pagesift/pagesift-config.toml
        // config_dir() resolves to one of the following
        //   - linux: $XDG_CONFIG_HOME or $HOME/.config
        //   - macOS: $HOME/Library/Application Support
        //   - windows: {FOLDERID_RoamingAppData}
        let config_dir = dirs::config_dir().ok_or_else(|| anyhow!("Couldn't load config"))?;
        let config_file = config_dir.join("pagesift").join(DEFAULT_CONFIG_NAME);
        Self::parse_and_merge_config(config_file, config)?;

        // merge a config found in the user's current working directory
        let cwd = current_dir()?;
        let config_file = cwd.join(DEFAULT_CONFIG_NAME);
        Self::parse_and_merge_config(config_file, config)?;

        Ok(())
    }

    /// Given a config file's location and an instance of `Configuration`, read
    /// in the config file if found and update the current settings with the
    /// settings found therein
    pub(super) fn parse_and_merge_config(config_file: PathBuf, config: &mut Self) -> Result<()> {
        if config_file.exists() {
            // save off a string version of the path before it goes out of scope
            let conf_str = config_file.to_str().unwrap_or("").to_string();
            let settings = Self::parse_config(config_file)?;

            // set the config used, for reporting in debug output
            config.config = conf_str;

            // update the settings
            Self::merge_config(config, settings);
        }
        Ok(())
    }

    /// deserialize the given file into a Configuration
    fn parse_config(config_file: PathBuf) -> Result<Self> {
        let content = read_to_string(config_file)?;
        Ok(toml::from_str(&content)?)
    }

    /// Given a set of ArgMatches read from the CLI, update and return the
    /// default Configuration settings
    pub(super) fn parse_cli_args(args: &ArgMatches) -> Self {
        let mut config = Configuration::default();

        update_config_if_present!(&mut config.target_url, args, "url", String);
        update_config_if_present!(&mut config.user_agent, args, "user_agent", String);
        update_config_if_present!(&mut config.selector, args, "selector", String);
        update_config_if_present!(&mut config.output, args, "output", String);
        update_config_if_present!(&mut config.proxy, args, "proxy", String);
        update_config_with_num_type_if_present!(&mut config.timeout, args, "timeout", u64);
        update_config_with_num_type_if_present!(&mut config.attempts, args, "attempts", usize);
        update_config_with_num_type_if_present!(&mut config.delay, args, "delay", u64);

        if args.get_flag("titles") {
            config.titles = true;
        }

        if args.get_flag("links") {
            config.links = true;
        }

        if args.get_flag("test_connection") {
            config.test_connection = true;
        }

        if args.get_flag("redirects") {
            config.redirects = true;
        }

        if args.get_flag("insecure") {
            config.insecure = true;
        }

        if args.get_flag("quiet") {
            config.quiet = true;
        }

        let verbosity = args.get_count("verbosity");
        if verbosity > 0 {
            config.verbosity = verbosity;
        }

        config
    }

    /// Given two Configurations, overwrite `settings` with the fields in
    /// `settings_to_merge` that differ from their default values
    pub(super) fn merge_config(settings: &mut Self, settings_to_merge: Self) {
        update_if_not_default!(&mut settings.target_url, settings_to_merge.target_url, "");
        update_if_not_default!(&mut settings.user_agent, settings_to_merge.user_agent, user_agent());
        update_if_not_default!(&mut settings.selector, settings_to_merge.selector, "");
        update_if_not_default!(&mut settings.titles, settings_to_merge.titles, false);
        update_if_not_default!(&mut settings.links, settings_to_merge.links, false);
        update_if_not_default!(
            &mut settings.test_connection,
            settings_to_merge.test_connection,
            false
        );
        update_if_not_default!(&mut settings.output, settings_to_merge.output, output());
        update_if_not_default!(&mut settings.timeout, settings_to_merge.timeout, timeout());
        update_if_not_default!(&mut settings.attempts, settings_to_merge.attempts, attempts());
        update_if_not_default!(&mut settings.delay, settings_to_merge.delay, delay());
        update_if_not_default!(&mut settings.redirects, settings_to_merge.redirects, false);
        update_if_not_default!(&mut settings.insecure, settings_to_merge.insecure, false);
        update_if_not_default!(&mut settings.proxy, settings_to_merge.proxy, "");
        update_if_not_default!(&mut settings.quiet, settings_to_merge.quiet, false);
        update_if_not_default!(&mut settings.verbosity, settings_to_merge.verbosity, 0);
    }

    /// rebuild the client from the merged settings, exiting with a report if
    /// the combination can't produce a client
    fn try_rebuild_client(config: &mut Configuration) {
        let proxy = if config.proxy.is_empty() {
            None
        } else {
            Some(config.proxy.as_str())
        };

        match client::initialize(
            config.timeout,
            &config.user_agent,
            config.redirects,
            config.insecure,
            proxy,
        ) {
            Ok(client) => config.client = client,
            Err(err) => report_and_exit(&err.to_string()),
        }
    }

    /// the multi-attempt retry schedule scrape operations connect under
    ///
    /// the attempt count and base delay are configurable; the growth factor is
    /// fixed at the doubling default
    pub fn scrape_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.attempts,
            Duration::from_millis(self.delay),
            DEFAULT_BACKOFF_MULTIPLIER,
        )
    }
}
