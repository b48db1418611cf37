use std::sync::Arc;

use anyhow::{bail, Result};
use tokio_util::sync::CancellationToken;

use pagesift::{
    config::Configuration, fragment::Fragment, logger, sifter::Sifter, utils::fmt_err,
};

/// async main called from real main, broken out in this way to allow for some
/// synchronous code to be executed before bringing the tokio runtime online
async fn wrapped_main(config: Arc<Configuration>) -> Result<()> {
    log::trace!("enter: wrapped_main");

    let cancel = CancellationToken::new();

    let handler_token = cancel.clone();
    ctrlc::set_handler(move || {
        // aborts any in-flight backoff wait; the pending operation surfaces
        // the cancellation as a failure instead of retrying
        handler_token.cancel();
    })?;

    let sifter = Sifter::new(config.clone(), cancel)?;

    if config.test_connection {
        // probe-only invocation; report the outcome and be done
        if sifter.test_connection().await {
            println!("Successfully connected.");
        } else {
            eprintln!("{}", fmt_err("Connection could not be established."));
        }

        log::trace!("exit: wrapped_main");
        return Ok(());
    }

    let fragments: Vec<Fragment> = if config.titles {
        sifter.scrape_titles().await?
    } else if !config.selector.is_empty() {
        sifter.scrape_by_selector(&config.selector).await?
    } else {
        // links are the default extraction; probe connectivity first so an
        // unreachable target is reported before any multi-attempt scrape
        if !sifter.test_connection().await {
            bail!("Connection could not be established.");
        }

        sifter.scrape_links().await?
    };

    if !config.quiet {
        for fragment in &fragments {
            println!("{}", fragment.as_record());
        }
    }

    let written = sifter.save(&config.output, &fragments)?;
    log::info!("wrote {} records to {}", written, config.output);

    log::trace!("exit: wrapped_main");
    Ok(())
}

fn main() -> Result<()> {
    let config = Arc::new(Configuration::new()?);

    // setup logging based on the number of -v's used
    logger::initialize(config.verbosity);

    log::debug!("{:?}", config);

    if let Ok(runtime) = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        let future = wrapped_main(config);

        if let Err(e) = runtime.block_on(future) {
            eprintln!("{}", fmt_err(&format!("{e:#}")));
            std::process::exit(1);
        }
    }

    log::trace!("exit: main");

    Ok(())
}
