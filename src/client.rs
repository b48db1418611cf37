use std::time::Duration;

use anyhow::Result;
use reqwest::{redirect::Policy, Client, Proxy};

/// Create and return an instance of
/// [reqwest::Client](https://docs.rs/reqwest/latest/reqwest/struct.Client.html)
/// configured for single-page fetches
pub fn initialize(
    timeout: u64,
    user_agent: &str,
    redirects: bool,
    insecure: bool,
    proxy: Option<&str>,
) -> Result<Client> {
    let policy = if redirects {
        Policy::limited(10)
    } else {
        Policy::none()
    };

    let mut client = Client::builder()
        .timeout(Duration::new(timeout, 0))
        .user_agent(user_agent)
        .danger_accept_invalid_certs(insecure)
        .redirect(policy)
        .http1_title_case_headers();

    if let Some(some_proxy) = proxy {
        if !some_proxy.is_empty() {
            // it's not an empty string; set the proxy
            let proxy_obj = Proxy::all(some_proxy)?;
            // just add the proxy to the client
            // don't build and return it just yet
            client = client.proxy(proxy_obj);
        }
    }

    Ok(client.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    /// create client with a bad proxy, expect panic
    fn client_with_bad_proxy() {
        initialize(0, "stuff", true, false, Some("not a valid proxy")).unwrap();
    }

    #[test]
    /// create client with a proxy, expect no error
    fn client_with_good_proxy() {
        let proxy = "http://127.0.0.1:8080";
        initialize(0, "stuff", true, true, Some(proxy)).unwrap();
    }

    #[test]
    /// create client with an empty proxy string, which is simply ignored
    fn client_with_empty_proxy() {
        initialize(7, "stuff", false, false, Some("")).unwrap();
    }

    #[test]
    /// create client without a proxy, expect no error
    fn client_without_proxy() {
        initialize(7, "stuff", false, false, None).unwrap();
    }
}
