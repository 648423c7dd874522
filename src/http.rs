//! Blocking HTTP plumbing shared by the service clients.

use log::debug;
use reqwest::blocking::{Client, RequestBuilder};

use crate::config::Config;
use crate::error::LookupError;


/// Build the client used for every service request
///
pub fn client(config: &Config) -> Result<Client, LookupError> {
    let client = Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str())
        .build()?;
    Ok(client)
}


/// Send `request` and return the body of a successful response
///
/// # Errors
///
/// Transport failures become [`LookupError::Transport`], any non-2xx status becomes
/// [`LookupError::Status`].
///
pub fn fetch(request: RequestBuilder) -> Result<String, LookupError> {
    let response = request.send()?;
    let status = response.status();
    debug!("{} answered {}", response.url(), status);

    if !status.is_success() {
        return Err(LookupError::Status(status));
    }
    Ok(response.text()?)
}

