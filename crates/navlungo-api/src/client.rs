use std::fmt::{Debug, Formatter};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::credentials::NavlungoCredentials;
use crate::error::{ClientError, TransportError};
use crate::schemas::{
    AddressRequest, CancelPostRequest, CreatePostRequest, CreateTokenRequest, GetAllAddressRequest,
    GetAllCarriersRequest, GetBarcodeRequest, TokenResponse, UpdatePostRequest,
};
use crate::validation::Schema;

trait ResponseExt {
    fn map_to_navlungo_err(self) -> Result<reqwest::blocking::Response, TransportError>;
}

impl ResponseExt for reqwest::blocking::Response {
    fn map_to_navlungo_err(self) -> Result<reqwest::blocking::Response, TransportError> {
        let status = self.status();
        if status.is_success() {
            Ok(self)
        } else {
            let url = self.url().clone();
            let body = self.text()?;
            log::warn!("{url} responded with {status}");
            Err(TransportError::Status { status, body })
        }
    }
}

/// A client for making HTTP requests to the Navlungo API.
///
/// Every operation validates its payload before anything is sent, so a
/// [`ClientError::Validation`] always means no request left the process.
///
/// The client is a session: [`Client::create_token`] and [`Client::login`]
/// replace the bearer token attached to every later request made through the
/// same instance. Both take `&mut self`; callers sharing a client across
/// threads must serialize those calls themselves, or use one client per
/// session.
#[derive(Clone)]
pub struct Client {
    http_client: reqwest::blocking::Client,
    base_url: Url,
    token: Option<String>,
    default_headers: HeaderMap,
}

impl Client {
    /// Create a new client for `base_url`, optionally already authenticated.
    pub fn new(base_url: &str, api_token: Option<&str>) -> Result<Self, ClientError> {
        let mut config = ClientConfig::default().with_base_url(base_url);
        config.api_token = api_token.map(str::to_string);
        Self::from_config(&config)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.parsed_base_url()?;
        let http_client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        let mut client = Client {
            http_client,
            base_url,
            token: None,
            default_headers: HeaderMap::new(),
        };
        if let Some(token) = &config.api_token {
            client.set_token(token.clone())?;
        }

        Ok(client)
    }

    /// Create a client configured from `NAVLUNGO_*` environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The bearer token currently attached to requests.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn create_post(&self, data: &Value) -> Result<Value, ClientError> {
        self.send::<CreatePostRequest>(Method::POST, &["post", "create"], data)
    }

    pub fn update_post(&self, data: &Value) -> Result<Value, ClientError> {
        self.send::<UpdatePostRequest>(Method::POST, &["post", "update"], data)
    }

    pub fn check_post(&self, post_number: &str) -> Result<Value, ClientError> {
        let url = self.endpoint(&["post", "check", post_number])?;
        self.req::<()>(Method::GET, url, None)
    }

    pub fn cancel_post(&self, data: &Value) -> Result<Value, ClientError> {
        self.send::<CancelPostRequest>(Method::POST, &["post", "cancel"], data)
    }

    pub fn create_address(&self, data: &Value) -> Result<Value, ClientError> {
        self.send::<AddressRequest>(Method::POST, &["address-book", "create"], data)
    }

    pub fn update_address(&self, address_id: u64, data: &Value) -> Result<Value, ClientError> {
        let id = address_id.to_string();
        self.send::<AddressRequest>(Method::PUT, &["address-book", "update", id.as_str()], data)
    }

    pub fn get_address(&self, address_id: u64) -> Result<Value, ClientError> {
        let id = address_id.to_string();
        let url = self.endpoint(&["address-book", "get", id.as_str()])?;
        self.req::<()>(Method::GET, url, None)
    }

    /// List address-book entries. The query travels as a JSON body on the GET.
    pub fn get_all_addresses(&self, data: &Value) -> Result<Value, ClientError> {
        self.send::<GetAllAddressRequest>(Method::GET, &["address-book", "getAll"], data)
    }

    pub fn delete_address(&self, address_id: u64) -> Result<Value, ClientError> {
        let id = address_id.to_string();
        let url = self.endpoint(&["address-book", "delete", id.as_str()])?;
        self.req::<()>(Method::DELETE, url, None)
    }

    pub fn get_all_carriers(&self, data: &Value) -> Result<Value, ClientError> {
        self.send::<GetAllCarriersRequest>(Method::GET, &["carrier", "getAll"], data)
    }

    pub fn get_my_carriers(&self, data: &Value) -> Result<Value, ClientError> {
        self.send::<GetAllCarriersRequest>(Method::GET, &["carrier", "my-carriers"], data)
    }

    pub fn get_barcode(&self, data: &Value) -> Result<Value, ClientError> {
        self.send::<GetBarcodeRequest>(Method::POST, &["barcode", "getBarcode"], data)
    }

    /// Exchange a username/password payload for a bearer token.
    ///
    /// On success the token from `data.access_token` replaces the one held by
    /// this client, and the full response is returned.
    pub fn create_token(&mut self, data: &Value) -> Result<Value, ClientError> {
        let request = CreateTokenRequest::from_value(data)?;
        self.authenticate(&request)
    }

    /// Same as [`Client::create_token`], from typed credentials.
    pub fn login(&mut self, credentials: &NavlungoCredentials) -> Result<Value, ClientError> {
        self.authenticate(&CreateTokenRequest::from(credentials))
    }

    fn authenticate(&mut self, request: &CreateTokenRequest) -> Result<Value, ClientError> {
        let url = self.endpoint(&["auth", "api"])?;
        let response = self.req(Method::POST, url, Some(request))?;

        let token = TokenResponse::deserialize(&response)
            .map_err(|e| {
                TransportError::MalformedResponse(format!("no data.access_token in response: {e}"))
            })?
            .data
            .access_token;
        self.set_token(token)?;
        log::info!("Obtained a new access token for {}", request.username);

        Ok(response)
    }

    fn set_token(&mut self, token: String) -> Result<(), ClientError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ClientError::InvalidToken)?;
        value.set_sensitive(true);

        self.default_headers.insert(AUTHORIZATION, value);
        self.token = Some(token);
        Ok(())
    }

    fn send<S: Schema>(
        &self,
        method: Method,
        segments: &[&str],
        data: &Value,
    ) -> Result<Value, ClientError> {
        let request = S::from_value(data)?;
        let url = self.endpoint(segments)?;
        self.req(method, url, Some(&request))
    }

    fn req<T: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: Option<&T>,
    ) -> Result<Value, ClientError> {
        log::debug!("{method} {url}");

        let request_builder = self
            .http_client
            .request(method, url)
            .headers(self.default_headers.clone());

        let request_builder = if let Some(body) = body {
            request_builder.json(body)
        } else {
            request_builder
        };

        let response = request_builder.send()?.map_to_navlungo_err()?;
        let text = response.text()?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let json = serde_json::from_str(&text)
            .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;
        Ok(json)
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}
