//! The HTTP client and its credential-bound view.

use megamart_protocol::{
    ApiMessage, Category, Credential, LoginRequest, LoginResponse, NewCategory, NewOrder, Order,
    Product, ProductForm, Stock, StockDto, User, UserForm, validate,
};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::LOGIN_FAILED;
use crate::{ClientConfig, ClientError};

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// A client for one backend.
///
/// Cloning is cheap: `reqwest::Client` is reference-counted internally,
/// so every view can hold its own copy.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for `config.base_url`.
    ///
    /// # Errors
    /// [`ClientError::Http`] if the TLS backend cannot be initialised.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_http(http, config))
    }

    /// Uses a caller-supplied `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, config: ClientConfig) -> Self {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchanges a username and password for a credential.
    ///
    /// The form is checked locally first; an empty field never reaches
    /// the network. Every other failure (rejected login, unreachable
    /// backend, unexpected body) becomes
    /// [`ClientError::InvalidCredentials`] with the server's message when
    /// it sent one, or a generic one otherwise.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        validate::login(request)?;

        let response = match self.http.post(self.url("/login")).json(request).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(error = %e, "login request failed");
                return Err(ClientError::InvalidCredentials(LOGIN_FAILED.into()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            tracing::debug!(status = status.as_u16(), "login rejected");
            return Err(ClientError::InvalidCredentials(
                message.unwrap_or_else(|| LOGIN_FAILED.into()),
            ));
        }

        response.json::<LoginResponse>().await.map_err(|e| {
            tracing::debug!(error = %e, "login response did not decode");
            ClientError::InvalidCredentials(LOGIN_FAILED.into())
        })
    }

    /// Binds `credential` to this client for resource calls.
    pub fn authorized(&self, credential: Credential) -> Authorized {
        Authorized {
            client: self.clone(),
            credential,
        }
    }
}

/// Pulls `message` out of an error body, if there is one.
async fn error_message(response: Response) -> Option<String> {
    response
        .json::<ApiMessage>()
        .await
        .ok()
        .and_then(|body| body.message)
}

/// Maps a non-success status to an error, passing success through.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ClientError::Unauthorized {
            status: status.as_u16(),
        });
    }
    Err(ClientError::Status {
        status: status.as_u16(),
        message: error_message(response).await,
    })
}

// ---------------------------------------------------------------------------
// Authorized
// ---------------------------------------------------------------------------

/// An [`ApiClient`] carrying a credential.
///
/// Owns its data (`'static`), so a view can move it into a spawned task.
/// Each method is one request; forms are validated before sending where a
/// local check exists.
#[derive(Debug, Clone)]
pub struct Authorized {
    client: ApiClient,
    credential: Credential,
}

impl Authorized {
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .http
            .request(method, self.client.url(path))
            .bearer_auth(self.credential.as_str())
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = check(self.request(Method::GET, path).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response, ClientError> {
        tracing::debug!(%method, path, "sending");
        check(self.request(method, path).json(body).send().await?).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        tracing::debug!(path, "deleting");
        check(self.request(Method::DELETE, path).send().await?).await?;
        Ok(())
    }

    // -- Categories -------------------------------------------------------

    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.fetch("/category").await
    }

    pub async fn create_category(&self, form: &NewCategory) -> Result<(), ClientError> {
        validate::category(form)?;
        self.send(Method::POST, "/category", form).await?;
        Ok(())
    }

    // -- Products ---------------------------------------------------------

    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        self.fetch("/items").await
    }

    /// Creates a product and returns it with its new id.
    pub async fn create_product(&self, form: &ProductForm) -> Result<Product, ClientError> {
        validate::product(form)?;
        let response = self.send(Method::POST, "/items", form).await?;
        Ok(response.json().await?)
    }

    pub async fn update_product(&self, id: i64, form: &ProductForm) -> Result<(), ClientError> {
        validate::product(form)?;
        self.send(Method::PUT, &format!("/items/{id}"), form).await?;
        Ok(())
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/items/{id}")).await
    }

    // -- Stock ------------------------------------------------------------

    pub async fn list_stock(&self) -> Result<Vec<Stock>, ClientError> {
        self.fetch("/stock").await
    }

    /// Opens a stock row for a product. `line.id` is the product id.
    pub async fn create_stock(&self, line: StockDto) -> Result<(), ClientError> {
        validate::quantity(line.qty)?;
        self.send(Method::POST, "/stock", &line).await?;
        Ok(())
    }

    /// Overwrites a stock row's quantity. `line.id` is the stock id.
    pub async fn update_stock(&self, line: StockDto) -> Result<(), ClientError> {
        validate::quantity(line.qty)?;
        self.send(Method::PUT, "/stock", &line).await?;
        Ok(())
    }

    /// Adds each line's quantity to its stock row.
    pub async fn add_to_stock(&self, batch: &[StockDto]) -> Result<(), ClientError> {
        validate::stock_batch(batch)?;
        self.send(Method::PUT, "/stock/addto", batch).await?;
        Ok(())
    }

    /// Takes each line's quantity out of its stock row (a sale).
    pub async fn take_from_stock(&self, batch: &[StockDto]) -> Result<(), ClientError> {
        validate::stock_batch(batch)?;
        self.send(Method::PUT, "/stock/getfrom", batch).await?;
        Ok(())
    }

    // -- Orders -----------------------------------------------------------

    pub async fn list_orders(&self) -> Result<Vec<Order>, ClientError> {
        self.fetch("/orders").await
    }

    pub async fn create_order(&self, order: &NewOrder) -> Result<(), ClientError> {
        self.send(Method::POST, "/orders", order).await?;
        Ok(())
    }

    // -- Users ------------------------------------------------------------

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.fetch("/users").await
    }

    /// Checks only that every field is filled in. Username uniqueness
    /// needs the current user list; see [`validate::user`].
    pub async fn create_user(&self, form: &UserForm) -> Result<(), ClientError> {
        validate::user(form, &[], None)?;
        self.send(Method::POST, "/users", form).await?;
        Ok(())
    }

    pub async fn update_user(&self, id: i64, form: &UserForm) -> Result<(), ClientError> {
        validate::user(form, &[], Some(id))?;
        self.send(Method::PUT, &format!("/users/{id}"), form).await?;
        Ok(())
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/users/{id}")).await
    }
}
