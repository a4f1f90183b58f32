//! `POST /login` as a session [`Authenticator`].

use megamart_protocol::{LoginRequest, LoginResponse};
use megamart_session::{Authenticator, SessionError};

use crate::ApiClient;

impl Authenticator for ApiClient {
    async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse, SessionError> {
        self.login(request)
            .await
            .map_err(|e| SessionError::AuthFailed(e.to_string()))
    }
}
