//! Client for a Supabase-compatible service: PostgREST tables under
//! `/rest/v1`, GoTrue auth under `/auth/v1` and storage under `/storage/v1`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::RwLock;
use tracing::debug;

use super::{AuthProvider, AuthUser, BackendError, ObjectStore, Query, TableStore};

#[derive(Debug, Clone)]
struct Session {
    access_token: String,
    user: AuthUser,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

pub struct RestBackend {
    http: Client,
    base_url: String,
    anon_key: String,
    session: RwLock<Option<Session>>,
}

impl RestBackend {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, BackendError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            session: RwLock::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach the API key and the bearer token: the session's when signed
    /// in, the anon key otherwise.
    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self
            .session
            .read()
            .await
            .as_ref()
            .map_or_else(|| self.anon_key.clone(), |s| s.access_token.clone());
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
    }

    fn row_query(query: &Query) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(
            query
                .filters
                .iter()
                .map(|(column, value)| (column.clone(), format!("eq.{value}"))),
        );
        if let Some((column, direction)) = &query.order {
            params.push(("order".into(), format!("{column}.{}", direction.as_str())));
        }
        params
    }

    fn by_id(id: &str) -> [(&'static str, String); 1] {
        [("id", format!("eq.{id}"))]
    }
}

/// Turn a non-success response into [`BackendError::Status`], pulling the
/// message out of the usual error body shapes.
async fn check(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|key| body.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or(text);
    Err(BackendError::Status { status, message })
}

#[async_trait]
impl TableStore for RestBackend {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, BackendError> {
        debug!(table, ?query, "select");
        let request = self
            .http
            .get(self.url(&format!("/rest/v1/{table}")))
            .query(&Self::row_query(query));
        let response = check(self.authorize(request).await.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, BackendError> {
        debug!(table, "insert");
        let request = self
            .http
            .post(self.url(&format!("/rest/v1/{table}")))
            .header("Prefer", "return=representation")
            .json(&row);
        let response = check(self.authorize(request).await.send().await?).await?;
        let rows: Vec<Value> = response.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(format!("inserted `{table}` row")))
    }

    async fn update(&self, table: &str, id: &str, patch: Value) -> Result<(), BackendError> {
        debug!(table, id, "update");
        let request = self
            .http
            .patch(self.url(&format!("/rest/v1/{table}")))
            .query(&Self::by_id(id))
            .json(&patch);
        check(self.authorize(request).await.send().await?).await?;
        Ok(())
    }

    async fn delete(&self, table: &str, id: &str) -> Result<(), BackendError> {
        debug!(table, id, "delete");
        let request = self
            .http
            .delete(self.url(&format!("/rest/v1/{table}")))
            .query(&Self::by_id(id));
        check(self.authorize(request).await.send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for RestBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        let response = self
            .http
            .post(self.url("/auth/v1/token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let response = match check(response).await {
            Err(BackendError::Status { status, .. }) if status.is_client_error() => {
                return Err(BackendError::InvalidCredentials);
            }
            other => other?,
        };
        let token: TokenResponse = response.json().await?;
        let user = token.user.clone();
        *self.session.write().await = Some(Session {
            access_token: token.access_token,
            user: token.user,
        });
        Ok(user)
    }

    async fn current_user(&self) -> Result<Option<AuthUser>, BackendError> {
        let Some(session) = self.session.read().await.clone() else {
            return Ok(None);
        };
        let response = self
            .http
            .get(self.url("/auth/v1/user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            *self.session.write().await = None;
            return Ok(None);
        }
        let user: AuthUser = check(response).await?.json().await?;
        Ok(Some(user))
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let Some(session) = self.session.write().await.take() else {
            return Ok(());
        };
        let response = self
            .http
            .post(self.url("/auth/v1/logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        check(response).await?;
        debug!(user = %session.user.id, "signed out");
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for RestBackend {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<(), BackendError> {
        debug!(bucket, key, size = bytes.len(), "upload");
        let request = self
            .http
            .post(self.url(&format!("/storage/v1/object/{bucket}/{key}")))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", upsert.to_string())
            .body(bytes);
        check(self.authorize(request).await.send().await?).await?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        self.url(&format!("/storage/v1/object/public/{bucket}/{key}"))
    }
}
