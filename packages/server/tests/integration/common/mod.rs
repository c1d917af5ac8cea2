use std::net::SocketAddr;
use std::sync::Arc;

use client::Directory;
use client::backend::local::Seed;
use client::backend::{LocalBackend, RestBackend, TableStore};
use common::config::BackendConfig;
use reqwest::Client;
use serde_json::{Value, json};

use server::config::{AppConfig, CorsConfig, ServerConfig};
use server::state::AppState;

pub mod routes {
    pub const LANDING: &str = "/api/v1/landing";
    pub const COMPANIES: &str = "/api/v1/companies";
    pub const OPENAPI: &str = "/api-docs/openapi.json";

    pub fn company(slug: &str) -> String {
        format!("/api/v1/companies/{slug}")
    }

    pub fn search(query: &str) -> String {
        format!("/api/v1/companies?q={query}")
    }
}

/// Tables shared by the tests: three companies, one with a full profile.
pub fn seed() -> Seed {
    serde_json::from_value(json!({
        "tables": {
            "companies": [
                {
                    "id": "c1", "user_id": "u1", "slug": "techcali-solutions",
                    "company_name": "TechCali Solutions", "category": "empresa",
                    "industry": "Technology", "services": ["Web Development", "Mobile Apps"],
                    "custom_color": "#123456",
                    "links": [
                        {"id": "website", "title": "Website", "url": "https://techcali.co",
                         "clicks": 4, "is_active": true, "type": "custom"},
                        {"id": "old-shop", "title": "Old shop", "url": "https://old.techcali.co",
                         "clicks": 0, "is_active": false, "type": "custom"}
                    ]
                },
                {
                    "id": "c2", "user_id": "u2", "slug": "ecoverde-cali",
                    "company_name": "EcoVerde Cali", "category": "egresado",
                    "industry": "Sustainability", "services": ["Recycling"],
                    "social_links": {"instagram": "@ecoverde"}, "links": null
                },
                {
                    "id": "c3", "user_id": "u3", "slug": "academia-andina",
                    "company_name": "Academia Andina", "category": "instructor",
                    "services": ["Software Training"], "industry": null,
                    "social_links": null, "links": null, "website": null
                }
            ],
            "products": [
                {"id": "p1", "company_id": "c1", "name": "Landing page", "price": 1500000.0,
                 "currency": "COP", "display_order": 1},
                {"id": "p2", "company_id": "c1", "name": "Mobile app", "price": 9000000.0,
                 "currency": "COP", "display_order": 0},
                {"id": "p3", "company_id": "c1", "name": "Legacy plan", "price": 1.0,
                 "currency": "COP", "is_active": false}
            ],
            "company_images": [
                {"id": "i1", "company_id": "c1", "image_type": "cover", "image_url": "http://img/cover.jpg"},
                {"id": "i2", "company_id": "c1", "image_type": "gallery", "image_url": "http://img/g1.jpg", "display_order": 1}
            ],
            "reviews": [
                {"id": "r1", "company_id": "c1", "rating": 5, "author_name": "Ana", "is_approved": true,
                 "created_at": "2024-03-01T12:00:00Z"},
                {"id": "r2", "company_id": "c1", "rating": 3, "author_name": "Luis", "is_approved": true,
                 "created_at": "2024-04-01T12:00:00Z"},
                {"id": "r3", "company_id": "c1", "rating": 1, "author_name": "Spam", "is_approved": false}
            ],
            "business_hours": [
                {"id": "h1", "company_id": "c1", "day_of_week": 0, "open_time": "08:00:00", "close_time": "18:00:00"},
                {"id": "h2", "company_id": "c1", "day_of_week": 5, "is_24_hours": true}
            ]
        }
    }))
    .expect("seed should parse")
}

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

fn app_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors: CorsConfig {
                allow_origins: vec![],
                max_age: 3600,
            },
        },
        backend: BackendConfig::default(),
    }
}

impl TestApp {
    /// Serve the shared seed from an in-process backend.
    pub async fn spawn() -> Self {
        Self::spawn_with(Arc::new(LocalBackend::from_seed(seed()))).await
    }

    /// Serve against a REST backend nobody listens on.
    pub async fn spawn_unreachable() -> Self {
        let backend = RestBackend::new("http://127.0.0.1:1", "anon-key")
            .expect("Failed to build REST client");
        Self::spawn_with(Arc::new(backend)).await
    }

    async fn spawn_with(tables: Arc<dyn TableStore>) -> Self {
        let state = AppState {
            directory: Directory::new(tables),
            config: app_config(),
        };

        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    /// Slugs of a company list response, in order.
    pub fn slugs(&self) -> Vec<&str> {
        self.body["data"]
            .as_array()
            .expect("response body should contain 'data'")
            .iter()
            .filter_map(|entry| entry["slug"].as_str())
            .collect()
    }
}
