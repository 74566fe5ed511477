use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<Method>,
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            allowed_methods: vec![
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ],
            max_age_secs: 3600,
        }
    }
}

impl CorsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origins(mut self, origins: &[String]) -> Self {
        self.allowed_origins = origins.to_vec();
        self
    }

    pub fn build(self) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods(self.allowed_methods)
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
            .max_age(std::time::Duration::from_secs(self.max_age_secs));

        if self.allowed_origins.iter().any(|o| o == "*") {
            info!("CORS allows any origin");
            return layer.allow_origin(AllowOrigin::any());
        }

        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {origin}");
                    None
                }
            })
            .collect();
        info!("CORS configured with {} allowed origins", origins.len());
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    CorsConfig::new().with_origins(origins).build()
}
