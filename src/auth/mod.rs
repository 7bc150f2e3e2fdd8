// Authentication: OIDC login against the configured provider, first-party
// JWT pair for API calls

pub mod errors;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod oidc;
pub mod service;

pub use errors::AuthError;
pub use jwt::{extract_bearer_token, JwtService};
pub use middleware::{cors_layer, jwt_auth_middleware, security_headers_layer};
pub use models::{
    AuthResponse, Claims, MessageResponse, RefreshTokenRequest, TokenResponse, UserRole,
    UserSession,
};
pub use oidc::{OidcClaims, OidcClient, OidcDiscovery, OidcTokenResponse};
pub use service::AuthService;
