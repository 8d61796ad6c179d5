// security/src/lib.rs
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind as JwtErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

use models::errors::{ErrorKind, HostelError};
use models::hostel::{Role, User};

pub mod middleware;
pub mod roles;

pub use middleware::{AdminUser, AuthenticatedUser};
pub use roles::RolesConfig;

/// Claims for JWT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User id
    pub email: String,
    pub role: Role,
    pub iat: u64, // Issued at
    pub exp: u64, // Expiration time
}

/// Custom authentication errors.
#[derive(Debug)]
pub enum AuthError {
    InvalidCredentials,
    MissingToken,
    InvalidToken(String),
    TokenExpired,
    AccountDisabled,
    Forbidden(String),
    JwtError(String),
    PasswordHashError(String),
    Storage(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::MissingToken => write!(f, "Missing or malformed bearer token"),
            AuthError::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::AccountDisabled => write!(f, "Account is disabled"),
            AuthError::Forbidden(msg) => write!(f, "Permission denied: {}", msg),
            AuthError::JwtError(msg) => write!(f, "JWT error: {}", msg),
            AuthError::PasswordHashError(msg) => write!(f, "Password hashing error: {}", msg),
            AuthError::Storage(msg) => write!(f, "Account lookup failed: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken(_)
            | AuthError::TokenExpired => ErrorKind::Authentication,
            AuthError::AccountDisabled | AuthError::Forbidden(_) => ErrorKind::Authorization,
            AuthError::JwtError(_) | AuthError::PasswordHashError(_) | AuthError::Storage(_) => ErrorKind::Server,
        }
    }
}

impl From<AuthError> for HostelError {
    fn from(err: AuthError) -> Self {
        match err.kind() {
            ErrorKind::Authentication => HostelError::Authentication(err.to_string()),
            ErrorKind::Authorization => HostelError::Authorization(err.to_string()),
            _ => HostelError::InternalError(err.to_string()),
        }
    }
}

/// Hashes a password using Argon2 with a random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHashError(format!("Failed to hash password with Argon2: {}", e)))
}

/// Verifies a password against an Argon2 hash. A mismatch is `Ok(false)`.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AuthError> {
    let password_hash = PasswordHash::new(hashed_password)
        .map_err(|e| AuthError::PasswordHashError(format!("Failed to parse Argon2 password hash: {}", e)))?;
    match Argon2::default().verify_password(password.as_bytes(), &password_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswordHashError(format!("Failed to verify Argon2 password: {}", e))),
    }
}

/// Issues and validates HS256 bearer tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Generates a JWT token for `user`.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp().max(0) as u64,
            exp: (now + self.ttl).timestamp().max(0) as u64,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::JwtError(format!("Failed to encode JWT: {}", e)))
    }

    /// Decodes and validates a JWT token.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }
}
