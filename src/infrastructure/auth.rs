use crate::domain::auth::{AuthService, Claims, Role};
use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::fs;

/// Session token service signing ES256 JWTs
pub struct JwtAuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtAuthService {
    /// Load PEM keys from disk
    pub fn new(
        private_key_path: &str,
        public_key_path: &str,
        access_token_expiry: i64,
        refresh_token_expiry: i64,
    ) -> Result<Self> {
        let private_key_pem = fs::read(private_key_path)
            .map_err(|e| anyhow::anyhow!("Failed to read private key file: {}", e))?;
        let public_key_pem = fs::read(public_key_path)
            .map_err(|e| anyhow::anyhow!("Failed to read public key file: {}", e))?;

        Self::new_from_keys(
            &private_key_pem,
            &public_key_pem,
            access_token_expiry,
            refresh_token_expiry,
        )
    }

    pub fn new_from_keys(
        private_key_pem: &[u8],
        public_key_pem: &[u8],
        access_token_expiry: i64,
        refresh_token_expiry: i64,
    ) -> Result<Self> {
        let encoding_key = EncodingKey::from_ec_pem(private_key_pem)
            .map_err(|e| anyhow::anyhow!("Failed to parse private key: {}", e))?;
        let decoding_key = DecodingKey::from_ec_pem(public_key_pem)
            .map_err(|e| anyhow::anyhow!("Failed to parse public key: {}", e))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            access_token_expiry,
            refresh_token_expiry,
        })
    }

    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }

    fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::ES256), claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to sign {} token: {}", claims.token_type, e))
    }
}

impl AuthService for JwtAuthService {
    fn generate_access_token(&self, uid: &str, email: &str, role: Role) -> Result<String> {
        self.sign(&Claims::new_access_token(
            uid,
            email,
            role,
            self.access_token_expiry,
        ))
    }

    fn generate_refresh_token(&self, uid: &str, email: &str, role: Role) -> Result<String> {
        self.sign(&Claims::new_refresh_token(
            uid,
            email,
            role,
            self.refresh_token_expiry,
        ))
    }

    fn validate_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::ES256);
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }
}
