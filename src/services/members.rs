//! Member registration, login and listing

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::member::{Credentials, MemberInfo, MemberSummary, RegisterMember},
    repository::Repository,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Check credentials and return the member's identity
    pub async fn login(&self, credentials: &Credentials) -> AppResult<MemberInfo> {
        let member = self
            .repository
            .members
            .get_by_username(&credentials.username)
            .await?
            .ok_or_else(|| AppError::Authentication(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(&member.password, &credentials.password)? {
            tracing::info!("Rejected login for member {}", member.member_id);
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        tracing::info!("Member {} logged in as {}", member.member_id, member.role);
        Ok(MemberInfo::from(&member))
    }

    /// Register a new member with the `user` role
    pub async fn register(&self, request: RegisterMember) -> AppResult<MemberSummary> {
        request.validate()?;

        let password_hash = hash_password(&request.password)?;
        let member = self
            .repository
            .members
            .create(&request.username, &password_hash, &request.full_name)
            .await?;

        tracing::info!("Registered member {} ({})", member.member_id, member.username);
        Ok(member)
    }

    /// List all members, newest first
    pub async fn list_members(&self) -> AppResult<Vec<MemberSummary>> {
        self.repository.members.list().await
    }
}

/// Hash a password using Argon2 with a random salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
