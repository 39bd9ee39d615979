//! Login-or-register flow with argon2 password hashing.
//!
//! A single entry point mirrors the login screen: an unknown name registers
//! a fresh profile on the spot, a known name must present the right
//! password. Hashes are stored on the profile record.

use crate::{Error, Profile, ProfileStore, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// What a successful `login_or_register` did
#[derive(Clone, Debug)]
pub enum LoginOutcome {
    /// Existing profile, password verified
    LoggedIn(Profile),
    /// No profile under that name existed; a new one was created and stored
    Registered(Profile),
}

impl LoginOutcome {
    pub fn profile(&self) -> &Profile {
        match self {
            LoginOutcome::LoggedIn(profile) | LoginOutcome::Registered(profile) => profile,
        }
    }
}

/// Hash a plaintext password with a fresh salt
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| Error::Auth(format!("failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored hash
pub fn verify_password(plain: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| Error::Auth(format!("stored password hash is malformed: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Log in under `name`, registering a new profile when the name is unknown.
///
/// A known name with a wrong password is rejected; it does not fall through
/// to registration.
pub fn login_or_register(store: &ProfileStore, name: &str, password: &str) -> Result<LoginOutcome> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Auth("name must not be empty".into()));
    }
    if password.is_empty() {
        return Err(Error::Auth("password must not be empty".into()));
    }

    if let Some(profile) = store.find_profile_by_name(name)? {
        if verify_password(password, &profile.password_hash)? {
            tracing::info!("Profile '{}' logged in", name);
            return Ok(LoginOutcome::LoggedIn(profile));
        }
        return Err(Error::Auth("incorrect name or password".into()));
    }

    let profile = Profile::new(name, hash_password(password)?);
    store.put_profile(&profile)?;
    tracing::info!("Registered new profile '{}' ({})", name, profile.id);
    Ok(LoginOutcome::Registered(profile))
}
