use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

#[derive(Debug)]
pub enum Error {
    HashingFailed,
    MalformedHash,
}

/// Hashes with the default Argon2id parameters and returns a PHC string.
pub fn hash(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            tracing::error!("Failed to hash password: {}", err);
            Error::HashingFailed
        })
}

pub fn verify(password: &str, hash: &str) -> Result<bool, Error> {
    let parsed_hash = PasswordHash::new(hash).map_err(|err| {
        tracing::error!("Stored password hash is malformed: {}", err);
        Error::MalformedHash
    })?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn verifies_the_hashed_password_only() {
        let hashed = hash("s3cret-pass").unwrap();

        assert!(hashed.starts_with("$argon2id$"));
        assert!(verify("s3cret-pass", &hashed).unwrap());
        assert!(!verify("wrong-pass", &hashed).unwrap());
    }

    #[test]
    fn sentinel_is_not_a_valid_hash() {
        assert!(verify("anything", "FIREBASE").is_err());
    }
}
