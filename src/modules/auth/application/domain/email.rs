use email_address::EmailAddress;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailError {
    #[error("Email cannot be empty")]
    Empty,

    #[error("Invalid email format")]
    InvalidFormat,
}

/// Trims the address and lower-cases the domain part. The local part is kept
/// as typed since some providers treat it case-sensitively.
pub fn normalize_email(raw: &str) -> Result<String, EmailError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(EmailError::Empty);
    }
    if !EmailAddress::is_valid(email) {
        return Err(EmailError::InvalidFormat);
    }

    match email.rsplit_once('@') {
        Some((local, domain)) => Ok(format!("{local}@{}", domain.to_lowercase())),
        None => Err(EmailError::InvalidFormat),
    }
}

/// Local part of an already normalized address.
pub fn local_part(email: &str) -> &str {
    email.rsplit_once('@').map(|(local, _)| local).unwrap_or(email)
}
