//! Credential storage.
//!
//! Credentials are kept in a dotenv file with `HOST`, `EMAIL` and
//! `PASSWORD` keys. Values are written double-quoted, escaping `\`, `"`,
//! `$` and newlines the way dotenvy reads them back. The password is never
//! printed by `Debug`.

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::Path;

/// Default credentials file name.
pub const DEFAULT_CREDENTIALS_FILE: &str = "credentials.env";

/// PocketBase superuser credentials.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Credentials {
    /// PocketBase host URL.
    pub host: String,
    /// Superuser email.
    pub email: String,
    /// Superuser password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns true if every value is present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.host.is_empty() && !self.email.is_empty() && !self.password.is_empty()
    }

    /// Fills empty values from `other`.
    #[must_use]
    pub fn or(mut self, other: Self) -> Self {
        if self.host.is_empty() {
            self.host = other.host;
        }
        if self.email.is_empty() {
            self.email = other.email;
        }
        if self.password.is_empty() {
            self.password = other.password;
        }
        self
    }

    /// Loads credentials from a dotenv file.
    ///
    /// Missing keys are left empty. The process environment is not touched.
    ///
    /// # Errors
    /// Returns `ClientError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ClientError> {
        let mut credentials = Self::default();

        let entries = dotenvy::from_path_iter(path).map_err(dotenv_error)?;
        for entry in entries {
            let (key, value) = entry.map_err(dotenv_error)?;
            match key.as_str() {
                "HOST" => credentials.host = value,
                "EMAIL" => credentials.email = value,
                "PASSWORD" => credentials.password = value,
                _ => tracing::debug!("Ignoring unknown credentials key {}", key),
            }
        }

        tracing::debug!("Loaded credentials from {}", path.display());
        Ok(credentials)
    }

    /// Loads credentials if the file exists.
    ///
    /// # Errors
    /// Returns `ClientError` if the file exists but cannot be loaded.
    pub fn load_if_exists(path: &Path) -> Result<Option<Self>, ClientError> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Saves the credentials as a dotenv file, replacing any existing one.
    ///
    /// # Errors
    /// Returns `ClientError` if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ClientError> {
        let mut file = std::fs::File::create(path)?;
        writeln!(file, "HOST={}", quote(&self.host))?;
        writeln!(file, "EMAIL={}", quote(&self.email))?;
        writeln!(file, "PASSWORD={}", quote(&self.password))?;
        file.sync_all()?;

        tracing::info!("Saved credentials to {}", path.display());
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub(crate) fn dotenv_error(err: dotenvy::Error) -> ClientError {
    match err {
        dotenvy::Error::Io(io) => ClientError::Io(io),
        other => ClientError::credentials(other.to_string()),
    }
}

/// Quotes a value for a dotenv file.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' | '"' | '$' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\n"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
