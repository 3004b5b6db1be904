//! Static identity used for the password grant.
//!
//! All credential types implement custom Debug to redact sensitive data.

use crate::error::{Error, ErrorKind, Result};

/// How the org is addressed before (and possibly after) the token exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instance {
    /// My Domain name, e.g. `"acme"` → `acme.my.salesforce.com`.
    /// The host is never replaced by the token response.
    Named(String),
    /// `login.salesforce.com`.
    Production,
    /// `test.salesforce.com`.
    Sandbox,
    /// An explicit login host (e.g. a local test server).
    LoginHost(String),
}

impl Instance {
    /// Host to connect to before any token exchange.
    pub fn host(&self) -> String {
        match self {
            Instance::Named(name) => format!("{}.my.salesforce.com", name),
            Instance::Production => crate::PRODUCTION_LOGIN_HOST.to_string(),
            Instance::Sandbox => crate::SANDBOX_LOGIN_HOST.to_string(),
            Instance::LoginHost(host) => host.clone(),
        }
    }

    /// Returns true if the host was given as an instance name.
    pub fn is_named(&self) -> bool {
        matches!(self, Instance::Named(_))
    }
}

/// Client and resource-owner credentials for the OAuth 2.0 password grant.
///
/// Set once at construction. `client_secret` and `password` are redacted in
/// Debug output.
#[derive(Clone)]
pub struct Credentials {
    instance: Instance,
    client_id: String,
    client_secret: String,
    username: String,
    password: String,
    api_version: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("instance", &self.instance)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Credentials {
    /// Create credentials for an instance selector.
    pub fn new(
        instance: Instance,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            instance,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: username.into(),
            password: password.into(),
            api_version: sflite_client::DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Credentials addressed by My Domain instance name.
    pub fn named(
        instance_name: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::new(
            Instance::Named(instance_name.into()),
            client_id,
            client_secret,
            username,
            password,
        )
    }

    /// Credentials for production (`is_prod`) or sandbox login.
    pub fn for_environment(
        is_prod: bool,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let instance = if is_prod {
            Instance::Production
        } else {
            Instance::Sandbox
        };
        Self::new(instance, client_id, client_secret, username, password)
    }

    /// Credentials for an explicit login host.
    pub fn with_login_host(
        host: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::new(
            Instance::LoginHost(host.into()),
            client_id,
            client_secret,
            username,
            password,
        )
    }

    /// Change the API version. Accepts `"60.0"` or `"v60.0"`.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = normalize_api_version(&version.into());
        self
    }

    /// Load credentials from environment variables.
    ///
    /// Exactly one of:
    /// - `SF_INSTANCE_NAME` or `SALESFORCE_INSTANCE_NAME`
    /// - `SF_IS_PROD` or `SALESFORCE_IS_PROD` (`true`/`false`)
    /// - `SF_LOGIN_HOST` or `SALESFORCE_LOGIN_HOST`
    ///
    /// Required:
    /// - `SF_CLIENT_ID`, `SF_CLIENT_SECRET`, `SF_USERNAME`, `SF_PASSWORD`
    ///   (or their `SALESFORCE_` equivalents)
    ///
    /// Optional:
    /// - `SF_API_VERSION` or `SALESFORCE_API_VERSION` (default: "58.0")
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load credentials through an arbitrary variable lookup.
    ///
    /// Same keys as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| {
            lookup(&format!("SF_{name}"))
                .or_else(|| lookup(&format!("SALESFORCE_{name}")))
                .filter(|v| !v.is_empty())
        };
        let required = |name: &str| {
            var(name).ok_or_else(|| Error::new(ErrorKind::EnvVar(format!("SF_{name}"))))
        };

        let selectors = [
            var("INSTANCE_NAME").map(Instance::Named),
            var("IS_PROD")
                .map(|v| parse_bool(&v))
                .transpose()?
                .map(|prod| if prod { Instance::Production } else { Instance::Sandbox }),
            var("LOGIN_HOST").map(Instance::LoginHost),
        ];
        let mut chosen = selectors.into_iter().flatten();
        let instance = match (chosen.next(), chosen.next()) {
            (Some(instance), None) => instance,
            (None, _) => {
                return Err(Error::new(ErrorKind::EnvVar(
                    "SF_INSTANCE_NAME, SF_IS_PROD or SF_LOGIN_HOST".to_string(),
                )))
            }
            (Some(_), Some(_)) => {
                return Err(Error::new(ErrorKind::InvalidCredentials(
                    "SF_INSTANCE_NAME, SF_IS_PROD and SF_LOGIN_HOST are mutually exclusive"
                        .to_string(),
                )))
            }
        };

        let mut creds = Self::new(
            instance,
            required("CLIENT_ID")?,
            required("CLIENT_SECRET")?,
            required("USERNAME")?,
            required("PASSWORD")?,
        );
        if let Some(version) = var("API_VERSION") {
            creds = creds.with_api_version(version);
        }

        Ok(creds)
    }

    /// Check that every required field is present.
    pub fn validate(&self) -> Result<()> {
        let missing = [
            ("client_id", self.client_id.is_empty()),
            ("client_secret", self.client_secret.is_empty()),
            ("username", self.username.is_empty()),
            ("password", self.password.is_empty()),
            ("api_version", self.api_version.is_empty()),
        ]
        .into_iter()
        .find(|(_, empty)| *empty);

        if let Some((field, _)) = missing {
            return Err(Error::new(ErrorKind::InvalidCredentials(format!(
                "{field} is empty"
            ))));
        }

        let host_missing = match &self.instance {
            Instance::Named(name) => name.is_empty(),
            Instance::LoginHost(host) => host.is_empty(),
            Instance::Production | Instance::Sandbox => false,
        };
        if host_missing {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                "instance host is empty".to_string(),
            )));
        }

        Ok(())
    }

    /// Get the instance selector.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Host to connect to before any token exchange.
    pub fn host(&self) -> String {
        self.instance.host()
    }

    /// Get the client id (consumer key).
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Get the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Get the API version, without the `v` prefix (e.g. "58.0").
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

fn normalize_api_version(version: &str) -> String {
    let trimmed = version.trim();
    trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed)
        .to_string()
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(Error::new(ErrorKind::InvalidCredentials(format!(
            "SF_IS_PROD must be true or false, got {other:?}"
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 4] = [
        ("SF_CLIENT_ID", "3MVG9"),
        ("SF_CLIENT_SECRET", "secret"),
        ("SF_USERNAME", "user@example.com"),
        ("SF_PASSWORD", "pw+token"),
    ];

    #[test]
    fn test_instance_hosts() {
        assert_eq!(Instance::Named("eu18".into()).host(), "eu18.my.salesforce.com");
        assert_eq!(Instance::Production.host(), "login.salesforce.com");
        assert_eq!(Instance::Sandbox.host(), "test.salesforce.com");
        assert_eq!(Instance::LoginHost("127.0.0.1".into()).host(), "127.0.0.1");
        assert!(Instance::Named("eu18".into()).is_named());
        assert!(!Instance::Production.is_named());
    }

    #[test]
    fn test_setup_shapes() {
        let named = Credentials::named("acme", "id", "secret", "user", "pw");
        assert_eq!(named.host(), "acme.my.salesforce.com");
        assert_eq!(named.api_version(), "58.0");

        let prod = Credentials::for_environment(true, "id", "secret", "user", "pw");
        assert_eq!(prod.instance(), &Instance::Production);

        let sandbox = Credentials::for_environment(false, "id", "secret", "user", "pw");
        assert_eq!(sandbox.host(), "test.salesforce.com");
    }

    #[test]
    fn test_api_version_normalized() {
        let creds = Credentials::named("acme", "id", "secret", "user", "pw");
        assert_eq!(creds.clone().with_api_version("v60.0").api_version(), "60.0");
        assert_eq!(creds.with_api_version("61.0").api_version(), "61.0");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::named("acme", "id", "super_secret_value", "user", "hunter2pw");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super_secret_value"));
        assert!(!debug.contains("hunter2pw"));
    }

    #[test]
    fn test_validate() {
        assert!(Credentials::named("acme", "id", "secret", "user", "pw")
            .validate()
            .is_ok());

        let err = Credentials::named("acme", "id", "secret", "user", "")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("password is empty"));

        let err = Credentials::named("", "id", "secret", "user", "pw")
            .validate()
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidCredentials(_)));
    }

    #[test]
    fn test_from_lookup_named() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("SF_INSTANCE_NAME", "acme"));
        vars.push(("SF_API_VERSION", "v59.0"));

        let creds = Credentials::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(creds.instance(), &Instance::Named("acme".into()));
        assert_eq!(creds.client_id(), "3MVG9");
        assert_eq!(creds.username(), "user@example.com");
        assert_eq!(creds.api_version(), "59.0");
    }

    #[test]
    fn test_from_lookup_prefix_fallback() {
        let vars = [
            ("SALESFORCE_IS_PROD", "false"),
            ("SALESFORCE_CLIENT_ID", "id"),
            ("SF_CLIENT_SECRET", "secret"),
            ("SF_USERNAME", "user"),
            ("SALESFORCE_PASSWORD", "pw"),
        ];
        let creds = Credentials::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(creds.instance(), &Instance::Sandbox);
        assert_eq!(creds.api_version(), "58.0");
    }

    #[test]
    fn test_from_lookup_selectors_are_exclusive() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("SF_INSTANCE_NAME", "acme"));
        vars.push(("SF_IS_PROD", "true"));

        let err = Credentials::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidCredentials(_)));
    }

    #[test]
    fn test_from_lookup_missing_values() {
        let err = Credentials::from_lookup(lookup(&REQUIRED)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::EnvVar(_)));

        let vars = [("SF_IS_PROD", "true"), ("SF_CLIENT_ID", "id")];
        let err = Credentials::from_lookup(lookup(&vars)).unwrap_err();
        assert!(err.to_string().contains("SF_CLIENT_SECRET"));

        let mut vars = REQUIRED.to_vec();
        vars.push(("SF_IS_PROD", "maybe"));
        let err = Credentials::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidCredentials(_)));
    }
}
