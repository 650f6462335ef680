use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Argon2Hasher;
use auth::Claims;
use auth::Hs256TokenService;
use auth::PasswordHasher;
use auth::TokenService;
use discussion_service::domain::user::models::User;
use discussion_service::domain::user::models::UserId;
use discussion_service::domain::user::ports::UserRepository;
use discussion_service::domain::user::ports::UserServicePort;
use discussion_service::domain::user::service::UserService;
use discussion_service::inbound::http::router::create_router;
use discussion_service::user::errors::UserError;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_VALIDITY_DAYS: i64 = 7;

/// Test application that spawns a real server on a random port.
///
/// Backed by an in-memory user store so the suite needs no database; the
/// store enforces the same (email, phone) uniqueness the production schema
/// does.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_service: Arc<Hs256TokenService>,
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    fn conflicts(existing: &User, candidate: &User) -> bool {
        existing.email.as_str() == candidate.email.as_str()
            || existing.phone_number.as_str() == candidate.phone_number.as_str()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| Self::conflicts(u, &user)) {
            return Err(UserError::DuplicateEmailOrPhone);
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.id != user.id && Self::conflicts(u, &user))
        {
            return Err(UserError::DuplicateEmailOrPhone);
        }
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::default());
        let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new());
        let token_service = Arc::new(Hs256TokenService::new(TEST_SECRET, TEST_VALIDITY_DAYS));

        let user_service: Arc<dyn UserServicePort> =
            Arc::new(UserService::new(repository, password_hasher));

        let router = create_router(
            user_service,
            Arc::clone(&token_service) as Arc<dyn TokenService>,
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_service,
        }
    }

    /// Sign claims with the server's secret and validity window
    pub fn token_for(&self, claims: Claims) -> String {
        self.token_service
            .create_token(claims)
            .expect("Failed to create token")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}
