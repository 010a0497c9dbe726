//! User fixtures and generated users.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::{SeedMode, Seeder, factory};
use crate::domain::entities::NewUser;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Stable ids for the manual fixtures, so other fixtures can reference them.
pub const ALICE_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0001);
pub const BOB_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0002);

fn fixtures() -> Vec<NewUser> {
    vec![
        NewUser {
            id: ALICE_ID,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        },
        NewUser {
            id: BOB_ID,
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
        },
    ]
}

pub struct UserSeeder<U: UserRepository> {
    users: Arc<U>,
    mode: SeedMode,
    count: usize,
}

impl<U: UserRepository> UserSeeder<U> {
    pub fn new(users: Arc<U>, mode: SeedMode, count: usize) -> Self {
        Self { users, mode, count }
    }

    fn records(&self) -> Vec<NewUser> {
        match self.mode {
            SeedMode::Manual => fixtures(),
            SeedMode::Factory => {
                let mut rng = rand::rng();
                (0..self.count).map(|_| factory::fake_user(&mut rng)).collect()
            }
        }
    }
}

#[async_trait]
impl<U: UserRepository + 'static> Seeder for UserSeeder<U> {
    fn name(&self) -> &'static str {
        "users"
    }

    async fn seed(&self) -> Result<usize, AppError> {
        let records = self.records();
        let total = records.len();

        for record in records {
            let username = record.username.clone();
            self.users.create(record).await.map_err(|e| {
                tracing::error!(%username, error = %e, "Failed to seed user");
                e
            })?;
        }

        Ok(total)
    }
}
