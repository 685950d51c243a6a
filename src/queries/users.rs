//! User administration via `/users`.

use serde_json::Value;

use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{Credentials, User, UserUpdate};

pub struct UserQuery<'a> {
    conn: &'a Connection,
}

impl<'a> UserQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self) -> Result<Vec<User>> {
        self.conn.get(config::USERS, &[])
    }

    pub fn get(&self, id: i64) -> Result<User> {
        self.conn.get(&config::user_path(id), &[])
    }

    pub fn create(&self, username: &str, password: &str) -> Result<User> {
        self.conn
            .post(config::USERS, &Credentials::new(username, password))
    }

    pub fn update(&self, id: i64, update: &UserUpdate) -> Result<User> {
        self.conn.put(&config::user_path(id), update)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.conn
            .delete::<Value>(&config::user_path(id))
            .map(|_| ())
    }
}
