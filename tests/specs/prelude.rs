// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared setup for specs.

pub use std::sync::Arc;
pub use std::time::Duration;

pub use stalk_client::test_support::FakeServer;
pub use stalk_client::{Address, Body, Client, ClientConfig, ClientError, PutOptions, Rejection};

/// A fake server listening on loopback.
pub struct Harness {
    pub server: FakeServer,
    pub address: Address,
}

impl Harness {
    pub async fn start() -> Self {
        let server = FakeServer::new();
        let addr = server.listen().await.expect("fake server should bind");
        Self { server, address: Address::new(addr.ip().to_string(), addr.port()) }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.address.clone())
    }

    /// A session on the default tubes.
    pub async fn client(&self) -> Client {
        self.connect(self.config()).await
    }

    pub async fn connect(&self, config: ClientConfig) -> Client {
        Client::connect(config).await.expect("session should open")
    }
}
