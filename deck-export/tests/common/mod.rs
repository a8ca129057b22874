//! Shared fixtures for deck-export integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use deck_core::SceneNode;
use deck_export::{RasterError, RasterResult, RasterSettings, Rasterizer};

/// A minimal PNG signature, enough for format sniffing.
pub const PNG: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Fails every call the way a host exception would, counting attempts.
#[derive(Default)]
pub struct ThrowingRasterizer {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Rasterizer for ThrowingRasterizer {
    async fn rasterize(&self, node: &SceneNode, _settings: &RasterSettings) -> RasterResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RasterError::Host(format!("cannot export {}", node.id)))
    }
}

/// Returns a PNG for every node after a delay.
pub struct SlowRasterizer {
    pub delay: Duration,
}

#[async_trait]
impl Rasterizer for SlowRasterizer {
    async fn rasterize(&self, _node: &SceneNode, _settings: &RasterSettings) -> RasterResult<Vec<u8>> {
        tokio::time::sleep(self.delay).await;
        Ok(PNG.to_vec())
    }
}

/// Parse a selection given as host JSON, local geometry only.
pub fn selection(json: serde_json::Value) -> Vec<SceneNode> {
    serde_json::from_value(json).expect("selection json")
}
