// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message-bus port: publish job notifications, build durable consumers.
//!
//! [`MessageBus`]/[`Consumer`] abstract the substrate; [`memory::MemoryBus`]
//! backs tests, and the `nats` feature adds [`nats::NatsMessageBus`] for
//! production over JetStream.

pub mod config;
pub mod error;
pub mod memory;
#[cfg(feature = "nats")]
pub mod nats;
pub mod traits;

pub use config::{ConsumerConfig, ReplayPolicy};
pub use error::BusError;
pub use memory::MemoryBus;
#[cfg(feature = "nats")]
pub use nats::NatsMessageBus;
pub use traits::{Acker, Consumer, Delivery, MessageBus};
