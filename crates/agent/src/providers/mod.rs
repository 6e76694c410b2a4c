// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concrete [`crate::provider::Provider`] implementations bundled with this
//! crate. Everything beyond `node.hostname.get` is a black-box handler left
//! to the deployment (OS-level process execution, disk/network probes,
//! etc.) and registered by the binary that wires an agent up.

pub mod hostname;

pub use hostname::HostnameProvider;
