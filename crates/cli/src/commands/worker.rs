// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `oj worker list` — scan the registry bucket for live agents (spec §4.6).

use anyhow::Result;
use oj_core::Clock;
use oj_dispatch::DispatchClient;

use crate::color;
use crate::output::{handle_list, OutputFormat};

pub async fn list<C: Clock>(client: &DispatchClient<C>, format: OutputFormat) -> Result<()> {
    let workers = client.list_workers().await?;
    handle_list(format, &workers, "No live workers found", |items| {
        for worker in items {
            let labels = if worker.labels.is_empty() {
                String::new()
            } else {
                format!(
                    "  {}",
                    worker
                        .labels
                        .iter()
                        .map(|(k, v)| format!("{k}={v}"))
                        .collect::<Vec<_>>()
                        .join(",")
                )
            };
            println!(
                "{}  registered {}{}",
                color::header(&worker.hostname),
                worker.registered_at,
                labels
            );
        }
    })?;
    Ok(())
}
