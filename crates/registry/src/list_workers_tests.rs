// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use oj_core::FakeClock;
use oj_store::MemoryKv;

use super::*;

fn store() -> JobStore<FakeClock> {
    JobStore::new(Arc::new(MemoryKv::new()), FakeClock::new())
}

#[tokio::test]
async fn empty_bucket_yields_empty_list() {
    let store = store();
    assert!(list_workers(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn parses_every_valid_registration() {
    let store = store();
    let reg = WorkerRegistration::new("web-1", Default::default(), "2026-07-28T00:00:00Z");
    store.put_worker("web-1", serde_json::to_vec(&reg).unwrap().into()).await.unwrap();

    let workers = list_workers(&store).await.unwrap();
    assert_eq!(workers, vec![reg]);
}

#[tokio::test]
async fn skips_unparseable_entries_without_failing_the_scan() {
    let store = store();
    let good = WorkerRegistration::new("web-1", Default::default(), "2026-07-28T00:00:00Z");
    store.put_worker("web-1", serde_json::to_vec(&good).unwrap().into()).await.unwrap();
    store.put_worker("web-2", b"not json".to_vec().into()).await.unwrap();

    let workers = list_workers(&store).await.unwrap();
    assert_eq!(workers, vec![good]);
}
