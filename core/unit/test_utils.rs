// Copyright (c) 2022 Huawei Technologies Co.,Ltd. All rights reserved.
//
// sysMaster is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan
// PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//         http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY
// KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO
// NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

//! A recording unit kind for tests of the job engine.
use super::base::SubUnit;
use super::state::UnitActiveState;
use crate::error::*;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
pub(crate) struct UnitRecorder {
    starts: AtomicUsize,
    stops: AtomicUsize,
    reloads: AtomicUsize,
    active: AtomicBool,
    fail_start: AtomicBool,
    fail_stop: AtomicBool,
    reloadable: AtomicBool,
    delay_ms: AtomicUsize,
}

impl UnitRecorder {
    pub(crate) fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub(crate) fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub(crate) fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    pub(crate) fn set_fail_start(&self, v: bool) {
        self.fail_start.store(v, Ordering::SeqCst);
    }

    pub(crate) fn set_fail_stop(&self, v: bool) {
        self.fail_stop.store(v, Ordering::SeqCst);
    }

    pub(crate) fn set_reloadable(&self, v: bool) {
        self.reloadable.store(v, Ordering::SeqCst);
    }

    /// make every operation take `ms` milliseconds
    pub(crate) fn set_delay(&self, ms: usize) {
        self.delay_ms.store(ms, Ordering::SeqCst);
    }

    async fn delay(&self) {
        let ms = self.delay_ms.load(Ordering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms as u64)).await;
        }
    }
}

pub(crate) struct TestUnit {
    rec: Arc<UnitRecorder>,
}

impl TestUnit {
    pub(crate) fn new() -> (TestUnit, Arc<UnitRecorder>) {
        let rec = Arc::new(UnitRecorder::default());
        (
            TestUnit {
                rec: Arc::clone(&rec),
            },
            rec,
        )
    }
}

#[async_trait]
impl SubUnit for TestUnit {
    async fn start(&self) -> Result<()> {
        self.rec.delay().await;
        self.rec.starts.fetch_add(1, Ordering::SeqCst);
        if self.rec.fail_start.load(Ordering::SeqCst) {
            return Err(Error::NotSupported);
        }
        self.rec.active.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.rec.delay().await;
        self.rec.stops.fetch_add(1, Ordering::SeqCst);
        if self.rec.fail_stop.load(Ordering::SeqCst) {
            return Err(Error::NotStarted);
        }
        self.rec.active.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        if !self.can_reload() {
            return Err(Error::NotSupported);
        }
        self.rec.delay().await;
        self.rec.reloads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn can_reload(&self) -> bool {
        self.rec.reloadable.load(Ordering::SeqCst)
    }

    fn current_active_state(&self) -> UnitActiveState {
        if self.rec.active.load(Ordering::SeqCst) {
            UnitActiveState::Active
        } else {
            UnitActiveState::InActive
        }
    }

    fn get_subunit_state(&self) -> String {
        if self.rec.active.load(Ordering::SeqCst) {
            String::from("running")
        } else {
            String::from("dead")
        }
    }
}
