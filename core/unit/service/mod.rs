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

//! Service units: a single process described by a `[Service]` section.
mod config;
mod pid;
mod state;

pub use config::{
    SectionInstall, SectionService, SectionUnit, ServiceDefinition, ServiceRestart, ServiceType, UnitDeps,
};
pub use state::ServiceState;

use self::pid::{run_cmdline, ServicePid};
use crate::error::*;
use crate::unit::{SubUnit, UnitActiveState};
use async_trait::async_trait;
use std::io::Read;

/// Service unit
#[derive(Debug, Default)]
pub struct ServiceUnit {
    def: ServiceDefinition,
    service_type: Option<ServiceType>,
    pid: Option<ServicePid>,
}

impl ServiceUnit {
    ///
    pub fn new() -> Self {
        ServiceUnit::default()
    }

    /// Load the definition from `reader`.
    ///
    /// On success the process is prepared from `ExecStart` but not launched.
    /// A definition missing `ExecStart` or declaring an unsupported `Type`
    /// is rejected with every problem reported at once.
    pub fn define<R: Read>(&mut self, mut reader: R) -> Result<()> {
        let mut text = String::new();
        reader.read_to_string(&mut text).context(IoSnafu)?;
        self.define_str(&text)
    }

    /// Same as [`ServiceUnit::define`] for text already in memory.
    ///
    /// A unit whose process is still running can not be redefined; stop it
    /// first.
    pub fn define_str(&mut self, text: &str) -> Result<()> {
        if let Some(pid) = self.pid.as_ref().filter(|pid| pid.is_running()) {
            return StillRunningSnafu { cmd: pid.cmdline() }.fail();
        }

        let mut def = ServiceDefinition::default();
        unit_parser::parse_definition(text, &mut def).context(ParseSnafu)?;

        let service_type = def.verify()?;
        let pid = ServicePid::new(&def.Service.ExecStart).ok_or(Error::NotSet)?;

        log::debug!(
            "Defined {} service: '{}'",
            service_type,
            def.Service.ExecStart
        );
        self.def = def;
        self.service_type = Some(service_type);
        self.pid = Some(pid);
        Ok(())
    }

    ///
    pub fn definition(&self) -> &ServiceDefinition {
        &self.def
    }

    ///
    pub fn deps(&self) -> UnitDeps {
        self.def.deps()
    }

    fn parsed(&self) -> (ServiceType, &ServicePid) {
        match (self.service_type, self.pid.as_ref()) {
            (Some(t), Some(pid)) => (t, pid),
            _ => panic!("{}", Error::NotParsed),
        }
    }

    /// Start the service process.
    ///
    /// `simple` returns as soon as the process is launched; `oneshot` waits
    /// for it and reports how it finished.
    pub async fn start(&self) -> Result<()> {
        let (service_type, pid) = self.parsed();
        match service_type {
            ServiceType::Simple => pid.start(),
            ServiceType::Oneshot => pid.run().await,
            _ => unreachable!("unsupported service type {} passed the definition check", service_type),
        }
    }

    /// Kill the service process.
    pub async fn stop(&self) -> Result<()> {
        let (_, pid) = self.parsed();
        pid.kill().await
    }

    /// Run `ExecReload` to completion.
    pub async fn reload(&self) -> Result<()> {
        self.parsed();
        let cmd = self.def.Service.ExecReload.trim();
        if cmd.is_empty() {
            return Err(Error::field("ExecReload", Error::NotSupported));
        }
        run_cmdline(cmd).await
    }

    /// The sub state, derived from the process.
    ///
    /// # Panics
    ///
    /// if the unit has not been defined successfully.
    pub fn sub(&self) -> ServiceState {
        let (_, pid) = self.parsed();
        if !pid.launched() {
            return ServiceState::Dead;
        }

        match pid.exit_status() {
            None => ServiceState::Running,
            Some(status) if status.success() => {
                if self.def.Service.RemainAfterExit {
                    ServiceState::Exited
                } else {
                    ServiceState::Dead
                }
            }
            Some(_) => ServiceState::Failed,
        }
    }

    /// The activation state of the service.
    pub fn active(&self) -> UnitActiveState {
        self.sub().to_unit_active_state()
    }
}

#[async_trait]
impl SubUnit for ServiceUnit {
    async fn start(&self) -> Result<()> {
        ServiceUnit::start(self).await
    }

    async fn stop(&self) -> Result<()> {
        ServiceUnit::stop(self).await
    }

    async fn reload(&self) -> Result<()> {
        ServiceUnit::reload(self).await
    }

    fn can_reload(&self) -> bool {
        !self.def.Service.ExecReload.trim().is_empty()
    }

    fn current_active_state(&self) -> UnitActiveState {
        self.active()
    }

    fn get_subunit_state(&self) -> String {
        self.sub().to_string()
    }
}
