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

#![allow(non_snake_case)]
//! Service unit definition: the `[Unit]` and `[Service]` sections.
use crate::error::*;
use std::fmt;
use std::str::FromStr;
use unit_parser::{UnitConfig, UnitEntry, UnitSection};

/// Service types systemd knows about. Only `simple` and `oneshot` can run here.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum ServiceType {
    ///
    Simple,
    ///
    Oneshot,
    ///
    Forking,
    ///
    Dbus,
    ///
    Notify,
    ///
    Idle,
}

impl ServiceType {
    /// whether units of this type can be started
    pub fn supported(&self) -> bool {
        match self {
            ServiceType::Simple | ServiceType::Oneshot => true,
            ServiceType::Forking | ServiceType::Dbus | ServiceType::Notify | ServiceType::Idle => {
                false
            }
        }
    }
}

impl FromStr for ServiceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = match s {
            "simple" => ServiceType::Simple,
            "oneshot" => ServiceType::Oneshot,
            "forking" => ServiceType::Forking,
            "dbus" => ServiceType::Dbus,
            "notify" => ServiceType::Notify,
            "idle" => ServiceType::Idle,
            _ => return Err(Error::NotSupported),
        };
        Ok(t)
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceType::Simple => "simple",
            ServiceType::Oneshot => "oneshot",
            ServiceType::Forking => "forking",
            ServiceType::Dbus => "dbus",
            ServiceType::Notify => "notify",
            ServiceType::Idle => "idle",
        };
        f.write_str(s)
    }
}

/// Restart= policy. Parsed and kept, enforcing it is up to a supervisor.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Default)]
pub enum ServiceRestart {
    ///
    #[default]
    No,
    ///
    OnSuccess,
    ///
    OnFailure,
    ///
    OnAbnormal,
    ///
    OnWatchdog,
    ///
    OnAbort,
    ///
    Always,
}

impl FromStr for ServiceRestart {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let r = match s {
            "" | "no" => ServiceRestart::No,
            "on-success" => ServiceRestart::OnSuccess,
            "on-failure" => ServiceRestart::OnFailure,
            "on-abnormal" => ServiceRestart::OnAbnormal,
            "on-watchdog" => ServiceRestart::OnWatchdog,
            "on-abort" => ServiceRestart::OnAbort,
            "always" => ServiceRestart::Always,
            _ => return Err(Error::NotSupported),
        };
        Ok(r)
    }
}

impl UnitEntry for ServiceRestart {
    type Error = Error;

    fn parse_from_str(input: &str) -> Result<Self> {
        input.trim().parse()
    }
}

/// Relations declared in the `[Unit]` section, as unit names.
///
/// Resolving them into jobs is up to the unit registry.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct UnitDeps {
    ///
    pub wants: Vec<String>,
    ///
    pub requires: Vec<String>,
    ///
    pub conflicts: Vec<String>,
    ///
    pub before: Vec<String>,
    ///
    pub after: Vec<String>,
}

/// The `[Unit]` section.
#[derive(UnitSection, Debug, Clone)]
pub struct SectionUnit {
    /// free form description of the unit
    pub Description: String,
    /// URIs referencing documentation
    pub Documentation: String,
    /// units started along with this one, their failure is ignored
    #[entry(append)]
    pub Wants: Vec<String>,
    /// units that must start successfully before this one runs
    #[entry(append)]
    pub Requires: Vec<String>,
    /// units stopped when this one starts
    #[entry(append)]
    pub Conflicts: Vec<String>,
    /// units ordered after this one
    #[entry(append)]
    pub Before: Vec<String>,
    /// units ordered before this one
    #[entry(append)]
    pub After: Vec<String>,
}

/// The `[Service]` section.
#[derive(UnitSection, Debug, Clone)]
pub struct SectionService {
    /// process start-up type, checked when the definition is verified
    #[entry(default = "simple")]
    pub Type: String,
    /// command line of the main process
    pub ExecStart: String,
    /// command line run to stop the service instead of SIGKILL
    pub ExecStop: String,
    /// command line run to reload the configuration of the service
    pub ExecReload: String,
    /// file the service writes its main pid to
    pub PIDFile: String,
    /// restart policy
    pub Restart: ServiceRestart,
    /// whether a cleanly exited service still counts as active
    pub RemainAfterExit: bool,
}

/// The `[Install]` section. Kept as parsed; enabling units is left to the
/// unit registry.
#[derive(UnitSection, Debug, Clone)]
pub struct SectionInstall {
    ///
    #[entry(append)]
    pub WantedBy: Vec<String>,
    ///
    #[entry(append)]
    pub RequiredBy: Vec<String>,
    ///
    #[entry(append)]
    pub Alias: Vec<String>,
}

/// Service unit definition
#[derive(UnitConfig, Default, Debug, Clone)]
pub struct ServiceDefinition {
    ///
    pub Unit: SectionUnit,
    ///
    pub Service: SectionService,
    ///
    pub Install: SectionInstall,
}

impl ServiceDefinition {
    /// Check the definition, collecting every problem found.
    pub(super) fn verify(&self) -> Result<ServiceType> {
        let mut merr = MultiError::new();

        if self.Service.ExecStart.trim().is_empty() {
            merr.push(Error::field("ExecStart", Error::NotSet));
        }

        let typ = &self.Service.Type;
        let service_type = match typ.parse::<ServiceType>() {
            Ok(t) if t.supported() => Some(t),
            _ => {
                merr.push(Error::field("Type", Error::field(typ, Error::NotSupported)));
                None
            }
        };

        merr.into_result()?;
        service_type.ok_or(Error::NotSupported)
    }

    ///
    pub fn deps(&self) -> UnitDeps {
        UnitDeps {
            wants: self.Unit.Wants.clone(),
            requires: self.Unit.Requires.clone(),
            conflicts: self.Unit.Conflicts.clone(),
            before: self.Unit.Before.clone(),
            after: self.Unit.After.clone(),
        }
    }
}
