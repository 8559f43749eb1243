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
use crate::error::*;
use confique::Config;
use std::str::FromStr;

/// default path of the manager configuration
pub const MANAGER_CONFIG: &str = "/etc/sysjob/manager.toml";

///
#[derive(Config, Debug, Default)]
pub struct ManagerConfig {
    ///
    #[config(nested)]
    pub Manager: SectionManager,
}

///
#[derive(Config, Debug)]
pub struct SectionManager {
    /// trace, debug, info, warn or error
    #[config(default = "info", env = "SYSJOB_LOG_LEVEL")]
    pub LogLevel: String,
    /// "console", "syslog" or both joined by '-'
    #[config(default = "console")]
    pub LogTarget: String,
    /// bound of a job's unit operation, 0 for none
    #[config(default = 0)]
    pub DefaultJobTimeoutSec: u64,
}

impl Default for SectionManager {
    fn default() -> Self {
        SectionManager {
            LogLevel: "info".to_string(),
            LogTarget: "console".to_string(),
            DefaultJobTimeoutSec: 0,
        }
    }
}

impl ManagerConfig {
    /// Load from the environment and `file` (or [`MANAGER_CONFIG`]), using
    /// the defaults if that fails.
    pub fn new(file: Option<&str>) -> ManagerConfig {
        let file = file.unwrap_or(MANAGER_CONFIG);
        match ManagerConfig::load(file) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load {}, using defaults: {}", file, e);
                ManagerConfig::default()
            }
        }
    }

    /// Load from the environment and `file`.
    pub fn load(file: &str) -> Result<ManagerConfig> {
        ManagerConfig::builder()
            .env()
            .file(file)
            .load()
            .map_err(|e| Error::Confique { msg: e.to_string() })
    }

    /// Set up logging as configured.
    pub fn init_logger(&self, name: &str) {
        let level = log::parse_level(&self.Manager.LogLevel);
        let targets: Vec<log::LogTarget> = self
            .Manager
            .LogTarget
            .split('-')
            .filter_map(|t| match log::LogTarget::from_str(t) {
                Ok(target) => Some(target),
                Err(e) => {
                    eprintln!("{}, ignoring", e);
                    None
                }
            })
            .collect();
        log::init_log(name, level, &targets);
    }
}
