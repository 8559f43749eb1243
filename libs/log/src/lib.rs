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

//! Logging for sysjob, built over the `log` facade.
//!
//! Call [`init_log`] once at startup (calling it again replaces the targets),
//! then use the re-exported macros as usual.
pub mod logger;

pub use log::{debug, error, info, log, trace, warn};
pub use log::{max_level, set_max_level};
pub use log::{Level, LevelFilter, Log, Metadata, Record};

pub use logger::{init_log, parse_level, LogTarget};

/// Initialize console logger.
pub fn init_log_to_console(name: &str, level: Level) {
    init_log(name, level, &[LogTarget::Console]);
}
