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

//! This crate provides common functions for unit tests
use std::{
    env,
    fs,
    io,
    path::PathBuf,
};
use tempfile::TempDir;

/// get the root path of the crate under test
///
/// cargo exports CARGO_MANIFEST_DIR to the test binary it runs; outside of
/// cargo this crate's own root is returned.
pub fn get_crate_root() -> io::Result<PathBuf> {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| env!("CARGO_MANIFEST_DIR").to_string());
    Ok(PathBuf::from(manifest_dir))
}

/// A unit file written into its own temporary directory.
///
/// The directory is removed when the value is dropped.
pub struct UnitFixture {
    _dir: TempDir,
    path: PathBuf,
}

impl UnitFixture {
    /// path of the written unit file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// open the unit file for reading
    pub fn open(&self) -> io::Result<fs::File> {
        fs::File::open(&self.path)
    }
}

/// write `content` to a fresh temporary directory as `name`
pub fn write_unit_file(name: &str, content: &str) -> io::Result<UnitFixture> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(name);
    fs::write(&path, content)?;
    Ok(UnitFixture { _dir: dir, path })
}
