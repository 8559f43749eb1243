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

//! Derive macros filling definition structs from parsed unit text.
mod unit_parser;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Implement `unit_parser::UnitConfig` for a struct whose fields are
/// sections; each field name is the name of its section.
#[proc_macro_derive(UnitConfig)]
pub fn derive_unit_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    unit_parser::gen_unit_derives(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Implement `unit_parser::UnitSection` and `Default` for a struct whose
/// fields are entries.
///
/// Field attributes:
/// * `#[entry(default = expr)]`: value before the entry is seen,
/// * `#[entry(append)]`: `Vec` field, every occurrence adds to it and an
///   empty value clears it,
/// * `#[entry(key = "Name")]`: key differing from the field name.
#[proc_macro_derive(UnitSection, attributes(entry))]
pub fn derive_unit_section(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    unit_parser::gen_section_derives(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
