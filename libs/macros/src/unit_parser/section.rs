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

//! Functions for generating section parsing expressions.
use crate::unit_parser::attribute::EntryAttributes;
use crate::unit_parser::entry::{gen_entry_default, gen_entry_parse};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Result};

/// Generate [UnitSection] and [Default] implementations when using
/// `#[derive(UnitSection)]`
pub(crate) fn gen_section_derives(input: DeriveInput) -> Result<TokenStream> {
    let mut entry_defaults = Vec::new();
    let mut entry_parsers = Vec::new();

    if let Data::Struct(data_struct) = &input.data {
        for entry in &data_struct.fields {
            let name = entry
                .ident
                .as_ref()
                .ok_or_else(|| Error::new_spanned(entry, "Tuple structs are not supported."))?;
            let attributes = EntryAttributes::parse_attributes(entry)?;
            entry_defaults.push(gen_entry_default(entry, name, &attributes)?);
            entry_parsers.push(gen_entry_parse(entry, name, &attributes)?);
        }
    } else {
        return Err(Error::new_spanned(
            &input,
            "A UnitSection cannot be an enum or an union.",
        ));
    }

    let ident = &input.ident;
    let result = quote! {
        impl unit_parser::UnitSection for #ident {
            fn set_entry(&mut self, __key: &str, __value: &str) -> unit_parser::Result<bool> {
                match __key {
                    #( #entry_parsers )*
                    _ => return ::std::result::Result::Ok(false),
                }
                ::std::result::Result::Ok(true)
            }
        }

        impl ::std::default::Default for #ident {
            fn default() -> Self {
                #ident {
                    #( #entry_defaults ),*
                }
            }
        }
    };

    Ok(result)
}
