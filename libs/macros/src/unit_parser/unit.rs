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

//! Functions for generating unit parsing expressions.
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error};

/// Generate [UnitConfig] implementations when using `#[derive(UnitConfig)]`
pub(crate) fn gen_unit_derives(input: DeriveInput) -> syn::Result<TokenStream> {
    let mut sections = Vec::new();
    let mut names = Vec::new();

    if let Data::Struct(data_struct) = &input.data {
        for entry in &data_struct.fields {
            let ident = entry.ident.as_ref().ok_or_else(|| {
                Error::new_spanned(entry, "A section must have an explicit name.")
            })?;
            names.push(format!("{}", ident));
            sections.push(ident);
        }
    } else {
        return Err(Error::new_spanned(
            &input,
            "A UnitConfig cannot be an enum or an union.",
        ));
    }

    let ident = &input.ident;
    let result = quote! {
        impl unit_parser::UnitConfig for #ident {
            fn has_section(&self, __section: &str) -> bool {
                [#( #names ),*].contains(&__section)
            }

            fn set_entry(&mut self, __section: &str, __key: &str, __value: &str) -> unit_parser::Result<bool> {
                match __section {
                    #( #names => unit_parser::UnitSection::set_entry(&mut self.#sections, __key, __value), )*
                    _ => ::std::result::Result::Ok(false),
                }
            }
        }
    };

    Ok(result)
}
