// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! `ycc explain`: describe error codes.

use std::process;
use ycc_diagnostics::codes::ErrorCodeRegistry;

use crate::output;

pub fn cmd_explain(code: Option<&str>) {
    let registry = ErrorCodeRegistry::default();

    let Some(code) = code else {
        for info in registry.all() {
            println!("{}  {} [{}]", output::code(info.code), info.title, info.category);
        }
        return;
    };

    let normalized = code.to_ascii_uppercase();
    match registry.get(&normalized) {
        Some(info) => {
            println!("{}: {}", output::code(info.code), output::title(info.title));
            println!("category: {}\n", info.category);
            println!("{}", info.explanation);
        }
        None => {
            eprintln!("{}: unknown error code '{}'", output::error_label(), code);
            eprintln!("Run `ycc explain` to list all codes.");
            process::exit(1);
        }
    }
}
